// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Identity and Deterministic Resource Names

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::EnvironmentTier;
use crate::errors::{BlueprintError, BlueprintResult};

/// Separator placed between name segments
pub const NAME_SEPARATOR: &str = "-";

/// Naming rule violation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameViolation {
    #[error("name is empty")]
    Empty,

    #[error("name exceeds maximum length of {max} characters: {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("invalid character in name: {0:?}")]
    InvalidCharacter(char),

    #[error("name cannot start or end with a hyphen: {0}")]
    InvalidFormat(String),

    #[error("tier token '{0}' is reserved as a name segment")]
    ReservedTierToken(&'static str),
}

/// Naming constraints of the target provisioning backend
///
/// Injected into [`derive_name`] so the engine does not hard-code one
/// provider's rules.
pub trait NamePolicy: Send + Sync {
    /// Check a candidate name segment or a complete derived name
    fn check(&self, candidate: &str) -> Result<(), NameViolation>;
}

/// DNS-label style naming: ASCII alphanumerics and hyphens, no leading or
/// trailing hyphen, at most [`DnsLabelPolicy::MAX_LENGTH`] characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct DnsLabelPolicy;

impl DnsLabelPolicy {
    pub const MAX_LENGTH: usize = 63;
}

impl NamePolicy for DnsLabelPolicy {
    fn check(&self, candidate: &str) -> Result<(), NameViolation> {
        if candidate.is_empty() {
            return Err(NameViolation::Empty);
        }

        if candidate.len() > Self::MAX_LENGTH {
            return Err(NameViolation::TooLong {
                max: Self::MAX_LENGTH,
                actual: candidate.len(),
            });
        }

        if let Some(ch) = candidate
            .chars()
            .find(|ch| !ch.is_ascii_alphanumeric() && *ch != '-')
        {
            return Err(NameViolation::InvalidCharacter(ch));
        }

        if candidate.starts_with(NAME_SEPARATOR) || candidate.ends_with(NAME_SEPARATOR) {
            return Err(NameViolation::InvalidFormat(candidate.to_string()));
        }

        Ok(())
    }
}

/// Metadata every blueprint is constructed from
///
/// Blueprints take it by value and never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceIdentity {
    pub service_name: String,
    pub environment: EnvironmentTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
}

impl ServiceIdentity {
    pub fn new(service_name: impl Into<String>, environment: EnvironmentTier) -> Self {
        Self {
            service_name: service_name.into(),
            environment,
            team: None,
            cost_center: None,
        }
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_cost_center(mut self, cost_center: impl Into<String>) -> Self {
        self.cost_center = Some(cost_center.into());
        self
    }

    /// Same team, cost center and tier under a different service name
    pub fn renamed(&self, service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..self.clone()
        }
    }

    /// Validate the service name against a naming policy
    pub fn validate(&self, policy: &dyn NamePolicy) -> BlueprintResult<()> {
        policy.check(&self.service_name).map_err(|violation| {
            BlueprintError::InvalidIdentity(format!(
                "service name '{}': {}",
                self.service_name, violation
            ))
        })
    }
}

/// Deterministically derived resource name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceName(String);

impl ResourceName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// First hyphen-delimited segment of `part` that spells a tier
fn reserved_tier_token(part: &str) -> Option<&'static str> {
    part.split(NAME_SEPARATOR).find_map(|segment| {
        EnvironmentTier::ALL
            .iter()
            .map(EnvironmentTier::as_str)
            .find(|tier| *tier == segment)
    })
}

/// Derive `service-environment[-suffix]`
///
/// An empty suffix is treated as absent. The service name and the complete
/// result must both satisfy `policy`. Neither the service name nor the
/// suffix may contain a tier as a standalone segment, so the tier always
/// marks the split and distinct inputs never share a name.
pub fn derive_name(
    identity: &ServiceIdentity,
    suffix: Option<&str>,
    policy: &dyn NamePolicy,
) -> BlueprintResult<ResourceName> {
    identity.validate(policy)?;

    let suffix = suffix.filter(|s| !s.is_empty());
    let segments = std::iter::once(("service name", identity.service_name.as_str()))
        .chain(suffix.map(|suffix| ("suffix", suffix)));
    for (label, part) in segments {
        if let Some(token) = reserved_tier_token(part) {
            return Err(BlueprintError::InvalidIdentity(format!(
                "{label} '{part}': {}",
                NameViolation::ReservedTierToken(token)
            )));
        }
    }

    let mut parts = vec![identity.service_name.as_str(), identity.environment.as_str()];
    if let Some(suffix) = suffix {
        parts.push(suffix);
    }

    let name = parts.join(NAME_SEPARATOR);
    policy.check(&name).map_err(|violation| {
        BlueprintError::InvalidIdentity(format!("derived name '{name}': {violation}"))
    })?;

    Ok(ResourceName(name))
}
