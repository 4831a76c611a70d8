// Copyright (c) 2025 - Cowboy AI, Inc.
//! Environment Tiers and Tier-Keyed Default Tables
//!
//! Every default in the blueprint engine is looked up by [`EnvironmentTier`].
//! [`TierTable`] has one field per tier, so adding a tier is a compile error
//! in every table until it is filled in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::BlueprintError;

/// Deployment environment classification
///
/// Ordered `Dev < Staging < Prod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentTier {
    Dev,
    Staging,
    Prod,
}

impl EnvironmentTier {
    /// All tiers in ascending order
    pub const ALL: [EnvironmentTier; 3] = [Self::Dev, Self::Staging, Self::Prod];

    /// Canonical lowercase name, used in resource names and tags
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Staging => "staging",
            Self::Prod => "prod",
        }
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

impl fmt::Display for EnvironmentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EnvironmentTier {
    type Err = BlueprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "staging" => Ok(Self::Staging),
            "prod" => Ok(Self::Prod),
            other => Err(BlueprintError::Configuration(format!(
                "unknown environment tier '{other}'"
            ))),
        }
    }
}

/// A value for every [`EnvironmentTier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTable<T> {
    pub dev: T,
    pub staging: T,
    pub prod: T,
}

impl<T> TierTable<T> {
    pub const fn new(dev: T, staging: T, prod: T) -> Self {
        Self { dev, staging, prod }
    }

    /// Value for the given tier
    pub fn get(&self, tier: EnvironmentTier) -> &T {
        match tier {
            EnvironmentTier::Dev => &self.dev,
            EnvironmentTier::Staging => &self.staging,
            EnvironmentTier::Prod => &self.prod,
        }
    }

    /// Build a table from a loosely authored map
    ///
    /// An incomplete map is an authoring error and is reported as
    /// [`BlueprintError::Configuration`] naming the first missing tier.
    pub fn from_map(
        table: &'static str,
        mut entries: BTreeMap<EnvironmentTier, T>,
    ) -> Result<Self, BlueprintError> {
        let mut take = |tier: EnvironmentTier| {
            entries.remove(&tier).ok_or_else(|| {
                BlueprintError::Configuration(format!(
                    "default table '{table}' has no value for tier '{tier}'"
                ))
            })
        };

        let dev = take(EnvironmentTier::Dev)?;
        let staging = take(EnvironmentTier::Staging)?;
        let prod = take(EnvironmentTier::Prod)?;
        Ok(Self { dev, staging, prod })
    }

    /// Apply `f` to every tier's value
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> TierTable<U> {
        TierTable {
            dev: f(&self.dev),
            staging: f(&self.staging),
            prod: f(&self.prod),
        }
    }
}
