// Copyright (c) 2025 - Cowboy AI, Inc.

//! NATS subject hierarchy for provisioning requests
//!
//! # Subject Pattern
//!
//! ```text
//! blueprints.{tier}.{kind}.declare
//! ```
//!
//! This allows for:
//! - Precise handlers (`blueprints.prod.function.declare`)
//! - Tier-level wildcards (`blueprints.prod.>`)
//! - Kind-level wildcards across tiers (`blueprints.*.cluster.declare`)
//!
//! # Examples
//!
//! ```rust
//! use cim_blueprints::subjects::SubjectBuilder;
//! use cim_blueprints::domain::{EnvironmentTier, ResourceKind};
//!
//! let subject = SubjectBuilder::new()
//!     .tier(EnvironmentTier::Prod)
//!     .kind(ResourceKind::Function)
//!     .build();
//! assert_eq!(subject, "blueprints.prod.function.declare");
//!
//! let wildcard = SubjectBuilder::new().tier(EnvironmentTier::Dev).build_wildcard();
//! assert_eq!(wildcard, "blueprints.dev.>");
//! ```

use crate::domain::{EnvironmentTier, ResourceKind};

/// Default root namespace
pub const BLUEPRINTS_ROOT: &str = "blueprints";

/// Final token of a declaration request subject
pub const DECLARE: &str = "declare";

/// Builder for provisioning subjects
///
/// Unset tokens become the single-token wildcard `*`.
#[derive(Debug, Clone)]
pub struct SubjectBuilder {
    root: String,
    tier: Option<EnvironmentTier>,
    kind: Option<ResourceKind>,
}

impl SubjectBuilder {
    pub fn new() -> Self {
        Self::with_root(BLUEPRINTS_ROOT)
    }

    /// Use a different root namespace
    pub fn with_root(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            tier: None,
            kind: None,
        }
    }

    pub fn tier(mut self, tier: EnvironmentTier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn kind(mut self, kind: ResourceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// `{root}.{tier}.{kind}.declare`
    pub fn build(self) -> String {
        let tier = self.tier.map_or("*", |tier| tier.as_str());
        let kind = self.kind.map_or("*", |kind| kind.as_str());
        format!("{}.{}.{}.{}", self.root, tier, kind, DECLARE)
    }

    /// `{root}.{tier}.>`, or `{root}.>` without a tier
    pub fn build_wildcard(self) -> String {
        match self.tier {
            Some(tier) => format!("{}.{}.>", self.root, tier),
            None => format!("{}.>", self.root),
        }
    }
}

impl Default for SubjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Subject a declaration of `kind` for `tier` is sent on
pub fn declare_subject(root: &str, tier: EnvironmentTier, kind: ResourceKind) -> String {
    SubjectBuilder::with_root(root).tier(tier).kind(kind).build()
}
