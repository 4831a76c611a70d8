// Copyright (c) 2025 - Cowboy AI, Inc.
//! Layered Configuration Resolution
//!
//! Effective values are resolved with a fixed precedence:
//!
//! ```text
//! explicit caller value  >  tier-keyed default  >  hard fallback
//! ```
//!
//! Every resolution is recorded with its [`ConfigSource`] in an
//! [`EffectiveConfig`], so a declaration can show where each value came from.
//!
//! # Example
//!
//! ```rust
//! use cim_blueprints::config::{ConfigResolver, ConfigSource};
//! use cim_blueprints::domain::{EnvironmentTier, TierTable};
//!
//! const MEMORY: TierTable<u32> = TierTable::new(256, 512, 1024);
//!
//! let mut resolver = ConfigResolver::new(EnvironmentTier::Prod);
//! assert_eq!(resolver.resolve("memory_mb", None, &MEMORY), 1024);
//! assert_eq!(resolver.resolve("timeout_secs", Some(5), &TierTable::new(30, 60, 120)), 5);
//!
//! let effective = resolver.into_effective();
//! assert_eq!(effective.source("memory_mb"), Some(ConfigSource::TierDefault));
//! assert_eq!(effective.source("timeout_secs"), Some(ConfigSource::Explicit));
//! ```

pub mod defaults;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::{EnvironmentTier, TierTable};
use crate::errors::{BlueprintError, BlueprintResult};

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Explicit,
    TierDefault,
    HardFallback,
}

/// A resolved value with its provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ConfigSource,
}

/// Resolve one option
///
/// Pure: the result depends only on the arguments. Fails with
/// [`BlueprintError::Configuration`] when no layer provides a value.
pub fn resolve<T: Clone>(
    option: &str,
    explicit: Option<T>,
    tier_defaults: Option<&TierTable<T>>,
    tier: EnvironmentTier,
    hard_fallback: Option<T>,
) -> BlueprintResult<Resolved<T>> {
    if let Some(value) = explicit {
        return Ok(Resolved {
            value,
            source: ConfigSource::Explicit,
        });
    }

    if let Some(table) = tier_defaults {
        return Ok(Resolved {
            value: table.get(tier).clone(),
            source: ConfigSource::TierDefault,
        });
    }

    hard_fallback
        .map(|value| Resolved {
            value,
            source: ConfigSource::HardFallback,
        })
        .ok_or_else(|| {
            BlueprintError::Configuration(format!(
                "option '{option}' has no explicit value, no default for tier '{tier}' and no fallback"
            ))
        })
}

/// One resolved option as recorded in [`EffectiveConfig`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveEntry {
    pub value: Value,
    pub source: ConfigSource,
}

/// Resolved options of one declaration, keyed by option name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectiveConfig(BTreeMap<String, EffectiveEntry>);

impl EffectiveConfig {
    pub fn get(&self, option: &str) -> Option<&EffectiveEntry> {
        self.0.get(option)
    }

    pub fn source(&self, option: &str) -> Option<ConfigSource> {
        self.0.get(option).map(|entry| entry.source)
    }

    pub fn value(&self, option: &str) -> Option<&Value> {
        self.0.get(option).map(|entry| &entry.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EffectiveEntry)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn record<T: Serialize>(&mut self, option: &str, resolved: &Resolved<T>) {
        let value = serde_json::to_value(&resolved.value).unwrap_or(Value::Null);
        self.0.insert(
            option.to_string(),
            EffectiveEntry {
                value,
                source: resolved.source,
            },
        );
    }
}

/// Resolves options for one tier, recording provenance as it goes
///
/// One resolver belongs to one declaration; nothing is shared between
/// blueprint invocations.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    tier: EnvironmentTier,
    effective: EffectiveConfig,
}

impl ConfigResolver {
    pub fn new(tier: EnvironmentTier) -> Self {
        Self {
            tier,
            effective: EffectiveConfig::default(),
        }
    }

    pub fn tier(&self) -> EnvironmentTier {
        self.tier
    }

    /// Resolve an option that has a tier table; cannot fail
    pub fn resolve<T: Clone + Serialize>(
        &mut self,
        option: &str,
        explicit: Option<T>,
        defaults: &TierTable<T>,
    ) -> T {
        let source = if explicit.is_some() {
            ConfigSource::Explicit
        } else {
            ConfigSource::TierDefault
        };
        let resolved = Resolved {
            value: explicit.unwrap_or_else(|| defaults.get(self.tier).clone()),
            source,
        };
        self.finish(option, resolved)
    }

    /// Resolve an option with a single global default
    pub fn resolve_or<T: Clone + Serialize>(
        &mut self,
        option: &str,
        explicit: Option<T>,
        fallback: T,
    ) -> T {
        let resolved = match explicit {
            Some(value) => Resolved {
                value,
                source: ConfigSource::Explicit,
            },
            None => Resolved {
                value: fallback,
                source: ConfigSource::HardFallback,
            },
        };
        self.finish(option, resolved)
    }

    /// Resolve an option through every layer, failing if none applies
    pub fn resolve_layers<T: Clone + Serialize>(
        &mut self,
        option: &str,
        explicit: Option<T>,
        defaults: Option<&TierTable<T>>,
        fallback: Option<T>,
    ) -> BlueprintResult<T> {
        let resolved = resolve(option, explicit, defaults, self.tier, fallback)?;
        Ok(self.finish(option, resolved))
    }

    pub fn effective(&self) -> &EffectiveConfig {
        &self.effective
    }

    pub fn into_effective(self) -> EffectiveConfig {
        self.effective
    }

    fn finish<T: Serialize>(&mut self, option: &str, resolved: Resolved<T>) -> T {
        debug!(
            option,
            tier = %self.tier,
            source = ?resolved.source,
            "resolved configuration option"
        );
        self.effective.record(option, &resolved);
        resolved.value
    }
}
