// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Layered Configuration

use cim_blueprints::config::{resolve, ConfigSource};
use cim_blueprints::domain::{EnvironmentTier, TierTable};
use proptest::prelude::*;

fn tier() -> impl Strategy<Value = EnvironmentTier> {
    prop::sample::select(EnvironmentTier::ALL.to_vec())
}

fn table() -> impl Strategy<Value = TierTable<u32>> {
    (any::<u32>(), any::<u32>(), any::<u32>())
        .prop_map(|(dev, staging, prod)| TierTable::new(dev, staging, prod))
}

proptest! {
    /// Property: without an override the tier value is returned exactly
    #[test]
    fn prop_tier_default_exact(table in table(), tier in tier(), fallback in any::<Option<u32>>()) {
        let resolved = resolve("option", None, Some(&table), tier, fallback).unwrap();
        prop_assert_eq!(resolved.value, *table.get(tier));
        prop_assert_eq!(resolved.source, ConfigSource::TierDefault);
    }

    /// Property: an override wins regardless of tier
    #[test]
    fn prop_explicit_wins(table in table(), tier in tier(), explicit in any::<u32>()) {
        let resolved = resolve("option", Some(explicit), Some(&table), tier, None).unwrap();
        prop_assert_eq!(resolved.value, explicit);
        prop_assert_eq!(resolved.source, ConfigSource::Explicit);
    }

    /// Property: the fallback is used only without a table
    #[test]
    fn prop_fallback_only_without_table(tier in tier(), fallback in any::<u32>()) {
        let resolved = resolve::<u32>("option", None, None, tier, Some(fallback)).unwrap();
        prop_assert_eq!(resolved.value, fallback);
        prop_assert_eq!(resolved.source, ConfigSource::HardFallback);
    }
}
