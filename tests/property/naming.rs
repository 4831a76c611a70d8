// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Names and Tags

use cim_blueprints::domain::{
    derive_name, derive_tags, DnsLabelPolicy, EnvironmentTier, ServiceIdentity, TagSet,
};
use proptest::prelude::*;

fn tier() -> impl Strategy<Value = EnvironmentTier> {
    prop::sample::select(EnvironmentTier::ALL.to_vec())
}

fn has_tier_segment(name: &str) -> bool {
    name.split('-')
        .any(|segment| EnvironmentTier::ALL.iter().any(|tier| tier.as_str() == segment))
}

/// Hyphenated service names without a standalone tier segment
fn service_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}(-[a-z0-9]{1,6}){0,2}"
        .prop_filter("tier segment", |name| !has_tier_segment(name))
}

fn suffix() -> impl Strategy<Value = Option<String>> {
    prop::option::of(
        "[a-z0-9]{1,6}(-[a-z0-9]{1,6})?".prop_filter("tier segment", |s| !has_tier_segment(s)),
    )
}

fn tier_segment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["dev", "staging", "prod"])
}

proptest! {
    /// Property: naming is idempotent
    #[test]
    fn prop_derive_name_is_deterministic(name in service_name(), tier in tier(), suffix in suffix()) {
        let identity = ServiceIdentity::new(name, tier);
        let first = derive_name(&identity, suffix.as_deref(), &DnsLabelPolicy);
        let second = derive_name(&identity, suffix.as_deref(), &DnsLabelPolicy);
        prop_assert_eq!(first, second);
    }

    /// Property: distinct (service, tier, suffix) triples never collide
    #[test]
    fn prop_derive_name_is_injective(
        a in (service_name(), tier(), suffix()),
        b in (service_name(), tier(), suffix()),
    ) {
        prop_assume!(a != b);
        let name_a = derive_name(&ServiceIdentity::new(a.0.clone(), a.1), a.2.as_deref(), &DnsLabelPolicy);
        let name_b = derive_name(&ServiceIdentity::new(b.0.clone(), b.1), b.2.as_deref(), &DnsLabelPolicy);
        prop_assert!(name_a.is_ok() && name_b.is_ok());
        prop_assert_ne!(name_a.ok(), name_b.ok());
    }

    /// Property: a tier segment in the service name or suffix is refused
    #[test]
    fn prop_tier_segment_is_refused(
        prefix in "[a-z]{1,6}",
        token in tier_segment(),
        tier in tier(),
        in_suffix in any::<bool>(),
    ) {
        let segmented = format!("{prefix}-{token}");
        let result = if in_suffix {
            derive_name(&ServiceIdentity::new(prefix, tier), Some(segmented.as_str()), &DnsLabelPolicy)
        } else {
            derive_name(&ServiceIdentity::new(segmented, tier), None, &DnsLabelPolicy)
        };
        prop_assert!(result.is_err());
    }

    /// Property: mandatory tags are always present
    #[test]
    fn prop_mandatory_tags_present(
        name in service_name(),
        tier in tier(),
        team in prop::option::of("[a-z]{1,8}"),
    ) {
        let mut identity = ServiceIdentity::new(name.clone(), tier);
        identity.team = team.clone();
        let tags = derive_tags(&identity, None);

        prop_assert_eq!(tags.get("Service"), Some(name.as_str()));
        prop_assert_eq!(tags.get("Environment"), Some(tier.as_str()));
        prop_assert_eq!(tags.get("ManagedBy"), Some("cim-blueprints"));
        prop_assert_eq!(tags.get("Team"), team.as_deref());
    }

    /// Property: additional tags overwrite mandatory ones
    #[test]
    fn prop_additional_tags_win(name in service_name(), value in "[a-z]{1,8}") {
        let identity = ServiceIdentity::new(name, EnvironmentTier::Dev);
        let additional: TagSet = [("Service", value.as_str())].into_iter().collect();
        let tags = derive_tags(&identity, Some(&additional));

        prop_assert_eq!(tags.get("Service"), Some(value.as_str()));
        prop_assert_eq!(tags.keys().next(), Some("Service"));
    }
}
