// Copyright (c) 2025 - Cowboy AI, Inc.
//! Canonical Tag Sets
//!
//! Every resource a blueprint owns carries the same [`TagSet`]. Propagation
//! goes through the [`Taggable`] seam so nested resources are never skipped.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use super::ServiceIdentity;

/// Value of the `ManagedBy` tag on everything this crate declares
pub const MANAGED_BY: &str = "cim-blueprints";

pub const TAG_SERVICE: &str = "Service";
pub const TAG_ENVIRONMENT: &str = "Environment";
pub const TAG_MANAGED_BY: &str = "ManagedBy";
pub const TAG_TEAM: &str = "Team";
pub const TAG_COST_CENTER: &str = "CostCenter";

/// Insertion-ordered tag mapping with last-write-wins inserts
///
/// Overwriting a key keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    entries: Vec<(String, String)>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a tag
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Overlay another tag set, its values winning
    pub fn extend(&mut self, other: &TagSet) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Add the tags of `other` whose keys are not set yet
    pub fn fill_missing(&mut self, other: &TagSet) {
        for (key, value) in other.iter() {
            if !self.contains_key(key) {
                self.entries.push((key.to_string(), value.to_string()));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = TagSet::new();
        for (key, value) in iter {
            tags.insert(key, value);
        }
        tags
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // JSON objects carry no reliable order; sort for determinism
        let entries = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

/// Build the canonical tag set for an identity
///
/// Mandatory `Service`, `Environment`, `ManagedBy`; then `Team` and
/// `CostCenter` when present; then `additional`, overwriting on collision.
pub fn derive_tags(identity: &ServiceIdentity, additional: Option<&TagSet>) -> TagSet {
    let mut tags = TagSet::new();
    tags.insert(TAG_SERVICE, identity.service_name.as_str());
    tags.insert(TAG_ENVIRONMENT, identity.environment.as_str());
    tags.insert(TAG_MANAGED_BY, MANAGED_BY);

    if let Some(team) = identity.team.as_deref().filter(|t| !t.is_empty()) {
        tags.insert(TAG_TEAM, team);
    }
    if let Some(cost_center) = identity.cost_center.as_deref().filter(|c| !c.is_empty()) {
        tags.insert(TAG_COST_CENTER, cost_center);
    }

    if let Some(additional) = additional {
        tags.extend(additional);
    }

    tags
}

/// Tag-application seam
///
/// Implementations must tag themselves and every resource nested under them.
pub trait Taggable {
    fn apply_tags(&mut self, tags: &TagSet);
}

impl<T: Taggable> Taggable for Vec<T> {
    fn apply_tags(&mut self, tags: &TagSet) {
        for item in self.iter_mut() {
            item.apply_tags(tags);
        }
    }
}

impl<T: Taggable> Taggable for Option<T> {
    fn apply_tags(&mut self, tags: &TagSet) {
        if let Some(item) = self {
            item.apply_tags(tags);
        }
    }
}
