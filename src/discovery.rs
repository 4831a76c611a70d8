// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Discovery and Resolution
//!
//! A blueprint that needs a network either receives a handle from its caller
//! or asks a [`NetworkDiscovery`] collaborator to find one. Discovery never
//! guesses: more than one match is an error, not "take the first".
//!
//! ```text
//! explicit handle ──────────────────────────────┐
//!                                               ▼
//! NetworkLookup ─→ NetworkDiscovery ─→ Found ─→ NetworkContext (+ subnet presets)
//!                                   ├→ NotFound  → BlueprintError::NetworkNotFound
//!                                   └→ Ambiguous → BlueprintError::AmbiguousNetwork
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::domain::{NetworkContext, NetworkHandle, NetworkLookup};
use crate::errors::{BlueprintError, BlueprintResult};

/// Query sent to a discovery collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// Never return the provider's default network
    pub exclude_default: bool,
}

impl From<&NetworkLookup> for NetworkQuery {
    fn from(lookup: &NetworkLookup) -> Self {
        Self {
            id: lookup.id.clone(),
            name: lookup.name.clone(),
            tags: lookup.tags.clone(),
            exclude_default: true,
        }
    }
}

/// Result of a discovery query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    Found(NetworkHandle),
    NotFound,
    Ambiguous(Vec<NetworkHandle>),
}

/// External inventory that can find networks
///
/// A single blocking call with no retry; retries belong to the backend.
pub trait NetworkDiscovery: Send + Sync {
    fn find_network(&self, query: &NetworkQuery) -> DiscoveryOutcome;
}

/// In-memory inventory of known networks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticInventory {
    networks: Vec<NetworkHandle>,
}

impl StaticInventory {
    pub fn new(networks: impl IntoIterator<Item = NetworkHandle>) -> Self {
        Self {
            networks: networks.into_iter().collect(),
        }
    }

    pub fn networks(&self) -> &[NetworkHandle] {
        &self.networks
    }

    fn matches(network: &NetworkHandle, query: &NetworkQuery) -> bool {
        if query.exclude_default && network.is_default {
            return false;
        }
        if let Some(id) = &query.id {
            if &network.id != id {
                return false;
            }
        }
        if let Some(name) = &query.name {
            if network.name.as_ref() != Some(name) {
                return false;
            }
        }
        query
            .tags
            .iter()
            .all(|(key, value)| network.tags.get(key) == Some(value))
    }
}

impl NetworkDiscovery for StaticInventory {
    fn find_network(&self, query: &NetworkQuery) -> DiscoveryOutcome {
        let mut matches: Vec<NetworkHandle> = self
            .networks
            .iter()
            .filter(|network| Self::matches(network, query))
            .cloned()
            .collect();

        match matches.len() {
            0 => DiscoveryOutcome::NotFound,
            1 => DiscoveryOutcome::Found(matches.remove(0)),
            _ => DiscoveryOutcome::Ambiguous(matches),
        }
    }
}

/// Resolves network contexts for one blueprint construction
///
/// Successful discoveries are remembered for the life of this resolver
/// only; create a new resolver for every blueprint invocation.
pub struct NetworkResolver<'a> {
    discovery: &'a dyn NetworkDiscovery,
    resolved: Vec<(NetworkLookup, NetworkContext)>,
}

impl<'a> NetworkResolver<'a> {
    pub fn new(discovery: &'a dyn NetworkDiscovery) -> Self {
        Self {
            discovery,
            resolved: Vec::new(),
        }
    }

    /// Resolve a network context
    ///
    /// An explicit handle is used as-is and discovery is not consulted.
    pub fn resolve(
        &mut self,
        explicit: Option<&NetworkHandle>,
        lookup: &NetworkLookup,
    ) -> BlueprintResult<NetworkContext> {
        if let Some(handle) = explicit {
            debug!(network = %handle.id, "using explicit network handle");
            return Ok(NetworkContext::for_handle(handle.clone()));
        }

        if let Some((_, context)) = self.resolved.iter().find(|(seen, _)| seen == lookup) {
            return Ok(context.clone());
        }

        debug!(%lookup, "discovering network");
        let context = match self.discovery.find_network(&NetworkQuery::from(lookup)) {
            DiscoveryOutcome::Found(handle) => NetworkContext::for_handle(handle),
            DiscoveryOutcome::NotFound => {
                return Err(BlueprintError::NetworkNotFound(lookup.to_string()));
            }
            DiscoveryOutcome::Ambiguous(candidates) => {
                return Err(BlueprintError::AmbiguousNetwork {
                    query: lookup.to_string(),
                    candidates: candidates.into_iter().map(|network| network.id).collect(),
                });
            }
        };

        info!(%lookup, network = %context.handle.id, "discovered network");
        self.resolved.push((lookup.clone(), context.clone()));
        Ok(context)
    }
}
