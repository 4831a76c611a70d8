// Copyright (c) 2025 - Cowboy AI, Inc.
//! Blueprints
//!
//! A blueprint turns a high-level intent plus optional overrides into a
//! complete, named, tagged set of [`ResourceDeclaration`]s. Composition is
//! synchronous and all-or-nothing: it either returns every declaration or a
//! single [`BlueprintError`](crate::errors::BlueprintError).
//!
//! - [`ComputeUnitBlueprint`] - one scalable service or invokable function
//! - [`ApiBlueprint`] - a routed API with one compute unit per endpoint

pub mod api;
pub mod compute;

pub use api::{ApiBlueprint, EndpointDeclaration, GatewayPolicy};
pub use compute::{ComputeSpec, ComputeUnitBlueprint, FunctionSettings, ServiceSettings};

use crate::discovery::NetworkDiscovery;
use crate::domain::{
    DnsLabelPolicy, NamePolicy, NetworkContext, ResourceDeclaration, ServiceIdentity, Taggable,
};

/// Common surface of every blueprint
pub trait Blueprint: Taggable {
    fn identity(&self) -> &ServiceIdentity;

    /// Declarations in dependency order: referenced resources come first
    fn declarations(&self) -> Vec<ResourceDeclaration>;
}

/// Collaborators a blueprint composes against
///
/// Only the shared network context crosses blueprint boundaries, and it is
/// borrowed read-only.
#[derive(Clone, Copy)]
pub struct BlueprintContext<'a> {
    pub discovery: &'a dyn NetworkDiscovery,
    pub shared_network: Option<&'a NetworkContext>,
    pub name_policy: &'a dyn NamePolicy,
}

impl<'a> BlueprintContext<'a> {
    pub fn new(discovery: &'a dyn NetworkDiscovery) -> Self {
        Self {
            discovery,
            shared_network: None,
            name_policy: &DnsLabelPolicy,
        }
    }

    pub fn with_shared_network(mut self, network: &'a NetworkContext) -> Self {
        self.shared_network = Some(network);
        self
    }

    pub fn with_name_policy(mut self, policy: &'a dyn NamePolicy) -> Self {
        self.name_policy = policy;
        self
    }
}
