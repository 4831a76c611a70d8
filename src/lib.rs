// Copyright (c) 2025 - Cowboy AI, Inc.
//! Blueprint composition for the Composable Information Machine
//!
//! Turns high-level service intents ("a web API with these endpoints", "a
//! scalable container service", "an invokable function") into complete,
//! named, tagged and interconnected resource declarations, ready to hand to
//! a provisioning backend.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  blueprint: ComputeUnitBlueprint, ApiBlueprint           │
//! └───────┬──────────────┬──────────────┬──────────────┬─────┘
//!         │              │              │              │
//!   ┌─────▼─────┐  ┌─────▼─────┐  ┌─────▼─────┐  ┌─────▼─────┐
//!   │  config   │  │  domain   │  │ discovery │  │   tree    │
//!   │ (layered  │  │ (names,   │  │ (network  │  │ (path     │
//!   │ defaults) │  │  tags)    │  │ resolver) │  │ resources)│
//!   └───────────┘  └───────────┘  └───────────┘  └───────────┘
//!                         │
//!                  ResourceDeclaration
//!                         │
//!              ┌──────────▼──────────┐
//!              │ provision / nats    │
//!              └─────────────────────┘
//! ```
//!
//! Composition is synchronous and pure apart from a single network
//! discovery call; provisioning is the only async step.
//!
//! # Example
//!
//! ```rust
//! use cim_blueprints::blueprint::{
//!     ApiBlueprint, Blueprint, BlueprintContext, ComputeSpec, EndpointDeclaration, GatewayPolicy,
//! };
//! use cim_blueprints::discovery::StaticInventory;
//! use cim_blueprints::domain::{EnvironmentTier, ServiceIdentity};
//!
//! let inventory = StaticInventory::default();
//! let endpoints = vec![
//!     EndpointDeclaration::new("GET", "/orders", ComputeSpec::function("dist/list")),
//!     EndpointDeclaration::new("POST", "/orders", ComputeSpec::function("dist/create")),
//! ];
//! let api = ApiBlueprint::new(
//!     ServiceIdentity::new("orders", EnvironmentTier::Dev),
//!     &endpoints,
//!     &GatewayPolicy::default(),
//!     BlueprintContext::new(&inventory),
//! )
//! .unwrap();
//!
//! assert_eq!(api.name().as_str(), "orders-dev-api");
//! assert!(api.compute_unit("POST", "/orders").is_some());
//! assert_eq!(api.declarations().len(), 6);
//! ```

pub mod blueprint;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod errors;
pub mod nats;
pub mod provision;
pub mod subjects;
pub mod tree;

// Re-export commonly used types
pub use blueprint::{
    ApiBlueprint, Blueprint, BlueprintContext, ComputeSpec, ComputeUnitBlueprint,
    EndpointDeclaration, GatewayPolicy,
};
pub use config::{ConfigResolver, ConfigSource, EffectiveConfig};
pub use discovery::{DiscoveryOutcome, NetworkDiscovery, NetworkQuery, NetworkResolver, StaticInventory};
pub use domain::{EnvironmentTier, ResourceDeclaration, ServiceIdentity, TagSet, Taggable};
pub use errors::{BlueprintError, BlueprintResult, ProvisioningError, ProvisioningResult};
pub use nats::{NatsConfig, NatsProvisioner};
pub use provision::{provision_all, InMemoryProvisioner, Provisioner, ResourceHandle};
pub use tree::PathTree;
