// Copyright (c) 2025 - Cowboy AI, Inc.
//! Blueprint Domain Models
//!
//! Value objects and declarations shared by every blueprint.
//!
//! # Value Objects
//!
//! - [`EnvironmentTier`] / [`TierTable`] - tier classification and exhaustive default tables
//! - [`ServiceIdentity`] / [`ResourceName`] - service metadata and derived names
//! - [`TagSet`] - ordered canonical tags
//! - [`NetworkContext`] - resolved network plus subnet presets
//! - [`ResourceKind`] - taxonomy of declared resources
//!
//! # Declarations
//!
//! - [`ComputeUnitDeclaration`] - one deployable unit of compute
//! - [`LogDestinationDeclaration`] / [`ClusterDeclaration`] - resources owned by a unit
//! - [`GatewayDeclaration`] - a routed API surface
//! - [`ResourceDeclaration`] - any of the above, as handed to a provisioner

pub mod declaration;
pub mod gateway;
pub mod identity;
pub mod network;
pub mod resource_kind;
pub mod tags;
pub mod tier;

pub use declaration::{
    Architecture, AuthorizationGrant, ClusterDeclaration, ClusterRef, ComputeKind,
    ComputeUnitDeclaration, FunctionRuntime, GrantEffect, HealthCheck, LogDestinationDeclaration,
    NetworkAttachment, Observability, RemovalPolicy, ResourceDeclaration, ResourceLimits,
    ScalingPolicy, ServiceRuntime, UnitRuntime,
};
pub use gateway::{
    ApiKeySource, CorsPolicy, GatewayDeclaration, GatewayResource, MethodBinding, PolicyGap,
    StageSettings,
};
pub use identity::{derive_name, DnsLabelPolicy, NamePolicy, NameViolation, ResourceName, ServiceIdentity};
pub use network::{
    CidrBlock, NetworkContext, NetworkError, NetworkHandle, NetworkLookup, SubnetSelection,
    SubnetType,
};
pub use resource_kind::{ResourceCategory, ResourceKind};
pub use tags::{derive_tags, TagSet, Taggable, MANAGED_BY};
pub use tier::{EnvironmentTier, TierTable};
