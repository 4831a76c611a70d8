// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Declarations
//!
//! Immutable descriptions of resources to be provisioned. Declarations
//! reference each other by name only, so each one can be handed to a
//! provisioner independently.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::gateway::GatewayDeclaration;
use super::{
    NetworkContext, ResourceKind, ResourceName, SubnetSelection, TagSet, Taggable,
};
use crate::config::defaults::AlarmThresholds;
use crate::config::EffectiveConfig;

/// What happens to a resource when its owning stack is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    Retain,
    Destroy,
}

/// Log/trace destination owned by a compute unit or gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDestinationDeclaration {
    /// Destination path, e.g. `/aws/lambda/orders-prod`
    pub name: String,
    pub retention_days: u32,
    pub removal_policy: RemovalPolicy,
    pub tags: TagSet,
}

impl Taggable for LogDestinationDeclaration {
    fn apply_tags(&mut self, tags: &TagSet) {
        self.tags.extend(tags);
    }
}

/// Container cluster declared for a scalable service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterDeclaration {
    pub name: ResourceName,
    pub container_insights: bool,
    /// Identifier of the network the cluster lives in
    pub network_id: String,
    pub tags: TagSet,
}

impl Taggable for ClusterDeclaration {
    fn apply_tags(&mut self, tags: &TagSet) {
        self.tags.extend(tags);
    }
}

/// Discriminator between the two deployable compute shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputeKind {
    ScalableService,
    Function,
}

impl ComputeKind {
    pub fn resource_kind(&self) -> ResourceKind {
        match self {
            Self::ScalableService => ResourceKind::ScalableService,
            Self::Function => ResourceKind::Function,
        }
    }
}

impl Default for ComputeKind {
    fn default() -> Self {
        Self::Function
    }
}

/// Resource limits of a compute unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ResourceLimits {
    Container { cpu_units: u32, memory_mib: u32 },
    Function { memory_mb: u32, timeout_secs: u32 },
}

/// Instruction set for function code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    Arm64,
    X86_64,
}

impl Default for Architecture {
    fn default() -> Self {
        Self::Arm64
    }
}

/// Function-specific runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRuntime {
    pub code_path: String,
    pub handler: String,
    pub runtime: String,
    pub architecture: Architecture,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_concurrency: Option<u32>,
    pub retry_attempts: u32,
    pub powertools_enabled: bool,
    pub description: String,
}

/// Container health check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub path: String,
    pub command: Vec<String>,
    pub interval_secs: u32,
    pub timeout_secs: u32,
    pub retries: u32,
    pub start_period_secs: u32,
    pub healthy_threshold: u32,
    pub unhealthy_threshold: u32,
}

/// Target-tracking auto scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingPolicy {
    pub min_capacity: u32,
    pub max_capacity: u32,
    pub target_cpu_utilization: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_memory_utilization: Option<u32>,
    pub scale_in_cooldown_secs: u32,
    pub scale_out_cooldown_secs: u32,
}

/// Cluster a scalable service runs in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "name", rename_all = "snake_case")]
pub enum ClusterRef {
    /// Caller-supplied cluster, not declared here
    Existing(String),
    /// Cluster declared by the same blueprint
    Declared(ResourceName),
}

/// Scalable-service-specific runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRuntime {
    pub image: String,
    pub container_port: u16,
    pub cluster: ClusterRef,
    pub health_check: HealthCheck,
    pub scaling: ScalingPolicy,
    pub public_load_balancer: bool,
    pub execute_command: bool,
    pub circuit_breaker_rollback: bool,
}

/// Kind-specific part of a compute unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitRuntime {
    ScalableService(ServiceRuntime),
    Function(FunctionRuntime),
}

/// Network placement of a compute unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAttachment {
    pub context: NetworkContext,
    pub subnets: SubnetSelection,
}

/// Tracing and alarm settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observability {
    pub tracing_enabled: bool,
    pub log_level: String,
    pub alarm_thresholds: AlarmThresholds,
}

/// Effect of an authorization grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantEffect {
    Allow,
    Deny,
}

/// Extra permission attached to a compute unit's execution role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationGrant {
    pub effect: GrantEffect,
    pub actions: Vec<String>,
    pub resources: Vec<String>,
}

impl AuthorizationGrant {
    pub fn allow(
        actions: impl IntoIterator<Item = impl Into<String>>,
        resources: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            effect: GrantEffect::Allow,
            actions: actions.into_iter().map(Into::into).collect(),
            resources: resources.into_iter().map(Into::into).collect(),
        }
    }
}

/// One deployable unit of compute, fully resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeUnitDeclaration {
    pub name: ResourceName,
    pub limits: ResourceLimits,
    pub runtime: UnitRuntime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkAttachment>,
    pub environment: BTreeMap<String, String>,
    pub observability: Observability,
    /// Name of the owning log destination
    pub log_destination: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grants: Vec<AuthorizationGrant>,
    pub tags: TagSet,
    pub effective_config: EffectiveConfig,
}

impl ComputeUnitDeclaration {
    pub fn kind(&self) -> ComputeKind {
        match self.runtime {
            UnitRuntime::ScalableService(_) => ComputeKind::ScalableService,
            UnitRuntime::Function(_) => ComputeKind::Function,
        }
    }
}

impl Taggable for ComputeUnitDeclaration {
    fn apply_tags(&mut self, tags: &TagSet) {
        self.tags.extend(tags);
    }
}

/// Any declaration a blueprint hands to a provisioner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resource", rename_all = "snake_case")]
pub enum ResourceDeclaration {
    LogDestination(LogDestinationDeclaration),
    Cluster(ClusterDeclaration),
    ComputeUnit(Box<ComputeUnitDeclaration>),
    Gateway(Box<GatewayDeclaration>),
}

impl ResourceDeclaration {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::LogDestination(_) => ResourceKind::LogDestination,
            Self::Cluster(_) => ResourceKind::Cluster,
            Self::ComputeUnit(unit) => unit.kind().resource_kind(),
            Self::Gateway(_) => ResourceKind::Gateway,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::LogDestination(log) => &log.name,
            Self::Cluster(cluster) => cluster.name.as_str(),
            Self::ComputeUnit(unit) => unit.name.as_str(),
            Self::Gateway(gateway) => gateway.name.as_str(),
        }
    }

    pub fn tags(&self) -> &TagSet {
        match self {
            Self::LogDestination(log) => &log.tags,
            Self::Cluster(cluster) => &cluster.tags,
            Self::ComputeUnit(unit) => &unit.tags,
            Self::Gateway(gateway) => &gateway.tags,
        }
    }

    /// Stable identifier known before provisioning: `<kind>/<name>`
    pub fn logical_id(&self) -> String {
        format!("{}/{}", self.kind().as_str(), self.name())
    }
}

impl Taggable for ResourceDeclaration {
    fn apply_tags(&mut self, tags: &TagSet) {
        match self {
            Self::LogDestination(log) => log.apply_tags(tags),
            Self::Cluster(cluster) => cluster.apply_tags(tags),
            Self::ComputeUnit(unit) => unit.apply_tags(tags),
            Self::Gateway(gateway) => gateway.apply_tags(tags),
        }
    }
}
