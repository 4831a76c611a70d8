// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compute Unit Blueprint
//!
//! Composes configuration resolution, naming, tagging and (when asked for)
//! network resolution into one deployable unit: a scalable container
//! service or an invokable function.
//!
//! Every unit owns a log destination. A scalable service also owns a
//! cluster unless it is pointed at an existing one.
//!
//! # Example
//!
//! ```rust
//! use cim_blueprints::blueprint::{BlueprintContext, ComputeSpec, ComputeUnitBlueprint};
//! use cim_blueprints::discovery::StaticInventory;
//! use cim_blueprints::domain::{EnvironmentTier, ResourceLimits, ServiceIdentity};
//!
//! let inventory = StaticInventory::default();
//! let spec = ComputeSpec::function("dist/order-processor");
//! let blueprint = ComputeUnitBlueprint::new(
//!     ServiceIdentity::new("order-processor", EnvironmentTier::Prod),
//!     &spec,
//!     BlueprintContext::new(&inventory),
//! )
//! .unwrap();
//!
//! assert_eq!(blueprint.name().as_str(), "order-processor-prod");
//! assert_eq!(
//!     blueprint.unit().limits,
//!     ResourceLimits::Function { memory_mb: 1024, timeout_secs: 120 }
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use super::{Blueprint, BlueprintContext};
use crate::config::{defaults, ConfigResolver, EffectiveConfig};
use crate::discovery::NetworkResolver;
use crate::domain::{
    derive_name, derive_tags, Architecture, AuthorizationGrant, ClusterDeclaration, ClusterRef,
    ComputeKind, ComputeUnitDeclaration, FunctionRuntime, HealthCheck, LogDestinationDeclaration,
    NetworkAttachment, NetworkContext, NetworkHandle, NetworkLookup, Observability,
    ResourceDeclaration, ResourceLimits, ResourceName, ScalingPolicy, ServiceIdentity,
    ServiceRuntime, SubnetSelection, TagSet, Taggable, UnitRuntime,
};
use crate::errors::{BlueprintError, BlueprintResult};

pub const ENV_SERVICE_NAME: &str = "SERVICE_NAME";
pub const ENV_ENVIRONMENT: &str = "ENVIRONMENT";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_POWERTOOLS_SERVICE_NAME: &str = "POWERTOOLS_SERVICE_NAME";
pub const ENV_POWERTOOLS_METRICS_NAMESPACE: &str = "POWERTOOLS_METRICS_NAMESPACE";

/// Function-only overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionSettings {
    /// Code location; required for functions
    pub code_path: Option<String>,
    pub handler: Option<String>,
    pub runtime: Option<String>,
    pub architecture: Option<Architecture>,
    pub reserved_concurrency: Option<u32>,
    pub powertools_enabled: Option<bool>,
}

/// Scalable-service-only overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Container image; required for services
    pub image: Option<String>,
    pub container_port: Option<u16>,
    pub min_capacity: Option<u32>,
    pub max_capacity: Option<u32>,
    pub target_cpu_utilization: Option<u32>,
    pub target_memory_utilization: Option<u32>,
    pub health_check_path: Option<String>,
    /// Run in this cluster instead of declaring one
    pub existing_cluster: Option<String>,
    pub public_load_balancer: Option<bool>,
    pub execute_command: Option<bool>,
}

/// Caller intent for one compute unit
///
/// Every override is optional; absent means "use the organizational default",
/// which is distinct from explicitly passing the default value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeSpec {
    pub kind: ComputeKind,
    /// Memory in MB (functions) or MiB (services)
    pub memory: Option<u32>,
    pub cpu_units: Option<u32>,
    pub timeout_secs: Option<u32>,
    pub deploy_in_network: Option<bool>,
    /// Explicit network; skips discovery
    pub network: Option<NetworkHandle>,
    pub network_lookup: NetworkLookup,
    pub subnets: Option<SubnetSelection>,
    pub tracing_enabled: Option<bool>,
    pub environment: BTreeMap<String, String>,
    pub grants: Vec<AuthorizationGrant>,
    pub log_retention_days: Option<u32>,
    pub tags: Option<TagSet>,
    pub function: FunctionSettings,
    pub service: ServiceSettings,
}

impl ComputeSpec {
    pub fn function(code_path: impl Into<String>) -> Self {
        Self {
            kind: ComputeKind::Function,
            function: FunctionSettings {
                code_path: Some(code_path.into()),
                ..FunctionSettings::default()
            },
            ..Self::default()
        }
    }

    pub fn scalable_service(image: impl Into<String>) -> Self {
        Self {
            kind: ComputeKind::ScalableService,
            service: ServiceSettings {
                image: Some(image.into()),
                ..ServiceSettings::default()
            },
            ..Self::default()
        }
    }

    pub fn with_memory(mut self, memory: u32) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn in_network(mut self) -> Self {
        self.deploy_in_network = Some(true);
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    fn check_kind_options(&self) -> BlueprintResult<()> {
        let mismatch = match self.kind {
            ComputeKind::Function if self.cpu_units.is_some() => Some("cpu_units"),
            ComputeKind::ScalableService if self.timeout_secs.is_some() => Some("timeout_secs"),
            ComputeKind::ScalableService if self.deploy_in_network == Some(false) => {
                Some("deploy_in_network=false")
            }
            _ => None,
        };
        match mismatch {
            Some(option) => Err(BlueprintError::Configuration(format!(
                "option '{option}' is not valid for a {:?} unit",
                self.kind
            ))),
            None => Ok(()),
        }
    }
}

/// Kind-specific part resolved before the network is known
struct KindParts {
    limits: ResourceLimits,
    runtime: UnitRuntime,
    retention_days: u32,
    log_destination: String,
    needs_network: bool,
    declared_cluster: Option<(ResourceName, bool)>,
}

/// One composed compute unit plus the resources it owns
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeUnitBlueprint {
    identity: ServiceIdentity,
    unit: ComputeUnitDeclaration,
    log_destination: LogDestinationDeclaration,
    cluster: Option<ClusterDeclaration>,
}

impl ComputeUnitBlueprint {
    /// Compose a unit with its own network resolver
    pub fn new(
        identity: ServiceIdentity,
        spec: &ComputeSpec,
        ctx: BlueprintContext<'_>,
    ) -> BlueprintResult<Self> {
        let mut network = NetworkResolver::new(ctx.discovery);
        Self::compose(identity, spec, ctx, &mut network)
    }

    pub(crate) fn compose(
        identity: ServiceIdentity,
        spec: &ComputeSpec,
        ctx: BlueprintContext<'_>,
        network: &mut NetworkResolver<'_>,
    ) -> BlueprintResult<Self> {
        spec.check_kind_options()?;
        let name = derive_name(&identity, None, ctx.name_policy)?;
        let tier = identity.environment;
        let mut config = ConfigResolver::new(tier);

        let parts = match spec.kind {
            ComputeKind::Function => Self::size_function(&identity, &name, spec, &mut config)?,
            ComputeKind::ScalableService => Self::size_service(&identity, spec, &mut config, ctx)?,
        };

        let tracing_enabled = config.resolve(
            "tracing_enabled",
            spec.tracing_enabled,
            &defaults::TRACING_ENABLED,
        );
        let log_level = config.resolve(
            "log_level",
            spec.environment.get(ENV_LOG_LEVEL).cloned(),
            &defaults::LOG_LEVEL.map(|level| level.to_string()),
        );
        let alarm_thresholds = config.resolve("alarm_thresholds", None, &defaults::ALARM_THRESHOLDS);
        let removal_policy = config.resolve("removal_policy", None, &defaults::REMOVAL_POLICY);

        // discovery only after every required option resolved
        let attachment = if parts.needs_network {
            Some(Self::attach_network(spec, ctx, network)?)
        } else {
            None
        };

        let cluster = match (parts.declared_cluster, &attachment) {
            (Some((cluster_name, container_insights)), Some(attachment)) => Some(ClusterDeclaration {
                name: cluster_name,
                container_insights,
                network_id: attachment.context.handle.id.clone(),
                tags: TagSet::new(),
            }),
            _ => None,
        };

        let log_destination = LogDestinationDeclaration {
            name: parts.log_destination,
            retention_days: parts.retention_days,
            removal_policy,
            tags: TagSet::new(),
        };

        let unit = ComputeUnitDeclaration {
            name,
            limits: parts.limits,
            environment: environment_variables(&identity, &log_level, spec),
            runtime: parts.runtime,
            network: attachment,
            observability: Observability {
                tracing_enabled,
                log_level,
                alarm_thresholds,
            },
            log_destination: log_destination.name.clone(),
            grants: spec.grants.clone(),
            tags: TagSet::new(),
            effective_config: config.into_effective(),
        };

        let mut blueprint = Self {
            identity,
            unit,
            log_destination,
            cluster,
        };
        let tags = derive_tags(&blueprint.identity, spec.tags.as_ref());
        blueprint.apply_tags(&tags);

        info!(
            service = %blueprint.identity.service_name,
            tier = %tier,
            kind = ?spec.kind,
            name = %blueprint.unit.name,
            "composed compute unit"
        );
        Ok(blueprint)
    }

    fn size_function(
        identity: &ServiceIdentity,
        name: &ResourceName,
        spec: &ComputeSpec,
        config: &mut ConfigResolver,
    ) -> BlueprintResult<KindParts> {
        let settings = &spec.function;
        let code_path =
            config.resolve_layers::<String>("code_path", settings.code_path.clone(), None, None)?;
        let memory_mb = config.resolve("memory_mb", spec.memory, &defaults::FUNCTION_MEMORY_MB);
        let timeout_secs =
            config.resolve("timeout_secs", spec.timeout_secs, &defaults::FUNCTION_TIMEOUT_SECS);
        let retention_days = config.resolve(
            "log_retention_days",
            spec.log_retention_days,
            &defaults::FUNCTION_LOG_RETENTION_DAYS,
        );
        let handler = config.resolve_or(
            "handler",
            settings.handler.clone(),
            defaults::DEFAULT_HANDLER.to_string(),
        );
        let runtime = config.resolve_or(
            "runtime",
            settings.runtime.clone(),
            defaults::DEFAULT_RUNTIME.to_string(),
        );
        let architecture =
            config.resolve_or("architecture", settings.architecture, Architecture::default());
        let powertools_enabled =
            config.resolve_or("powertools_enabled", settings.powertools_enabled, true);
        let needs_network = config.resolve_or("deploy_in_network", spec.deploy_in_network, false);

        Ok(KindParts {
            limits: ResourceLimits::Function {
                memory_mb,
                timeout_secs,
            },
            runtime: UnitRuntime::Function(FunctionRuntime {
                code_path,
                handler,
                runtime,
                architecture,
                reserved_concurrency: settings.reserved_concurrency,
                retry_attempts: defaults::FUNCTION_RETRY_ATTEMPTS,
                powertools_enabled,
                description: format!("{} - {}", identity.service_name, identity.environment),
            }),
            retention_days,
            log_destination: format!("/aws/lambda/{name}"),
            needs_network,
            declared_cluster: None,
        })
    }

    fn size_service(
        identity: &ServiceIdentity,
        spec: &ComputeSpec,
        config: &mut ConfigResolver,
        ctx: BlueprintContext<'_>,
    ) -> BlueprintResult<KindParts> {
        let settings = &spec.service;
        let image = config.resolve_layers::<String>("image", settings.image.clone(), None, None)?;
        let cpu_units = config.resolve("cpu_units", spec.cpu_units, &defaults::SERVICE_CPU_UNITS);
        let memory_mib = config.resolve("memory_mib", spec.memory, &defaults::SERVICE_MEMORY_MIB);
        let retention_days = config.resolve(
            "log_retention_days",
            spec.log_retention_days,
            &defaults::SERVICE_LOG_RETENTION_DAYS,
        );

        let container_port = config.resolve_or(
            "container_port",
            settings.container_port,
            defaults::DEFAULT_CONTAINER_PORT,
        );
        let health_check_path = config.resolve_or(
            "health_check_path",
            settings.health_check_path.clone(),
            defaults::DEFAULT_HEALTH_CHECK_PATH.to_string(),
        );

        let min_capacity = config.resolve("min_capacity", settings.min_capacity, &defaults::MIN_CAPACITY);
        let max_capacity = config.resolve("max_capacity", settings.max_capacity, &defaults::MAX_CAPACITY);
        if min_capacity > max_capacity {
            return Err(BlueprintError::Configuration(format!(
                "min_capacity {min_capacity} exceeds max_capacity {max_capacity}"
            )));
        }
        let target_cpu_utilization = config.resolve_layers(
            "target_cpu_utilization",
            settings.target_cpu_utilization,
            Some(&defaults::TARGET_CPU_UTILIZATION),
            Some(defaults::TARGET_CPU_FALLBACK),
        )?;

        let execute_command = config.resolve(
            "execute_command",
            settings.execute_command,
            &defaults::EXECUTE_COMMAND_ENABLED,
        );
        let public_load_balancer =
            config.resolve_or("public_load_balancer", settings.public_load_balancer, false);

        let (cluster, declared_cluster) = match &settings.existing_cluster {
            Some(existing) => (ClusterRef::Existing(existing.clone()), None),
            None => {
                let cluster_name = derive_name(identity, Some("cluster"), ctx.name_policy)?;
                let container_insights = config.resolve(
                    "container_insights",
                    None,
                    &defaults::CONTAINER_INSIGHTS_ENABLED,
                );
                (
                    ClusterRef::Declared(cluster_name.clone()),
                    Some((cluster_name, container_insights)),
                )
            }
        };

        Ok(KindParts {
            limits: ResourceLimits::Container {
                cpu_units,
                memory_mib,
            },
            runtime: UnitRuntime::ScalableService(ServiceRuntime {
                image,
                container_port,
                cluster,
                health_check: HealthCheck {
                    command: vec![
                        "CMD-SHELL".to_string(),
                        format!("curl -f http://localhost:{container_port}{health_check_path} || exit 1"),
                    ],
                    path: health_check_path,
                    interval_secs: defaults::HEALTH_CHECK_INTERVAL_SECS,
                    timeout_secs: defaults::HEALTH_CHECK_TIMEOUT_SECS,
                    retries: defaults::HEALTH_CHECK_RETRIES,
                    start_period_secs: defaults::HEALTH_CHECK_START_PERIOD_SECS,
                    healthy_threshold: defaults::HEALTHY_THRESHOLD,
                    unhealthy_threshold: defaults::UNHEALTHY_THRESHOLD,
                },
                scaling: ScalingPolicy {
                    min_capacity,
                    max_capacity,
                    target_cpu_utilization,
                    target_memory_utilization: settings.target_memory_utilization,
                    scale_in_cooldown_secs: defaults::SCALING_COOLDOWN_SECS,
                    scale_out_cooldown_secs: defaults::SCALING_COOLDOWN_SECS,
                },
                public_load_balancer,
                execute_command,
                circuit_breaker_rollback: true,
            }),
            retention_days,
            log_destination: format!("/ecs/{}/{}", identity.service_name, identity.environment),
            needs_network: true,
            declared_cluster,
        })
    }

    /// Own explicit handle, then the shared context, then discovery
    fn attach_network(
        spec: &ComputeSpec,
        ctx: BlueprintContext<'_>,
        network: &mut NetworkResolver<'_>,
    ) -> BlueprintResult<NetworkAttachment> {
        let context = match (&spec.network, ctx.shared_network) {
            (None, Some(shared)) => shared.clone(),
            (explicit, _) => network.resolve(explicit.as_ref(), &spec.network_lookup)?,
        };
        let subnets = spec.subnets.unwrap_or(context.private_subnets);
        Ok(NetworkAttachment { context, subnets })
    }

    pub fn name(&self) -> &ResourceName {
        &self.unit.name
    }

    pub fn kind(&self) -> ComputeKind {
        self.unit.kind()
    }

    /// `<kind>/<name>`, stable before provisioning
    pub fn logical_id(&self) -> String {
        format!("{}/{}", self.kind().resource_kind().as_str(), self.unit.name)
    }

    pub fn unit(&self) -> &ComputeUnitDeclaration {
        &self.unit
    }

    pub fn log_destination(&self) -> &LogDestinationDeclaration {
        &self.log_destination
    }

    pub fn cluster(&self) -> Option<&ClusterDeclaration> {
        self.cluster.as_ref()
    }

    pub fn network(&self) -> Option<&NetworkContext> {
        self.unit.network.as_ref().map(|attachment| &attachment.context)
    }

    pub fn effective_config(&self) -> &EffectiveConfig {
        &self.unit.effective_config
    }
}

fn environment_variables(
    identity: &ServiceIdentity,
    log_level: &str,
    spec: &ComputeSpec,
) -> BTreeMap<String, String> {
    let mut env = BTreeMap::from([
        (ENV_SERVICE_NAME.to_string(), identity.service_name.clone()),
        (ENV_ENVIRONMENT.to_string(), identity.environment.to_string()),
        (ENV_LOG_LEVEL.to_string(), log_level.to_string()),
    ]);
    if spec.kind == ComputeKind::Function {
        env.insert(ENV_POWERTOOLS_SERVICE_NAME.to_string(), identity.service_name.clone());
        env.insert(ENV_POWERTOOLS_METRICS_NAMESPACE.to_string(), identity.service_name.clone());
    }
    // caller wins
    env.extend(spec.environment.clone());
    env
}

impl Taggable for ComputeUnitBlueprint {
    fn apply_tags(&mut self, tags: &TagSet) {
        self.log_destination.apply_tags(tags);
        self.cluster.apply_tags(tags);
        self.unit.apply_tags(tags);
    }
}

impl Blueprint for ComputeUnitBlueprint {
    fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    fn declarations(&self) -> Vec<ResourceDeclaration> {
        let mut declarations = vec![ResourceDeclaration::LogDestination(self.log_destination.clone())];
        if let Some(cluster) = &self.cluster {
            declarations.push(ResourceDeclaration::Cluster(cluster.clone()));
        }
        declarations.push(ResourceDeclaration::ComputeUnit(Box::new(self.unit.clone())));
        declarations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use crate::discovery::{DiscoveryOutcome, NetworkDiscovery, NetworkQuery, StaticInventory};
    use crate::domain::tags::TAG_SERVICE;
    use crate::domain::{EnvironmentTier, RemovalPolicy};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    struct NoDiscovery;

    impl NetworkDiscovery for NoDiscovery {
        fn find_network(&self, query: &NetworkQuery) -> DiscoveryOutcome {
            panic!("discovery must not be called: {query:?}");
        }
    }

    fn identity(tier: EnvironmentTier) -> ServiceIdentity {
        ServiceIdentity::new("orders", tier).with_team("payments")
    }

    fn inventory() -> StaticInventory {
        StaticInventory::new([
            NetworkHandle::new("vpc-default").provider_default(),
            NetworkHandle::new("vpc-core").named("core"),
        ])
    }

    #[test_case(EnvironmentTier::Dev, 256, 30 ; "dev")]
    #[test_case(EnvironmentTier::Staging, 512, 60 ; "staging")]
    #[test_case(EnvironmentTier::Prod, 1024, 120 ; "prod")]
    fn test_function_tier_sizing(tier: EnvironmentTier, memory_mb: u32, timeout_secs: u32) {
        let blueprint = ComputeUnitBlueprint::new(
            identity(tier),
            &ComputeSpec::function("dist/orders"),
            BlueprintContext::new(&NoDiscovery),
        )
        .unwrap();
        assert_eq!(
            blueprint.unit().limits,
            ResourceLimits::Function {
                memory_mb,
                timeout_secs
            }
        );
        assert_eq!(blueprint.effective_config().source("memory_mb"), Some(ConfigSource::TierDefault));
    }

    #[test]
    fn test_explicit_memory_wins_in_dev() {
        let spec = ComputeSpec::function("dist/orders").with_memory(999);
        let blueprint =
            ComputeUnitBlueprint::new(identity(EnvironmentTier::Dev), &spec, BlueprintContext::new(&NoDiscovery))
                .unwrap();
        assert!(matches!(
            blueprint.unit().limits,
            ResourceLimits::Function { memory_mb: 999, .. }
        ));
        assert_eq!(blueprint.effective_config().source("memory_mb"), Some(ConfigSource::Explicit));
    }

    #[test]
    fn test_function_defaults() {
        let blueprint = ComputeUnitBlueprint::new(
            identity(EnvironmentTier::Staging),
            &ComputeSpec::function("dist/orders"),
            BlueprintContext::new(&NoDiscovery),
        )
        .unwrap();

        let UnitRuntime::Function(runtime) = &blueprint.unit().runtime else {
            panic!("expected a function runtime");
        };
        assert_eq!(runtime.handler, "index.handler");
        assert_eq!(runtime.runtime, "nodejs20.x");
        assert_eq!(runtime.architecture, Architecture::Arm64);
        assert_eq!(runtime.retry_attempts, 2);
        assert!(runtime.powertools_enabled);
        assert_eq!(runtime.description, "orders - staging");

        assert_eq!(blueprint.log_destination().name, "/aws/lambda/orders-staging");
        assert_eq!(blueprint.log_destination().retention_days, 30);
        assert!(blueprint.unit().network.is_none());
        assert!(blueprint.cluster().is_none());
    }

    #[test]
    fn test_function_without_network_opt_in_never_discovers() {
        let spec = ComputeSpec {
            network_lookup: NetworkLookup::by_name("core"),
            ..ComputeSpec::function("dist/orders")
        };
        let blueprint =
            ComputeUnitBlueprint::new(identity(EnvironmentTier::Prod), &spec, BlueprintContext::new(&NoDiscovery))
                .unwrap();
        assert!(blueprint.network().is_none());
    }

    #[test]
    fn test_function_in_network_discovers() {
        let inventory = inventory();
        let spec = ComputeSpec::function("dist/orders").in_network();
        let blueprint =
            ComputeUnitBlueprint::new(identity(EnvironmentTier::Prod), &spec, BlueprintContext::new(&inventory))
                .unwrap();
        let attachment = blueprint.unit().network.as_ref().unwrap();
        assert_eq!(attachment.context.handle.id, "vpc-core");
        assert_eq!(attachment.subnets, SubnetSelection::PRIVATE_WITH_EGRESS);
    }

    #[test]
    fn test_shared_network_used_before_discovery() {
        let shared = NetworkContext::for_handle(NetworkHandle::new("vpc-shared"));
        let ctx = BlueprintContext::new(&NoDiscovery).with_shared_network(&shared);
        let spec = ComputeSpec::function("dist/orders").in_network();
        let blueprint = ComputeUnitBlueprint::new(identity(EnvironmentTier::Dev), &spec, ctx).unwrap();
        assert_eq!(blueprint.network(), Some(&shared));
    }

    #[test]
    fn test_environment_variables_merge_with_caller_winning() {
        let spec = ComputeSpec::function("dist/orders")
            .with_env("LOG_LEVEL", "TRACE")
            .with_env("TABLE", "orders");
        let blueprint =
            ComputeUnitBlueprint::new(identity(EnvironmentTier::Prod), &spec, BlueprintContext::new(&NoDiscovery))
                .unwrap();
        let env = &blueprint.unit().environment;
        assert_eq!(env["SERVICE_NAME"], "orders");
        assert_eq!(env["ENVIRONMENT"], "prod");
        assert_eq!(env["LOG_LEVEL"], "TRACE");
        assert_eq!(env["TABLE"], "orders");
        assert_eq!(env["POWERTOOLS_SERVICE_NAME"], "orders");
        assert_eq!(blueprint.unit().observability.log_level, "TRACE");
    }

    #[test_case(EnvironmentTier::Dev, "DEBUG", false ; "dev")]
    #[test_case(EnvironmentTier::Staging, "DEBUG", true ; "staging")]
    #[test_case(EnvironmentTier::Prod, "INFO", true ; "prod")]
    fn test_observability_by_tier(tier: EnvironmentTier, level: &str, tracing: bool) {
        let blueprint = ComputeUnitBlueprint::new(
            identity(tier),
            &ComputeSpec::function("dist/orders"),
            BlueprintContext::new(&NoDiscovery),
        )
        .unwrap();
        let observability = &blueprint.unit().observability;
        assert_eq!(observability.log_level, level);
        assert_eq!(observability.tracing_enabled, tracing);
        assert_eq!(&observability.alarm_thresholds, defaults::ALARM_THRESHOLDS.get(tier));
    }

    #[test]
    fn test_scalable_service_defaults() {
        let inventory = inventory();
        let blueprint = ComputeUnitBlueprint::new(
            identity(EnvironmentTier::Prod),
            &ComputeSpec::scalable_service("registry.example.com/orders:1.2.0"),
            BlueprintContext::new(&inventory),
        )
        .unwrap();

        assert_eq!(
            blueprint.unit().limits,
            ResourceLimits::Container {
                cpu_units: 256,
                memory_mib: 512
            }
        );
        let UnitRuntime::ScalableService(runtime) = &blueprint.unit().runtime else {
            panic!("expected a service runtime");
        };
        assert_eq!(runtime.container_port, 8080);
        assert_eq!(runtime.scaling.min_capacity, 3);
        assert_eq!(runtime.scaling.max_capacity, 20);
        assert_eq!(runtime.scaling.target_cpu_utilization, 70);
        assert_eq!(runtime.health_check.path, "/health");
        assert_eq!(
            runtime.health_check.command[1],
            "curl -f http://localhost:8080/health || exit 1"
        );
        assert!(!runtime.execute_command);
        assert!(!runtime.public_load_balancer);
        assert!(runtime.circuit_breaker_rollback);

        let cluster = blueprint.cluster().unwrap();
        assert_eq!(cluster.name.as_str(), "orders-prod-cluster");
        assert!(cluster.container_insights);
        assert_eq!(cluster.network_id, "vpc-core");
        assert_eq!(
            runtime.cluster,
            ClusterRef::Declared(cluster.name.clone())
        );

        assert_eq!(blueprint.log_destination().name, "/ecs/orders/prod");
        assert_eq!(blueprint.log_destination().retention_days, 365);
        assert_eq!(blueprint.log_destination().removal_policy, RemovalPolicy::Retain);
    }

    #[test]
    fn test_existing_cluster_is_not_declared() {
        let inventory = inventory();
        let mut spec = ComputeSpec::scalable_service("orders:latest");
        spec.service.existing_cluster = Some("platform-cluster".to_string());
        let blueprint =
            ComputeUnitBlueprint::new(identity(EnvironmentTier::Dev), &spec, BlueprintContext::new(&inventory))
                .unwrap();
        assert!(blueprint.cluster().is_none());
        assert_eq!(blueprint.declarations().len(), 2);

        let UnitRuntime::ScalableService(runtime) = &blueprint.unit().runtime else {
            panic!("expected a service runtime");
        };
        assert_eq!(runtime.cluster, ClusterRef::Existing("platform-cluster".to_string()));
        assert!(runtime.execute_command);
    }

    #[test]
    fn test_missing_image_is_configuration_error() {
        let spec = ComputeSpec {
            kind: ComputeKind::ScalableService,
            ..ComputeSpec::default()
        };
        let err = ComputeUnitBlueprint::new(identity(EnvironmentTier::Dev), &spec, BlueprintContext::new(&NoDiscovery))
            .unwrap_err();
        assert!(matches!(err, BlueprintError::Configuration(ref msg) if msg.contains("image")));
    }

    #[test]
    fn test_inverted_capacity_is_rejected() {
        let mut spec = ComputeSpec::scalable_service("orders:latest");
        spec.service.min_capacity = Some(10);
        spec.service.max_capacity = Some(2);
        let err = ComputeUnitBlueprint::new(identity(EnvironmentTier::Dev), &spec, BlueprintContext::new(&NoDiscovery))
            .unwrap_err();
        assert!(matches!(err, BlueprintError::Configuration(_)));
    }

    #[test]
    fn test_option_for_other_kind_is_rejected() {
        let mut spec = ComputeSpec::function("dist/orders");
        spec.cpu_units = Some(512);
        let err = ComputeUnitBlueprint::new(identity(EnvironmentTier::Dev), &spec, BlueprintContext::new(&NoDiscovery))
            .unwrap_err();
        assert!(matches!(err, BlueprintError::Configuration(ref msg) if msg.contains("cpu_units")));
    }

    #[test]
    fn test_discovery_failure_aborts_composition() {
        let empty = StaticInventory::default();
        let err = ComputeUnitBlueprint::new(
            identity(EnvironmentTier::Prod),
            &ComputeSpec::scalable_service("orders:latest"),
            BlueprintContext::new(&empty),
        )
        .unwrap_err();
        assert!(matches!(err, BlueprintError::NetworkNotFound(_)));
    }

    #[test]
    fn test_invalid_service_name() {
        let err = ComputeUnitBlueprint::new(
            ServiceIdentity::new("", EnvironmentTier::Dev),
            &ComputeSpec::function("dist/orders"),
            BlueprintContext::new(&NoDiscovery),
        )
        .unwrap_err();
        assert!(matches!(err, BlueprintError::InvalidIdentity(_)));
    }

    #[test]
    fn test_tags_reach_every_declaration() {
        let inventory = inventory();
        let mut spec = ComputeSpec::scalable_service("orders:latest");
        spec.tags = Some([("Owner", "ops")].into_iter().collect());
        let blueprint =
            ComputeUnitBlueprint::new(identity(EnvironmentTier::Staging), &spec, BlueprintContext::new(&inventory))
                .unwrap();

        let declarations = blueprint.declarations();
        assert_eq!(declarations.len(), 3);
        for declaration in &declarations {
            let tags = declaration.tags();
            assert_eq!(tags.get(TAG_SERVICE), Some("orders"));
            assert_eq!(tags.get("Team"), Some("payments"));
            assert_eq!(tags.get("Owner"), Some("ops"));
        }
    }

    #[test]
    fn test_logical_id_is_stable() {
        let spec = ComputeSpec::function("dist/orders");
        let build = || {
            ComputeUnitBlueprint::new(identity(EnvironmentTier::Dev), &spec, BlueprintContext::new(&NoDiscovery))
                .unwrap()
        };
        assert_eq!(build().logical_id(), "function/orders-dev");
        assert_eq!(build(), build());
    }
}
