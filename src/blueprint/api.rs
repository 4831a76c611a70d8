// Copyright (c) 2025 - Cowboy AI, Inc.
//! API Blueprint
//!
//! A routed API surface: one gateway, one access log destination, and one
//! compute unit per declared endpoint. Endpoint paths are folded into a
//! [`PathTree`] so shared prefixes become shared resources.
//!
//! ```text
//! GET  /orders            ─┐
//! POST /orders             ├─→ /orders ─→ /orders/{id}
//! GET  /orders/{id}       ─┘        │           │
//!                                   ▼           ▼
//!                           orders-api-get-orders  orders-api-get-orders-id
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use super::{Blueprint, BlueprintContext, ComputeSpec, ComputeUnitBlueprint};
use crate::config::defaults::{self, CorsDefault};
use crate::config::{ConfigResolver, EffectiveConfig};
use crate::discovery::NetworkResolver;
use crate::domain::{
    derive_name, derive_tags, ApiKeySource, CorsPolicy, GatewayDeclaration,
    LogDestinationDeclaration, MethodBinding, PolicyGap, ResourceDeclaration, ResourceKind,
    ResourceName, ServiceIdentity, StageSettings, TagSet, Taggable,
};
use crate::errors::{BlueprintError, BlueprintResult};
use crate::tree::{self, PathTree};

/// One endpoint of the API and the compute unit behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDeclaration {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub compute: ComputeSpec,
}

impl EndpointDeclaration {
    pub fn new(method: impl Into<String>, path: impl Into<String>, compute: ComputeSpec) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            compute,
        }
    }

    /// Normalized `METHOD /path` key
    pub fn key(&self) -> String {
        endpoint_key(&self.method, &self.path)
    }
}

/// Gateway-level overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayPolicy {
    pub description: Option<String>,
    pub rate_limit: Option<u32>,
    pub burst_limit: Option<u32>,
    pub enable_cors: Option<bool>,
    pub cors_origins: Option<Vec<String>>,
    pub require_api_key: Option<bool>,
    pub stage_name: Option<String>,
    pub tags: Option<TagSet>,
}

/// `METHOD /normalized/path`
pub fn endpoint_key(method: &str, path: &str) -> String {
    format!("{} {}", method.to_ascii_uppercase(), tree::normalize_path(path))
}

/// Service name of the unit behind an endpoint
///
/// `<service>-<method>-<segment>...`, braces stripped, `root` for `/`.
pub fn endpoint_service_name(service: &str, method: &str, path: &str) -> String {
    let mut name = format!("{service}-{}", method.to_ascii_lowercase());
    let mut segments = tree::segments(path).peekable();
    if segments.peek().is_none() {
        name.push_str("-root");
    }
    for segment in segments {
        name.push('-');
        name.extend(segment.chars().filter(|c| *c != '{' && *c != '}'));
    }
    name
}

/// A composed API surface
#[derive(Debug, Clone)]
pub struct ApiBlueprint {
    identity: ServiceIdentity,
    tree: PathTree,
    access_log: LogDestinationDeclaration,
    gateway: GatewayDeclaration,
    units: Vec<ComputeUnitBlueprint>,
    by_endpoint: BTreeMap<String, usize>,
    effective: EffectiveConfig,
}

impl ApiBlueprint {
    pub fn new(
        identity: ServiceIdentity,
        endpoints: &[EndpointDeclaration],
        policy: &GatewayPolicy,
        ctx: BlueprintContext<'_>,
    ) -> BlueprintResult<Self> {
        reject_duplicates(endpoints)?;

        let tier = identity.environment;
        let name = derive_name(&identity, Some("api"), ctx.name_policy)?;
        let mut config = ConfigResolver::new(tier);

        let tree = PathTree::build(endpoints.iter().map(|endpoint| endpoint.path.as_str()));

        let access_log = LogDestinationDeclaration {
            name: format!("/aws/apigateway/{name}/access-logs"),
            retention_days: config.resolve(
                "access_log_retention_days",
                None,
                &defaults::ACCESS_LOG_RETENTION_DAYS,
            ),
            removal_policy: config.resolve("removal_policy", None, &defaults::REMOVAL_POLICY),
            tags: TagSet::new(),
        };

        let stage = StageSettings {
            name: config.resolve_or("stage_name", policy.stage_name.clone(), tier.to_string()),
            rate_limit: config.resolve_or("rate_limit", policy.rate_limit, defaults::DEFAULT_RATE_LIMIT),
            burst_limit: config.resolve_or("burst_limit", policy.burst_limit, defaults::DEFAULT_BURST_LIMIT),
            tracing_enabled: config.resolve("tracing_enabled", None, &defaults::TRACING_ENABLED),
            metrics_enabled: true,
            access_log_destination: access_log.name.clone(),
        };

        let require_api_key = config.resolve_or("require_api_key", policy.require_api_key, false);
        let mut policy_gaps = Vec::new();
        let cors = if config.resolve_or("enable_cors", policy.enable_cors, true) {
            let origins = defaults::CORS_DEFAULT.map(|default| match default {
                CorsDefault::Wildcard => vec![defaults::CORS_WILDCARD.to_string()],
                CorsDefault::ExplicitRequired => Vec::new(),
            });
            let allow_origins = config.resolve("cors_origins", policy.cors_origins.clone(), &origins);
            if allow_origins.is_empty() {
                warn!(api = %name, tier = %tier, "CORS enabled without an origin list");
                policy_gaps.push(PolicyGap::CorsOriginsRequired);
            }
            Some(CorsPolicy {
                allow_origins,
                allow_methods: defaults::CORS_ALLOW_METHODS.iter().map(|m| m.to_string()).collect(),
                allow_headers: defaults::CORS_ALLOW_HEADERS.iter().map(|h| h.to_string()).collect(),
            })
        } else {
            None
        };

        let mut network = NetworkResolver::new(ctx.discovery);
        let mut units = Vec::with_capacity(endpoints.len());
        let mut methods = Vec::with_capacity(endpoints.len());
        let mut by_endpoint = BTreeMap::new();
        let mut unit_names: BTreeMap<ResourceName, String> = BTreeMap::new();

        for endpoint in endpoints {
            let key = endpoint.key();
            let unit_identity = identity.renamed(endpoint_service_name(
                &identity.service_name,
                &endpoint.method,
                &endpoint.path,
            ));
            let unit = ComputeUnitBlueprint::compose(unit_identity, &endpoint.compute, ctx, &mut network)?;

            if let Some(previous) = unit_names.insert(unit.name().clone(), key.clone()) {
                return Err(BlueprintError::Configuration(format!(
                    "endpoints '{previous}' and '{key}' both derive compute unit name '{}'",
                    unit.name()
                )));
            }

            methods.push(MethodBinding {
                method: endpoint.method.to_ascii_uppercase(),
                path: tree::normalize_path(&endpoint.path),
                compute_unit: unit.name().clone(),
                api_key_required: require_api_key,
                proxy_integration: true,
            });
            by_endpoint.insert(key, units.len());
            units.push(unit);
        }

        let gateway = GatewayDeclaration {
            name,
            description: policy
                .description
                .clone()
                .unwrap_or_else(|| format!("{} API - {}", identity.service_name, tier)),
            stage,
            cors,
            api_key_source: require_api_key.then_some(ApiKeySource::Header),
            resources: tree.resources(),
            methods,
            policy_gaps,
            tags: TagSet::new(),
        };

        let mut blueprint = Self {
            identity,
            tree,
            access_log,
            gateway,
            units,
            by_endpoint,
            effective: config.into_effective(),
        };
        blueprint.tag_resources(policy.tags.as_ref());

        info!(
            api = %blueprint.gateway.name,
            tier = %tier,
            endpoints = blueprint.units.len(),
            resources = blueprint.tree.node_count(),
            "composed api"
        );
        Ok(blueprint)
    }

    pub fn name(&self) -> &ResourceName {
        &self.gateway.name
    }

    /// Stable identifier of the gateway: `gateway/<name>`
    pub fn logical_id(&self) -> String {
        format!("{}/{}", ResourceKind::Gateway.as_str(), self.gateway.name)
    }

    pub fn stage_name(&self) -> &str {
        &self.gateway.stage.name
    }

    pub fn gateway(&self) -> &GatewayDeclaration {
        &self.gateway
    }

    pub fn access_log(&self) -> &LogDestinationDeclaration {
        &self.access_log
    }

    pub fn tree(&self) -> &PathTree {
        &self.tree
    }

    pub fn policy_gaps(&self) -> &[PolicyGap] {
        &self.gateway.policy_gaps
    }

    /// Gateway options with provenance
    pub fn effective_config(&self) -> &EffectiveConfig {
        &self.effective
    }

    /// Compute units in endpoint declaration order
    pub fn compute_units(&self) -> &[ComputeUnitBlueprint] {
        &self.units
    }

    /// Compute unit backing `method path`; both are normalized
    pub fn compute_unit(&self, method: &str, path: &str) -> Option<&ComputeUnitBlueprint> {
        self.by_endpoint
            .get(&endpoint_key(method, path))
            .and_then(|&index| self.units.get(index))
    }

    /// `METHOD /path` keys, sorted
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.by_endpoint.keys().map(String::as_str)
    }
}

impl ApiBlueprint {
    /// Tag the gateway resources, then each unit
    ///
    /// A unit keeps the tags it already carries; it inherits only the API
    /// tags it lacks. Caller tags still win everywhere.
    fn tag_resources(&mut self, additional: Option<&TagSet>) {
        let api_tags = derive_tags(&self.identity, additional);
        self.access_log.apply_tags(&api_tags);
        self.gateway.apply_tags(&api_tags);

        let inherited = derive_tags(&self.identity, None);
        for unit in &mut self.units {
            let mut tags = unit.unit().tags.clone();
            tags.fill_missing(&inherited);
            if let Some(additional) = additional {
                tags.extend(additional);
            }
            unit.apply_tags(&tags);
        }
    }
}

fn reject_duplicates(endpoints: &[EndpointDeclaration]) -> BlueprintResult<()> {
    let mut seen = std::collections::BTreeSet::new();
    for endpoint in endpoints {
        if !seen.insert(endpoint.key()) {
            return Err(BlueprintError::DuplicateEndpoint {
                method: endpoint.method.to_ascii_uppercase(),
                path: tree::normalize_path(&endpoint.path),
            });
        }
    }
    Ok(())
}

impl Taggable for ApiBlueprint {
    fn apply_tags(&mut self, tags: &TagSet) {
        self.access_log.apply_tags(tags);
        self.gateway.apply_tags(tags);
        for unit in &mut self.units {
            unit.apply_tags(tags);
        }
    }
}

impl Blueprint for ApiBlueprint {
    fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    fn declarations(&self) -> Vec<ResourceDeclaration> {
        let mut declarations = vec![ResourceDeclaration::LogDestination(self.access_log.clone())];
        for unit in &self.units {
            declarations.extend(unit.declarations());
        }
        declarations.push(ResourceDeclaration::Gateway(Box::new(self.gateway.clone())));
        declarations
    }
}
