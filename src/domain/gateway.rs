// Copyright (c) 2025 - Cowboy AI, Inc.
//! Gateway Declarations
//!
//! The routed API surface: path resources, method bindings to compute
//! units, stage throttling, CORS and access logging.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ResourceName, TagSet, Taggable};

/// Deployment stage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSettings {
    pub name: String,
    pub rate_limit: u32,
    pub burst_limit: u32,
    pub tracing_enabled: bool,
    pub metrics_enabled: bool,
    /// Name of the access log destination
    pub access_log_destination: String,
}

/// Preflight CORS configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsPolicy {
    pub allow_origins: Vec<String>,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
}

impl CorsPolicy {
    pub fn allows_any_origin(&self) -> bool {
        self.allow_origins.iter().any(|origin| origin == "*")
    }
}

/// Where API keys are read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiKeySource {
    Header,
}

/// A declaration that was produced but needs operator attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyGap {
    /// Prod gateway with CORS enabled but no explicit origin list
    CorsOriginsRequired,
}

impl fmt::Display for PolicyGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorsOriginsRequired => {
                write!(f, "prod gateway needs an explicit CORS origin list")
            }
        }
    }
}

/// One path resource of the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResource {
    /// Normalized full path, e.g. `/orders/{id}`
    pub path: String,
    /// Last path segment
    pub segment: String,
    /// Normalized parent path; `/` for top-level resources
    pub parent: String,
}

/// An HTTP method attached to a path resource and backed by a compute unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBinding {
    pub method: String,
    pub path: String,
    pub compute_unit: ResourceName,
    pub api_key_required: bool,
    pub proxy_integration: bool,
}

/// A routed HTTP gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayDeclaration {
    pub name: ResourceName,
    pub description: String,
    pub stage: StageSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors: Option<CorsPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_source: Option<ApiKeySource>,
    /// Path resources, parents before children
    pub resources: Vec<GatewayResource>,
    /// Method bindings in endpoint declaration order
    pub methods: Vec<MethodBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policy_gaps: Vec<PolicyGap>,
    pub tags: TagSet,
}

impl GatewayDeclaration {
    pub fn needs_attention(&self) -> bool {
        !self.policy_gaps.is_empty()
    }
}

impl Taggable for GatewayDeclaration {
    fn apply_tags(&mut self, tags: &TagSet) {
        self.tags.extend(tags);
    }
}
