// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Kind Taxonomy
//!
//! The kinds of declaration a blueprint can emit. Provider resource types
//! stay opaque; the provisioner maps each kind onto whatever it creates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of resource a declaration describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Log/trace destination with retention policy
    LogDestination,
    /// Container cluster hosting scalable services
    Cluster,
    /// Long-running scalable container service
    ScalableService,
    /// Invokable function
    Function,
    /// Routed HTTP gateway
    Gateway,
}

impl ResourceKind {
    /// Canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LogDestination => "log_destination",
            Self::Cluster => "cluster",
            Self::ScalableService => "scalable_service",
            Self::Function => "function",
            Self::Gateway => "gateway",
        }
    }

    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LogDestination => "Log Destination",
            Self::Cluster => "Cluster",
            Self::ScalableService => "Scalable Service",
            Self::Function => "Function",
            Self::Gateway => "API Gateway",
        }
    }

    pub fn category(&self) -> ResourceCategory {
        match self {
            Self::Cluster | Self::ScalableService | Self::Function => ResourceCategory::Compute,
            Self::Gateway => ResourceCategory::Network,
            Self::LogDestination => ResourceCategory::Observability,
        }
    }

    /// Whether the kind is a deployable unit of compute
    pub fn is_compute_unit(&self) -> bool {
        matches!(self, Self::ScalableService | Self::Function)
    }

    /// Whether the provisioned resource exposes a network-reachable address
    pub fn has_address(&self) -> bool {
        matches!(self, Self::ScalableService | Self::Gateway)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// High-level grouping of resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceCategory {
    Compute,
    Network,
    Observability,
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compute => write!(f, "Compute"),
            Self::Network => write!(f, "Network"),
            Self::Observability => write!(f, "Observability"),
        }
    }
}
