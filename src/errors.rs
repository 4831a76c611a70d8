// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for blueprint composition and provisioning

use thiserror::Error;

/// Errors raised while composing blueprints
///
/// All of these are raised before any declaration reaches a provisioner.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlueprintError {
    /// Incomplete default table or unresolvable required option
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed service identity
    #[error("Invalid identity: {0}")]
    InvalidIdentity(String),

    /// Discovery found no matching network
    #[error("No network matches {0}")]
    NetworkNotFound(String),

    /// Discovery found more than one matching network
    #[error("Ambiguous network lookup {query}: {candidates:?} all match")]
    AmbiguousNetwork {
        query: String,
        candidates: Vec<String>,
    },

    /// The same method and path were declared twice
    #[error("Duplicate endpoint: {method} {path}")]
    DuplicateEndpoint { method: String, path: String },
}

/// Result type for blueprint composition
pub type BlueprintResult<T> = Result<T, BlueprintError>;

/// Errors reported by a provisioning collaborator
///
/// These are passed back to the caller as-is.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// The backend refused the declaration
    #[error("Provisioning rejected for {resource}: {reason}")]
    Rejected { resource: String, reason: String },

    /// Transport failure talking to the backend
    #[error("Provisioning transport error: {0}")]
    Transport(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Timeout error
    #[error("Provisioning timed out: {0}")]
    Timeout(String),
}

/// Result type for provisioning operations
pub type ProvisioningResult<T> = Result<T, ProvisioningError>;

impl From<serde_json::Error> for ProvisioningError {
    fn from(err: serde_json::Error) -> Self {
        ProvisioningError::Serialization(err.to_string())
    }
}

impl From<async_nats::RequestError> for ProvisioningError {
    fn from(err: async_nats::RequestError) -> Self {
        match err.kind() {
            async_nats::RequestErrorKind::TimedOut => ProvisioningError::Timeout(err.to_string()),
            _ => ProvisioningError::Transport(err.to_string()),
        }
    }
}
