// Copyright (c) 2025 - Cowboy AI, Inc.
//! NATS provisioning adapter
//!
//! Sends each declaration to a provisioning backend over NATS request-reply
//! and turns the reply into a [`ResourceHandle`].

use async_nats::{Client, ConnectOptions, RequestErrorKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{EnvironmentTier, ResourceDeclaration};
use crate::errors::{ProvisioningError, ProvisioningResult};
use crate::provision::{Provisioner, ResourceHandle};
use crate::subjects::{declare_subject, BLUEPRINTS_ROOT};

/// Configuration for NATS connection
#[derive(Debug, Clone)]
pub struct NatsConfig {
    /// NATS server URLs
    pub servers: Vec<String>,
    /// Client name
    pub name: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Request timeout
    pub request_timeout: Duration,
    /// Root token of every provisioning subject
    pub subject_root: String,
}

impl Default for NatsConfig {
    fn default() -> Self {
        Self {
            servers: vec!["nats://localhost:4222".to_string()],
            name: "cim-blueprints".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(5),
            subject_root: BLUEPRINTS_ROOT.to_string(),
        }
    }
}

/// Envelope sent for every declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisioningRequest {
    pub request_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub declaration: ResourceDeclaration,
}

impl ProvisioningRequest {
    pub fn new(declaration: ResourceDeclaration) -> Self {
        Self {
            request_id: Uuid::now_v7(),
            submitted_at: Utc::now(),
            declaration,
        }
    }
}

/// Backend reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProvisioningReply {
    Provisioned(ResourceHandle),
    Rejected { reason: String },
}

impl ProvisioningReply {
    fn into_result(self, declaration: &ResourceDeclaration) -> ProvisioningResult<ResourceHandle> {
        match self {
            Self::Provisioned(handle) => Ok(handle),
            Self::Rejected { reason } => Err(ProvisioningError::Rejected {
                resource: declaration.logical_id(),
                reason,
            }),
        }
    }
}

/// Provisioner backed by a NATS request-reply service
///
/// One provisioner serves one tier; its declarations are routed on that
/// tier's subjects.
#[derive(Clone)]
pub struct NatsProvisioner {
    client: Client,
    tier: EnvironmentTier,
    subject_root: String,
    request_timeout: Duration,
}

impl NatsProvisioner {
    /// Connect with the given configuration
    pub async fn connect(config: NatsConfig, tier: EnvironmentTier) -> ProvisioningResult<Self> {
        let connect_options = ConnectOptions::new()
            .name(&config.name)
            .connection_timeout(config.connect_timeout)
            .request_timeout(Some(config.request_timeout));

        let client = async_nats::connect_with_options(config.servers.join(","), connect_options)
            .await
            .map_err(|e| ProvisioningError::Transport(e.to_string()))?;

        info!("Connected to NATS at {:?}", config.servers);

        Ok(Self::with_client(client, &config, tier))
    }

    /// Wrap an existing client
    pub fn with_client(client: Client, config: &NatsConfig, tier: EnvironmentTier) -> Self {
        Self {
            client,
            tier,
            subject_root: config.subject_root.clone(),
            request_timeout: config.request_timeout,
        }
    }

    /// Subject a declaration is sent on
    pub fn subject_for(&self, declaration: &ResourceDeclaration) -> String {
        declare_subject(&self.subject_root, self.tier, declaration.kind())
    }

    /// Get the underlying NATS client for advanced operations
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Provisioner for NatsProvisioner {
    async fn provision(&self, declaration: &ResourceDeclaration) -> ProvisioningResult<ResourceHandle> {
        let subject = self.subject_for(declaration);
        let request = ProvisioningRequest::new(declaration.clone());
        let payload = serde_json::to_vec(&request)?;

        debug!(%subject, request_id = %request.request_id, "sending declaration");
        let response = match tokio::time::timeout(
            self.request_timeout,
            self.client.request(subject.clone(), payload.into()),
        )
        .await
        {
            Err(_) => return Err(ProvisioningError::Timeout(subject)),
            Ok(Err(err)) if matches!(err.kind(), RequestErrorKind::TimedOut) => {
                return Err(ProvisioningError::Timeout(subject));
            }
            Ok(result) => result?,
        };

        let reply: ProvisioningReply = serde_json::from_slice(&response.payload)?;
        let handle = reply.into_result(declaration)?;

        info!(%subject, identifier = %handle.identifier, "declaration provisioned");
        Ok(handle)
    }
}
