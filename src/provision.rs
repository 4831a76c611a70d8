// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provisioning Collaborator
//!
//! Composition produces declarations; a [`Provisioner`] turns them into real
//! resources. This is the only asynchronous step, and its errors are handed
//! back to the caller untouched.

use async_trait::async_trait;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::ResourceDeclaration;
use crate::errors::{ProvisioningError, ProvisioningResult};

/// What a provisioner returns for one materialized resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHandle {
    pub name: String,
    /// Provider identifier, e.g. an ARN
    pub identifier: String,
    /// Network-reachable address, when the resource has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Materializes declarations
#[async_trait]
pub trait Provisioner: Send + Sync {
    async fn provision(&self, declaration: &ResourceDeclaration) -> ProvisioningResult<ResourceHandle>;
}

/// Hand every declaration to `provisioner`
///
/// Declarations are submitted in order and are independent of each other.
/// The first collaborator error is returned unchanged.
pub async fn provision_all<P>(
    provisioner: &P,
    declarations: &[ResourceDeclaration],
) -> ProvisioningResult<Vec<ResourceHandle>>
where
    P: Provisioner + ?Sized,
{
    debug!(count = declarations.len(), "provisioning declarations");
    let handles = try_join_all(declarations.iter().map(|d| provisioner.provision(d))).await?;
    info!(count = handles.len(), "provisioned declarations");
    Ok(handles)
}

/// Provisioner that records declarations and fabricates identifiers
///
/// Identifiers are deterministic: `arn:cim:<kind>:<name>`.
#[derive(Debug, Default)]
pub struct InMemoryProvisioner {
    recorded: Mutex<Vec<ResourceDeclaration>>,
    rejected: BTreeSet<String>,
}

impl InMemoryProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse any declaration with this name
    pub fn rejecting(mut self, name: impl Into<String>) -> Self {
        self.rejected.insert(name.into());
        self
    }

    /// Declarations accepted so far, in submission order
    pub async fn recorded(&self) -> Vec<ResourceDeclaration> {
        self.recorded.lock().await.clone()
    }
}

#[async_trait]
impl Provisioner for InMemoryProvisioner {
    async fn provision(&self, declaration: &ResourceDeclaration) -> ProvisioningResult<ResourceHandle> {
        let name = declaration.name().to_string();
        if self.rejected.contains(&name) {
            return Err(ProvisioningError::Rejected {
                resource: declaration.logical_id(),
                reason: "rejected by inventory".to_string(),
            });
        }

        let kind = declaration.kind();
        self.recorded.lock().await.push(declaration.clone());

        Ok(ResourceHandle {
            identifier: format!("arn:cim:{}:{}", kind.as_str(), name),
            address: kind.has_address().then(|| format!("https://{name}.cim.local")),
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogDestinationDeclaration, RemovalPolicy, TagSet};
    use tokio_test::block_on;

    fn log(name: &str) -> ResourceDeclaration {
        ResourceDeclaration::LogDestination(LogDestinationDeclaration {
            name: name.to_string(),
            retention_days: 14,
            removal_policy: RemovalPolicy::Destroy,
            tags: TagSet::new(),
        })
    }

    #[test]
    fn test_in_memory_identifiers() {
        let provisioner = InMemoryProvisioner::new();
        let handle = block_on(provisioner.provision(&log("/ecs/orders/dev"))).unwrap();
        assert_eq!(handle.identifier, "arn:cim:log_destination:/ecs/orders/dev");
        assert_eq!(handle.name, "/ecs/orders/dev");
        assert!(handle.address.is_none());
    }

    #[test]
    fn test_provision_all_preserves_order() {
        let provisioner = InMemoryProvisioner::new();
        let declarations = vec![log("a"), log("b"), log("c")];
        let handles = block_on(provision_all(&provisioner, &declarations)).unwrap();

        let names: Vec<_> = handles.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(block_on(provisioner.recorded()), declarations);
    }

    #[test]
    fn test_rejection_surfaces_unchanged() {
        let provisioner = InMemoryProvisioner::new().rejecting("b");
        let err = block_on(provision_all(&provisioner, &[log("a"), log("b")])).unwrap_err();
        match err {
            ProvisioningError::Rejected { resource, .. } => {
                assert_eq!(resource, "log_destination/b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_trait_object() {
        let provisioner: Box<dyn Provisioner> = Box::new(InMemoryProvisioner::new());
        let handles = block_on(provision_all(provisioner.as_ref(), &[log("x")])).unwrap();
        assert_eq!(handles.len(), 1);
    }
}
