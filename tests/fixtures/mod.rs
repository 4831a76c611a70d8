// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-blueprints
//!
//! Deterministic identities, inventories and endpoint sets shared by the
//! integration suites.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use cim_blueprints::blueprint::{ComputeSpec, EndpointDeclaration};
use cim_blueprints::discovery::{DiscoveryOutcome, NetworkDiscovery, NetworkQuery, StaticInventory};
use cim_blueprints::domain::{CidrBlock, EnvironmentTier, NetworkHandle, ServiceIdentity};

pub const SERVICE: &str = "orders";
pub const TEAM: &str = "payments";
pub const COST_CENTER: &str = "cc-1042";

pub fn identity(tier: EnvironmentTier) -> ServiceIdentity {
    ServiceIdentity::new(SERVICE, tier)
        .with_team(TEAM)
        .with_cost_center(COST_CENTER)
}

/// Default network plus one application network
pub fn inventory() -> StaticInventory {
    StaticInventory::new([
        NetworkHandle::new("vpc-0000default").provider_default(),
        NetworkHandle::new("vpc-0aa1core")
            .named("core")
            .with_cidr(cidr("10.20.0.0/16"))
            .with_tag("tier", "app"),
    ])
}

/// Two networks sharing one name
pub fn ambiguous_inventory() -> StaticInventory {
    StaticInventory::new([
        NetworkHandle::new("vpc-0bb1").named("shared-vpc"),
        NetworkHandle::new("vpc-0bb2").named("shared-vpc"),
    ])
}

pub fn cidr(block: &str) -> CidrBlock {
    CidrBlock::new(block).expect("Invalid CIDR in test fixture")
}

pub fn orders_endpoints() -> Vec<EndpointDeclaration> {
    vec![
        EndpointDeclaration::new("GET", "/orders", ComputeSpec::function("dist/list-orders")),
        EndpointDeclaration::new("POST", "/orders", ComputeSpec::function("dist/create-order")),
        EndpointDeclaration::new("GET", "/orders/{id}", ComputeSpec::function("dist/get-order")),
        EndpointDeclaration::new(
            "GET",
            "/orders/{id}/items",
            ComputeSpec::function("dist/list-items"),
        ),
    ]
}

/// Discovery wrapper counting calls
pub struct CountingDiscovery<D> {
    inner: D,
    calls: AtomicUsize,
}

impl<D> CountingDiscovery<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<D: NetworkDiscovery> NetworkDiscovery for CountingDiscovery<D> {
    fn find_network(&self, query: &NetworkQuery) -> DiscoveryOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_network(query)
    }
}
