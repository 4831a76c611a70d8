// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Handles and Subnet Selection Presets

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;

/// Network value validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid prefix length: {0} (must be 0-32 for IPv4, 0-128 for IPv6)")]
    InvalidPrefixLength(u8),
}

/// Address block of a network, always in CIDR notation
///
/// ```rust
/// use cim_blueprints::domain::CidrBlock;
///
/// let block = CidrBlock::new("10.20.0.0/16").unwrap();
/// assert_eq!(block.prefix_length(), 16);
/// assert!(CidrBlock::new("10.20.0.0").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CidrBlock {
    address: IpAddr,
    prefix_length: u8,
}

impl CidrBlock {
    pub fn new(cidr: impl AsRef<str>) -> Result<Self, NetworkError> {
        let cidr = cidr.as_ref();
        let (addr_str, prefix_str) = cidr
            .split_once('/')
            .ok_or_else(|| NetworkError::InvalidCidr(cidr.to_string()))?;

        let address = IpAddr::from_str(addr_str)
            .map_err(|_| NetworkError::InvalidIpAddress(addr_str.to_string()))?;

        let prefix_length = prefix_str
            .parse::<u8>()
            .map_err(|_| NetworkError::InvalidCidr(cidr.to_string()))?;

        let max_prefix = match address {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        if prefix_length > max_prefix {
            return Err(NetworkError::InvalidPrefixLength(prefix_length));
        }

        Ok(Self {
            address,
            prefix_length,
        })
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn prefix_length(&self) -> u8 {
        self.prefix_length
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_length)
    }
}

impl FromStr for CidrBlock {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CidrBlock {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CidrBlock> for String {
    fn from(block: CidrBlock) -> Self {
        block.to_string()
    }
}

/// Opaque handle to an existing network
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkHandle {
    /// Provider identifier (e.g. `vpc-0abc`)
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<CidrBlock>,

    /// Whether this is the provider's default network
    #[serde(default)]
    pub is_default: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl NetworkHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            cidr: None,
            is_default: false,
            tags: BTreeMap::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_cidr(mut self, cidr: CidrBlock) -> Self {
        self.cidr = Some(cidr);
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn provider_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// Subnet class within a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubnetType {
    /// Routable from the internet
    Public,
    /// Outbound access through NAT
    PrivateWithEgress,
    /// No internet access
    PrivateIsolated,
}

impl SubnetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::PrivateWithEgress => "private_with_egress",
            Self::PrivateIsolated => "private_isolated",
        }
    }
}

/// Subnet selection descriptor handed to the provisioner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubnetSelection {
    pub subnet_type: SubnetType,
}

impl SubnetSelection {
    pub const PUBLIC: Self = Self {
        subnet_type: SubnetType::Public,
    };
    pub const PRIVATE_WITH_EGRESS: Self = Self {
        subnet_type: SubnetType::PrivateWithEgress,
    };
    pub const ISOLATED: Self = Self {
        subnet_type: SubnetType::PrivateIsolated,
    };
}

impl Default for SubnetSelection {
    fn default() -> Self {
        Self::PRIVATE_WITH_EGRESS
    }
}

/// A resolved network plus its three standard subnet presets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkContext {
    pub handle: NetworkHandle,
    pub public_subnets: SubnetSelection,
    pub private_subnets: SubnetSelection,
    pub isolated_subnets: SubnetSelection,
}

impl NetworkContext {
    /// Attach the standard presets to a network handle
    pub fn for_handle(handle: NetworkHandle) -> Self {
        Self {
            handle,
            public_subnets: SubnetSelection::PUBLIC,
            private_subnets: SubnetSelection::PRIVATE_WITH_EGRESS,
            isolated_subnets: SubnetSelection::ISOLATED,
        }
    }

    /// Preset for a subnet type
    pub fn subnets(&self, subnet_type: SubnetType) -> SubnetSelection {
        match subnet_type {
            SubnetType::Public => self.public_subnets,
            SubnetType::PrivateWithEgress => self.private_subnets,
            SubnetType::PrivateIsolated => self.isolated_subnets,
        }
    }
}

/// How to find a network when no handle is given
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkLookup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl NetworkLookup {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// True when nothing narrows the search beyond "not the default network"
    pub fn is_unconstrained(&self) -> bool {
        self.id.is_none() && self.name.is_none() && self.tags.is_empty()
    }
}

impl fmt::Display for NetworkLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unconstrained() {
            return write!(f, "[first non-default network]");
        }
        let mut parts = Vec::new();
        if let Some(id) = &self.id {
            parts.push(format!("id={id}"));
        }
        if let Some(name) = &self.name {
            parts.push(format!("name={name}"));
        }
        for (key, value) in &self.tags {
            parts.push(format!("tag:{key}={value}"));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}
