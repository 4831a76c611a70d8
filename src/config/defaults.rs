// Copyright (c) 2025 - Cowboy AI, Inc.
//! Organizational Default Tables
//!
//! Tier-keyed defaults plus the handful of global fallbacks that have no
//! tier dimension. Changing a value here changes every blueprint.

use serde::{Deserialize, Serialize};

use crate::domain::{RemovalPolicy, TierTable};

// ---------------------------------------------------------------------------
// Functions
// ---------------------------------------------------------------------------

pub const FUNCTION_MEMORY_MB: TierTable<u32> = TierTable::new(256, 512, 1024);

pub const FUNCTION_TIMEOUT_SECS: TierTable<u32> = TierTable::new(30, 60, 120);

pub const FUNCTION_LOG_RETENTION_DAYS: TierTable<u32> = TierTable::new(14, 30, 90);

pub const DEFAULT_HANDLER: &str = "index.handler";

pub const DEFAULT_RUNTIME: &str = "nodejs20.x";

pub const FUNCTION_RETRY_ATTEMPTS: u32 = 2;

// ---------------------------------------------------------------------------
// Scalable services
// ---------------------------------------------------------------------------

/// Task size does not scale with the tier; capacity does
pub const SERVICE_CPU_UNITS: TierTable<u32> = TierTable::new(256, 256, 256);

pub const SERVICE_MEMORY_MIB: TierTable<u32> = TierTable::new(512, 512, 512);

pub const SERVICE_LOG_RETENTION_DAYS: TierTable<u32> = TierTable::new(30, 90, 365);

pub const MIN_CAPACITY: TierTable<u32> = TierTable::new(1, 2, 3);

pub const MAX_CAPACITY: TierTable<u32> = TierTable::new(2, 4, 20);

pub const TARGET_CPU_UTILIZATION: TierTable<u32> = TierTable::new(80, 75, 70);

pub const TARGET_CPU_FALLBACK: u32 = 70;

pub const EXECUTE_COMMAND_ENABLED: TierTable<bool> = TierTable::new(true, false, false);

pub const CONTAINER_INSIGHTS_ENABLED: TierTable<bool> = TierTable::new(false, false, true);

pub const DEFAULT_CONTAINER_PORT: u16 = 8080;

pub const DEFAULT_HEALTH_CHECK_PATH: &str = "/health";

pub const SCALING_COOLDOWN_SECS: u32 = 60;

pub const HEALTH_CHECK_INTERVAL_SECS: u32 = 30;

pub const HEALTH_CHECK_TIMEOUT_SECS: u32 = 5;

pub const HEALTH_CHECK_RETRIES: u32 = 3;

pub const HEALTH_CHECK_START_PERIOD_SECS: u32 = 60;

pub const HEALTHY_THRESHOLD: u32 = 2;

pub const UNHEALTHY_THRESHOLD: u32 = 3;

// ---------------------------------------------------------------------------
// Shared by every compute unit
// ---------------------------------------------------------------------------

pub const LOG_LEVEL: TierTable<&str> = TierTable::new("DEBUG", "DEBUG", "INFO");

pub const TRACING_ENABLED: TierTable<bool> = TierTable::new(false, true, true);

/// Log destinations survive stack deletion only in prod
pub const REMOVAL_POLICY: TierTable<RemovalPolicy> =
    TierTable::new(RemovalPolicy::Destroy, RemovalPolicy::Destroy, RemovalPolicy::Retain);

/// Alarm thresholds attached to every compute unit's observability settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmThresholds {
    pub error_rate_percent: u32,
    pub latency_ms: u32,
}

pub const ALARM_THRESHOLDS: TierTable<AlarmThresholds> = TierTable::new(
    AlarmThresholds {
        error_rate_percent: 10,
        latency_ms: 2000,
    },
    AlarmThresholds {
        error_rate_percent: 5,
        latency_ms: 1000,
    },
    AlarmThresholds {
        error_rate_percent: 1,
        latency_ms: 500,
    },
);

// ---------------------------------------------------------------------------
// Gateways
// ---------------------------------------------------------------------------

pub const DEFAULT_RATE_LIMIT: u32 = 1000;

pub const DEFAULT_BURST_LIMIT: u32 = 2000;

pub const ACCESS_LOG_RETENTION_DAYS: TierTable<u32> = TierTable::new(14, 14, 90);

pub const CORS_ALLOW_HEADERS: [&str; 3] = ["Content-Type", "Authorization", "X-Api-Key"];

pub const CORS_ALLOW_METHODS: [&str; 7] = ["OPTIONS", "GET", "PUT", "POST", "DELETE", "PATCH", "HEAD"];

pub const CORS_WILDCARD: &str = "*";

/// Default CORS origin policy when the caller gives no origin list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorsDefault {
    /// Allow any origin
    Wildcard,
    /// An explicit list is required; none is assumed
    ExplicitRequired,
}

pub const CORS_DEFAULT: TierTable<CorsDefault> = TierTable::new(
    CorsDefault::Wildcard,
    CorsDefault::Wildcard,
    CorsDefault::ExplicitRequired,
);
