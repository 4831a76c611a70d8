// Copyright (c) 2025 - Cowboy AI, Inc.
//! Blueprint Synthesizer
//!
//! Reads a JSON intent, composes it into resource declarations and prints
//! them as JSON. With `--provision` the declarations are also sent to the
//! NATS provisioning backend.
//!
//! Run with: cargo run --bin blueprint-synth -- intent.json [--provision] [--nats-url URL]
//!
//! Environment:
//! - `RUST_LOG` - log filter (default `info`)
//! - `NATS_URL` - NATS server for `--provision` (default `localhost:4222`)

use anyhow::{Context, Result};
use clap::Parser;
use cim_blueprints::blueprint::{
    ApiBlueprint, Blueprint, BlueprintContext, ComputeSpec, ComputeUnitBlueprint,
    EndpointDeclaration, GatewayPolicy,
};
use cim_blueprints::discovery::StaticInventory;
use cim_blueprints::domain::{ComputeKind, NetworkContext, NetworkHandle, ServiceIdentity};
use cim_blueprints::nats::{NatsConfig, NatsProvisioner};
use cim_blueprints::provision::provision_all;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

/// Compose a blueprint intent into resource declarations
#[derive(Debug, Parser)]
#[command(name = "blueprint-synth", version, about)]
struct Args {
    /// Intent file (JSON)
    intent: PathBuf,

    /// Send the declarations to the provisioning backend
    #[arg(long)]
    provision: bool,

    /// NATS server used with --provision
    #[arg(long, env = "NATS_URL", default_value = "localhost:4222")]
    nats_url: String,
}

/// What to compose
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Composition {
    Function(ComputeSpec),
    Service(ComputeSpec),
    Api {
        endpoints: Vec<EndpointDeclaration>,
        #[serde(default)]
        policy: GatewayPolicy,
    },
}

/// Intent file layout
#[derive(Debug, Deserialize)]
struct Intent {
    identity: ServiceIdentity,
    #[serde(default)]
    inventory: StaticInventory,
    /// Network shared by every unit of this composition
    #[serde(default)]
    shared_network: Option<NetworkHandle>,
    blueprint: Composition,
}

fn compose(intent: Intent) -> Result<Vec<cim_blueprints::ResourceDeclaration>> {
    let shared = intent.shared_network.map(NetworkContext::for_handle);
    let mut ctx = BlueprintContext::new(&intent.inventory);
    if let Some(shared) = &shared {
        ctx = ctx.with_shared_network(shared);
    }

    let declarations = match intent.blueprint {
        Composition::Function(spec) => {
            let spec = ComputeSpec {
                kind: ComputeKind::Function,
                ..spec
            };
            ComputeUnitBlueprint::new(intent.identity, &spec, ctx)?.declarations()
        }
        Composition::Service(spec) => {
            let spec = ComputeSpec {
                kind: ComputeKind::ScalableService,
                ..spec
            };
            ComputeUnitBlueprint::new(intent.identity, &spec, ctx)?.declarations()
        }
        Composition::Api { endpoints, policy } => {
            let api = ApiBlueprint::new(intent.identity, &endpoints, &policy, ctx)?;
            for gap in api.policy_gaps() {
                eprintln!("warning: {gap}");
            }
            api.declarations()
        }
    };
    Ok(declarations)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let path = args.intent.display();

    let raw = std::fs::read_to_string(&args.intent).with_context(|| format!("reading {path}"))?;
    let intent: Intent = serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?;
    let tier = intent.identity.environment;

    let declarations = compose(intent)?;
    info!(count = declarations.len(), %tier, "composed declarations");
    println!("{}", serde_json::to_string_pretty(&declarations)?);

    if args.provision {
        let config = NatsConfig {
            servers: vec![args.nats_url],
            ..NatsConfig::default()
        };
        let provisioner = NatsProvisioner::connect(config, tier)
            .await
            .context("connecting to provisioning backend")?;
        let handles = provision_all(&provisioner, &declarations).await?;
        println!("{}", serde_json::to_string_pretty(&handles)?);
    }

    Ok(())
}
