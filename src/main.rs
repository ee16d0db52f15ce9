// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hcp_provisioner::bootstrap::{Bootstrapper, ManagingCluster};
use hcp_provisioner::config::Config;
use hcp_provisioner::constants::oauth::REQUEST_TIMEOUT_SECS;
use hcp_provisioner::kubernetes::{client_for_session, hosted_cluster_phases, CrdWait, HostedClusterCrdProbe};
use hcp_provisioner::oauth::TokenAcquirer;
use hcp_provisioner::provision::{plan_targets, ClusterSettings, Orchestrator, ReleaseFeed};
use hcp_provisioner::run::bootstrap_and_provision;
use hcp_provisioner::tools::{HypershiftCli, IbmCloudCli, OcCli};
use hcp_provisioner::types::ApiKey;

/// Provision HyperShift hosted clusters across Power VS zones in parallel
#[derive(Parser)]
#[command(name = "hcp-provisioner")]
#[command(version)]
struct Cli {
    /// Run configuration file (JSON or YAML)
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let Some(config_path) = cli.config else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = Config::from_file(&config_path)?;
    info!(
        "Configuration loaded: managing cluster {} in {}, {} regions",
        config.management_cluster,
        config.management_cluster_region,
        config.regions.len()
    );
    let api_key = ApiKey::from_env()?;

    let timeout = Duration::from_secs(REQUEST_TIMEOUT_SECS);
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build HTTP client")?;
    let tokens = TokenAcquirer::new(timeout).context("failed to build OAuth client")?;

    let hypershift = Arc::new(HypershiftCli::new(&config.tools.lifecycle_tool));
    let bootstrapper = Bootstrapper::new(
        Box::new(IbmCloudCli::new(&config.tools.cloud_cli)),
        Box::new(tokens),
        Box::new(OcCli::new(&config.tools.cluster_cli)),
        Box::new(HypershiftCli::new(&config.tools.lifecycle_tool)),
        Box::new(HostedClusterCrdProbe::new(
            config.namespace.clone(),
            CrdWait::with_timeout(config.prereq_ready_timeout()),
        )),
    );
    let orchestrator = Orchestrator::new(
        hypershift,
        Arc::new(ReleaseFeed::new(http, config.release_feed.clone())),
        ClusterSettings::from(&config),
        api_key.clone(),
    );

    let targets = plan_targets(&config);
    let (session, report) = bootstrap_and_provision(
        &bootstrapper,
        &ManagingCluster::from(&config),
        &api_key,
        &orchestrator,
        targets,
    )
    .await?;

    // Read-back is informational; the run's outcome does not depend on it
    match client_for_session(&session, &config.namespace).await {
        Ok(client) => {
            match hosted_cluster_phases(&client, &config.namespace, &report.cluster_names()).await {
                Ok(phases) => {
                    for (name, phase) in phases {
                        info!("Hosted cluster {}: {:?}", name, phase);
                    }
                }
                Err(e) => warn!("Failed to read back hosted clusters: {}", e),
            }
        }
        Err(e) => warn!("Failed to create client for managing cluster: {}", e),
    }

    info!(
        "Run finished: {} clusters created, {} failed",
        report.succeeded(),
        report.failed()
    );
    Ok(())
}
