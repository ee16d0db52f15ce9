// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD availability checking utilities

use async_trait::async_trait;
use kube::{discovery::Discovery, Client};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{info, warn};

use super::client::client_for_session;
use crate::bootstrap::{ManagingClusterSession, ReadinessProbe};
use crate::constants::crd::{
    HOSTED_CLUSTER_KIND, HYPERSHIFT_GROUP, POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS,
};
use crate::error::{ProvisionError, Result};

/// Polling schedule used while waiting for a CRD
#[derive(Debug, Clone, Copy)]
pub struct CrdWait {
    pub interval: Duration,
    pub max_interval: Duration,
    pub timeout: Duration,
}

impl CrdWait {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            interval: Duration::from_secs(POLL_INTERVAL_SECS),
            max_interval: Duration::from_secs(POLL_MAX_INTERVAL_SECS),
            timeout,
        }
    }
}

/// Wait for the HostedCluster CRD to be served, with exponential backoff.
pub async fn wait_for_hosted_cluster_crd(client: &Client, wait: CrdWait) -> Result<()> {
    let deadline = Instant::now() + wait.timeout;
    let mut interval = wait.interval;

    loop {
        match check_hosted_cluster_crd_exists(client).await {
            Ok(true) => {
                info!("HostedCluster CRD ({}) is available", HYPERSHIFT_GROUP);
                return Ok(());
            }
            Ok(false) => {
                info!(
                    "HostedCluster CRD ({}) not yet available, waiting {:?}...",
                    HYPERSHIFT_GROUP, interval
                );
            }
            Err(e) => {
                warn!(
                    "Error checking for HostedCluster CRD: {}, retrying in {:?}...",
                    e, interval
                );
            }
        }

        if Instant::now() + interval > deadline {
            return Err(ProvisionError::PrereqInstallError(format!(
                "HostedCluster CRD not available after {:?}",
                wait.timeout
            )));
        }
        sleep(interval).await;

        // Exponential backoff with max cap
        interval = (interval * 2).min(wait.max_interval);
    }
}

/// Check if the HostedCluster CRD exists by attempting to discover it.
async fn check_hosted_cluster_crd_exists(client: &Client) -> Result<bool> {
    let discovery = Discovery::new(client.clone())
        .filter(&[HYPERSHIFT_GROUP])
        .run()
        .await?;

    let found = discovery
        .groups()
        .filter(|group| group.name() == HYPERSHIFT_GROUP)
        .flat_map(|group| group.recommended_resources())
        .any(|(ar, _)| ar.kind == HOSTED_CLUSTER_KIND);
    Ok(found)
}

/// Readiness probe that waits for the HyperShift operator's CRDs
pub struct HostedClusterCrdProbe {
    namespace: String,
    wait: CrdWait,
}

impl HostedClusterCrdProbe {
    pub fn new(namespace: impl Into<String>, wait: CrdWait) -> Self {
        Self {
            namespace: namespace.into(),
            wait,
        }
    }
}

#[async_trait]
impl ReadinessProbe for HostedClusterCrdProbe {
    async fn wait_ready(&self, session: &ManagingClusterSession) -> Result<()> {
        let client = client_for_session(session, &self.namespace).await?;
        wait_for_hosted_cluster_crd(&client, self.wait).await
    }
}
