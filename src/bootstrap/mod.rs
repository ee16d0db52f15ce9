// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One-time preparation of the managing cluster.
//!
//! The steps run strictly in order and the first failure aborts the run, so
//! no provisioning starts against a half-prepared managing cluster.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tracing::{info, instrument};
use url::Url;

use crate::config::Config;
use crate::constants::platform::CONTAINER_SERVICE_PLUGIN;
use crate::error::Result;
use crate::oauth::TokenSource;
use crate::tools::{CloudCli, ClusterCli, PrereqInstaller};
use crate::types::{ApiKey, BearerToken};

/// Authenticated access to the managing cluster's API server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagingClusterSession {
    pub api_server: Url,
    pub token: BearerToken,
}

/// Identity of the managing cluster and what to install on it
#[derive(Debug, Clone)]
pub struct ManagingCluster {
    pub name: String,
    pub region: String,
    pub operator_image: Option<String>,
}

impl From<&Config> for ManagingCluster {
    fn from(config: &Config) -> Self {
        Self {
            name: config.management_cluster.clone(),
            region: config.management_cluster_region.clone(),
            operator_image: config.hypershift_operator_image.clone(),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Wait until the installed prerequisite can serve cluster creations
    async fn wait_ready(&self, session: &ManagingClusterSession) -> Result<()>;
}

pub struct Bootstrapper {
    cloud: Box<dyn CloudCli>,
    tokens: Box<dyn TokenSource>,
    cluster_cli: Box<dyn ClusterCli>,
    installer: Box<dyn PrereqInstaller>,
    readiness: Box<dyn ReadinessProbe>,
}

impl Bootstrapper {
    pub fn new(
        cloud: Box<dyn CloudCli>,
        tokens: Box<dyn TokenSource>,
        cluster_cli: Box<dyn ClusterCli>,
        installer: Box<dyn PrereqInstaller>,
        readiness: Box<dyn ReadinessProbe>,
    ) -> Self {
        Self {
            cloud,
            tokens,
            cluster_cli,
            installer,
            readiness,
        }
    }

    /// Prepare the managing cluster and return the session established on it
    #[instrument(skip(self, managing, api_key), fields(cluster = %managing.name))]
    pub async fn run(
        &self,
        managing: &ManagingCluster,
        api_key: &ApiKey,
    ) -> Result<ManagingClusterSession> {
        self.cloud.login(api_key, &managing.region).await?;
        self.cloud.install_plugin(CONTAINER_SERVICE_PLUGIN).await?;

        let details = self.cloud.get_cluster(&managing.name).await?;
        info!("Managing cluster API server is {}", details.master_url);

        let token = self.tokens.acquire(&details.master_url, api_key).await?;
        let session = ManagingClusterSession {
            api_server: details.master_url,
            token,
        };

        self.cluster_cli
            .login(&session.token, &session.api_server)
            .await?;

        self.installer.install(managing.operator_image.clone()).await?;
        self.readiness.wait_ready(&session).await?;

        info!("Managing cluster {} is ready", managing.name);
        Ok(session)
    }
}
