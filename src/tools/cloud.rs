// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! IBM Cloud CLI adapter

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, instrument};
use url::Url;

use super::run_tool;
use crate::constants::API_KEY_ENV;
use crate::error::{ProvisionError, Result};
use crate::types::ApiKey;

/// Connection metadata of a managed cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterDetails {
    pub master_url: Url,
}

#[derive(Deserialize)]
struct RawClusterDetails {
    #[serde(rename = "masterURL")]
    master_url: String,
}

impl ClusterDetails {
    /// Decode the JSON document printed by `ibmcloud oc cluster get --output json`
    pub fn from_json(raw: &[u8]) -> Result<Self> {
        let details: RawClusterDetails = serde_json::from_slice(raw).map_err(|e| {
            ProvisionError::ClusterLookupError(format!("unexpected cluster document: {}", e))
        })?;
        let master_url = Url::parse(&details.master_url).map_err(|e| {
            ProvisionError::ClusterLookupError(format!(
                "invalid masterURL {}: {}",
                details.master_url, e
            ))
        })?;
        Ok(Self { master_url })
    }
}

/// Operations needed from the cloud provider CLI
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CloudCli: Send + Sync {
    /// Log in to the cloud account in the given region
    async fn login(&self, api_key: &ApiKey, region: &str) -> Result<()>;

    /// Install a CLI plugin, a no-op when it is already present
    async fn install_plugin(&self, name: &str) -> Result<()>;

    /// Fetch connection metadata for a managed cluster by name
    async fn get_cluster(&self, name: &str) -> Result<ClusterDetails>;
}

/// `ibmcloud` backed implementation
pub struct IbmCloudCli {
    program: PathBuf,
}

impl IbmCloudCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

pub(crate) fn login_args(region: &str) -> Vec<String> {
    vec!["login".into(), "-r".into(), region.into()]
}

pub(crate) fn plugin_install_args(name: &str) -> Vec<String> {
    vec!["plugin".into(), "install".into(), name.into(), "-f".into()]
}

pub(crate) fn cluster_get_args(name: &str) -> Vec<String> {
    ["oc", "cluster", "get", "-c", name, "--output", "json"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[async_trait]
impl CloudCli for IbmCloudCli {
    #[instrument(skip(self, api_key))]
    async fn login(&self, api_key: &ApiKey, region: &str) -> Result<()> {
        info!("Logging in to IBM Cloud region {}", region);
        // The CLI picks the key up from the environment, which keeps it off the process list
        run_tool(&self.program, &login_args(region), &[(API_KEY_ENV, api_key.expose())])
            .await
            .map_err(ProvisionError::CloudLoginError)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn install_plugin(&self, name: &str) -> Result<()> {
        info!("Ensuring CLI plugin {} is installed", name);
        run_tool(&self.program, &plugin_install_args(name), &[])
            .await
            .map_err(ProvisionError::PluginInstallError)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_cluster(&self, name: &str) -> Result<ClusterDetails> {
        info!("Looking up cluster {}", name);
        let stdout = run_tool(&self.program, &cluster_get_args(name), &[])
            .await
            .map_err(ProvisionError::ClusterLookupError)?;
        ClusterDetails::from_json(&stdout)
    }
}
