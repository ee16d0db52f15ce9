// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::constants::{defaults, API_KEY_ENV};
use crate::types::ApiKey;

/// Run configuration loaded from a JSON or YAML file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Name of the managing cluster that hosts the HyperShift operator
    pub management_cluster: String,
    pub management_cluster_region: String,
    #[serde(rename = "powervsRegion", default)]
    pub regions: Vec<String>,
    /// VPC region for each entry of `regions`, matched by index
    #[serde(rename = "vpcRegion", default)]
    pub vpc_regions: Vec<String>,
    #[serde(rename = "powervsRegionZoneM", default)]
    pub region_zones: BTreeMap<String, Vec<String>>,
    pub ssh_key_path: PathBuf,
    #[serde(rename = "pullSecret")]
    pub pull_secret_path: PathBuf,
    pub resource_group: String,
    pub base_domain: String,
    pub node_pool_replicas: i32,
    #[serde(default)]
    pub release_image: Option<String>,
    #[serde(rename = "cpoImage", default)]
    pub control_plane_operator_image: Option<String>,
    #[serde(default)]
    pub hypershift_operator_image: Option<String>,
    /// Namespace the hosted clusters are created in
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_release_feed")]
    pub release_feed: String,
    #[serde(default)]
    pub tools: ToolPaths,
    #[serde(default = "default_prereq_ready_timeout_secs")]
    pub prereq_ready_timeout_secs: u64,
}

/// Locations of the external command line tools
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolPaths {
    pub cloud_cli: PathBuf,
    pub cluster_cli: PathBuf,
    pub lifecycle_tool: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            cloud_cli: PathBuf::from(defaults::CLOUD_CLI),
            cluster_cli: PathBuf::from(defaults::CLUSTER_CLI),
            lifecycle_tool: PathBuf::from(defaults::LIFECYCLE_TOOL),
        }
    }
}

fn default_namespace() -> String {
    defaults::NAMESPACE.to_string()
}

fn default_release_feed() -> String {
    defaults::RELEASE_FEED.to_string()
}

fn default_prereq_ready_timeout_secs() -> u64 {
    defaults::PREREQ_READY_TIMEOUT_SECS
}

impl Config {
    /// Load and validate configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parse configuration from JSON or YAML text
    pub fn parse(raw: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(raw).context("failed to parse config")?;
        config.validate()?;
        // Empty image references mean "use the default"
        config.release_image = non_empty(config.release_image);
        config.control_plane_operator_image = non_empty(config.control_plane_operator_image);
        config.hypershift_operator_image = non_empty(config.hypershift_operator_image);
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.management_cluster.trim().is_empty() {
            bail!("managementCluster must not be empty");
        }
        if self.management_cluster_region.trim().is_empty() {
            bail!("managementClusterRegion must not be empty");
        }
        if self.regions.len() != self.vpc_regions.len() {
            bail!(
                "vpcRegion has {} entries but powervsRegion has {}; they are matched by index",
                self.vpc_regions.len(),
                self.regions.len()
            );
        }
        for region in &self.regions {
            if !self.region_zones.contains_key(region) {
                warn!("Region {} has no zones configured, no clusters will be created there", region);
            }
        }
        Ok(())
    }

    pub fn prereq_ready_timeout(&self) -> Duration {
        Duration::from_secs(self.prereq_ready_timeout_secs)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ApiKey {
    /// Read the API key from the environment
    pub fn from_env() -> Result<Self> {
        let value = env::var(API_KEY_ENV)
            .with_context(|| format!("{} environment variable not set", API_KEY_ENV))?;
        if value.trim().is_empty() {
            bail!("{} environment variable is empty", API_KEY_ENV);
        }
        Ok(ApiKey::new(value))
    }
}
