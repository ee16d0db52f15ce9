// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-cluster provisioning requests and the targets they are built from.

use std::path::PathBuf;

use crate::config::Config;
use crate::constants::naming::{CLUSTER_NAME_SUFFIX, INFRA_ID_SUFFIX};

/// One (region, zone, vpc region) triple to create a cluster in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterTarget {
    pub region: String,
    pub zone: String,
    pub vpc_region: String,
}

impl ClusterTarget {
    pub fn new(
        region: impl Into<String>,
        zone: impl Into<String>,
        vpc_region: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            zone: zone.into(),
            vpc_region: vpc_region.into(),
        }
    }

    pub fn cluster_name(&self) -> String {
        cluster_name(&self.zone)
    }
}

pub fn cluster_name(zone: &str) -> String {
    format!("{}-{}", zone, CLUSTER_NAME_SUFFIX)
}

pub fn infra_id(zone: &str) -> String {
    format!("{}-{}", zone, INFRA_ID_SUFFIX)
}

/// Expand the configured regions into one target per zone.
///
/// `vpc_regions[i]` pairs with `regions[i]`; regions without a zone entry
/// contribute nothing.
pub fn plan_targets(config: &Config) -> Vec<ClusterTarget> {
    config
        .regions
        .iter()
        .zip(&config.vpc_regions)
        .flat_map(|(region, vpc_region)| {
            config
                .region_zones
                .get(region)
                .into_iter()
                .flatten()
                .map(move |zone| ClusterTarget::new(region, zone, vpc_region))
        })
        .collect()
}

/// Settings shared by every cluster of a run
#[derive(Debug, Clone)]
pub struct ClusterSettings {
    pub ssh_key_path: PathBuf,
    pub pull_secret_path: PathBuf,
    pub resource_group: String,
    pub base_domain: String,
    pub node_pool_replicas: i32,
    pub namespace: String,
    /// Explicit release image; resolved from the release feed per task when absent
    pub release_image: Option<String>,
    pub control_plane_operator_image: Option<String>,
}

impl From<&Config> for ClusterSettings {
    fn from(config: &Config) -> Self {
        Self {
            ssh_key_path: config.ssh_key_path.clone(),
            pull_secret_path: config.pull_secret_path.clone(),
            resource_group: config.resource_group.clone(),
            base_domain: config.base_domain.clone(),
            node_pool_replicas: config.node_pool_replicas,
            namespace: config.namespace.clone(),
            release_image: config.release_image.clone(),
            control_plane_operator_image: config.control_plane_operator_image.clone(),
        }
    }
}

/// Everything the lifecycle tool needs to create one hosted cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningRequest {
    pub region: String,
    pub zone: String,
    pub vpc_region: String,
    pub name: String,
    pub infra_id: String,
    pub namespace: String,
    pub ssh_key_path: PathBuf,
    pub pull_secret_path: PathBuf,
    pub resource_group: String,
    pub base_domain: String,
    pub node_pool_replicas: i32,
    pub release_image: String,
    pub control_plane_operator_image: Option<String>,
}

impl ProvisioningRequest {
    pub fn new(target: &ClusterTarget, settings: &ClusterSettings, release_image: String) -> Self {
        Self {
            region: target.region.clone(),
            zone: target.zone.clone(),
            vpc_region: target.vpc_region.clone(),
            name: cluster_name(&target.zone),
            infra_id: infra_id(&target.zone),
            namespace: settings.namespace.clone(),
            ssh_key_path: settings.ssh_key_path.clone(),
            pull_secret_path: settings.pull_secret_path.clone(),
            resource_group: settings.resource_group.clone(),
            base_domain: settings.base_domain.clone(),
            node_pool_replicas: settings.node_pool_replicas,
            release_image,
            control_plane_operator_image: settings.control_plane_operator_image.clone(),
        }
    }
}
