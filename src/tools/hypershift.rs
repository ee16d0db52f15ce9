// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HyperShift CLI adapter: prerequisite install and hosted cluster creation

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

use super::run_tool;
use crate::constants::{platform, API_KEY_ENV};
use crate::error::{ProvisionError, Result};
use crate::provision::ProvisioningRequest;
use crate::types::ApiKey;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PrereqInstaller: Send + Sync {
    /// Install the HyperShift operator onto the current cluster session
    async fn install(&self, operator_image: Option<String>) -> Result<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClusterCreator: Send + Sync {
    /// Create one hosted cluster; returns once the tool exits
    async fn create_cluster(&self, request: &ProvisioningRequest, api_key: &ApiKey) -> Result<()>;
}

/// `hypershift` binary backed implementation
pub struct HypershiftCli {
    program: PathBuf,
}

impl HypershiftCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

pub(crate) fn install_args(operator_image: Option<&str>) -> Vec<String> {
    let mut args = vec!["install".to_string()];
    if let Some(image) = operator_image {
        args.push("--hypershift-image".to_string());
        args.push(image.to_string());
    }
    args
}

pub(crate) fn create_cluster_args(request: &ProvisioningRequest) -> Vec<String> {
    let mut args: Vec<String> = vec!["create".into(), "cluster".into(), "powervs".into()];
    let mut flag = |name: &str, value: String| {
        args.push(format!("--{}", name));
        args.push(value);
    };

    flag("name", request.name.clone());
    flag("infra-id", request.infra_id.clone());
    flag("namespace", request.namespace.clone());
    flag("region", request.region.clone());
    flag("zone", request.zone.clone());
    flag("vpc-region", request.vpc_region.clone());
    flag("resource-group", request.resource_group.clone());
    flag("base-domain", request.base_domain.clone());
    flag("pull-secret", request.pull_secret_path.display().to_string());
    flag("ssh-key", request.ssh_key_path.display().to_string());
    flag("release-image", request.release_image.clone());
    flag("node-pool-replicas", request.node_pool_replicas.to_string());
    flag(
        "control-plane-availability-policy",
        platform::CONTROL_PLANE_AVAILABILITY.to_string(),
    );
    flag("service-cidr", platform::SERVICE_CIDR.to_string());
    flag("cluster-cidr", platform::POD_CIDR.to_string());
    flag("sys-type", platform::SYS_TYPE.to_string());
    flag("proc-type", platform::PROC_TYPE.to_string());
    flag("processors", platform::PROCESSORS.to_string());
    flag("memory", platform::MEMORY_GIB.to_string());
    if let Some(image) = &request.control_plane_operator_image {
        flag("control-plane-operator-image", image.clone());
    }

    args
}

#[async_trait]
impl PrereqInstaller for HypershiftCli {
    #[instrument(skip(self))]
    async fn install(&self, operator_image: Option<String>) -> Result<()> {
        let args = install_args(operator_image.as_deref());
        info!("Running {} {}", self.program.display(), args.join(" "));
        run_tool(&self.program, &args, &[])
            .await
            .map_err(ProvisionError::PrereqInstallError)?;
        Ok(())
    }
}

#[async_trait]
impl ClusterCreator for HypershiftCli {
    #[instrument(skip(self, request, api_key), fields(cluster = %request.name))]
    async fn create_cluster(&self, request: &ProvisioningRequest, api_key: &ApiKey) -> Result<()> {
        let args = create_cluster_args(request);
        debug!("Running {} {}", self.program.display(), args.join(" "));
        run_tool(&self.program, &args, &[(API_KEY_ENV, api_key.expose())])
            .await
            .map_err(|e| ProvisionError::ClusterCreationError(format!("{}: {}", request.name, e)))?;
        Ok(())
    }
}
