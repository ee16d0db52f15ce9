// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! OpenShift CLI adapter

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::path::PathBuf;
use tracing::{info, instrument};
use url::Url;

use super::run_tool;
use crate::error::{ProvisionError, Result};
use crate::types::BearerToken;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClusterCli: Send + Sync {
    /// Establish a local session against an API server with a bearer token
    async fn login(&self, token: &BearerToken, server: &Url) -> Result<()>;
}

/// `oc` backed implementation
pub struct OcCli {
    program: PathBuf,
}

impl OcCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

/// API server URL the way `oc` expects it, without a trailing slash
pub(crate) fn server_arg(server: &Url) -> String {
    server.as_str().trim_end_matches('/').to_string()
}

#[async_trait]
impl ClusterCli for OcCli {
    #[instrument(skip(self, token, server), fields(server = %server))]
    async fn login(&self, token: &BearerToken, server: &Url) -> Result<()> {
        info!("Logging in to {} with bearer token", server_arg(server));
        let args = vec![
            "login".to_string(),
            format!("--token={}", token.expose()),
            format!("--server={}", server_arg(server)),
        ];
        run_tool(&self.program, &args, &[])
            .await
            .map_err(ProvisionError::SessionLoginError)?;
        Ok(())
    }
}
