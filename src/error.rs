// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("OAuth discovery failed: {0}")]
    DiscoveryError(String),

    #[error("Failed to extract access token: {0}")]
    TokenExtractionError(String),

    #[error("Cloud login failed: {0}")]
    CloudLoginError(String),

    #[error("Plugin install failed: {0}")]
    PluginInstallError(String),

    #[error("Managing cluster lookup failed: {0}")]
    ClusterLookupError(String),

    #[error("Cluster session login failed: {0}")]
    SessionLoginError(String),

    #[error("Prerequisite install failed: {0}")]
    PrereqInstallError(String),

    #[error("Cluster creation failed: {0}")]
    ClusterCreationError(String),

    #[error("Release image resolution failed: {0}")]
    ReleaseResolutionError(String),

    #[error("Failed to build kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
