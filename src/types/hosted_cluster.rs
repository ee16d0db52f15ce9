// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};

/// The subset of the HyperShift HostedCluster resource this tool reads back
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "hypershift.openshift.io", version = "v1beta1", kind = "HostedCluster")]
#[kube(namespaced)]
#[kube(status = "HostedClusterStatus")]
#[serde(rename_all = "camelCase")]
pub struct HostedClusterSpec {
    #[serde(rename = "infraID", skip_serializing_if = "Option::is_none")]
    pub infra_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<Release>,
}

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
pub struct Release {
    pub image: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostedClusterStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Coarse state of a requested hosted cluster as seen on the managing cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostedClusterPhase {
    Available,
    Progressing,
    Missing,
}

impl HostedCluster {
    /// Check if the hosted control plane reports Available=True
    pub fn is_available(&self) -> bool {
        self.condition_is_true("Available")
    }

    /// Check if the hosted cluster reports Degraded=True
    pub fn is_degraded(&self) -> bool {
        self.condition_is_true("Degraded")
    }

    pub fn phase(&self) -> HostedClusterPhase {
        if self.is_available() {
            HostedClusterPhase::Available
        } else {
            HostedClusterPhase::Progressing
        }
    }

    /// Message of the Available condition, if the controller set one
    pub fn availability_message(&self) -> Option<&str> {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.as_ref())
            .and_then(|conditions| {
                conditions
                    .iter()
                    .find(|c| c.condition_type == "Available")
                    .and_then(|c| c.message.as_deref())
            })
    }

    pub fn release_image(&self) -> Option<&str> {
        self.spec.release.as_ref().map(|r| r.image.as_str())
    }

    pub fn display_name(&self) -> String {
        format!("{}/{}", self.namespace().unwrap_or_default(), self.name_any())
    }

    fn condition_is_true(&self, condition_type: &str) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.as_ref())
            .is_some_and(|conditions| {
                conditions
                    .iter()
                    .any(|c| c.condition_type == condition_type && c.status == "True")
            })
    }
}
