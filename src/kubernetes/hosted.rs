// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Read back the hosted clusters a run asked for

use kube::{api::ListParams, Api, Client, ResourceExt};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::types::{HostedCluster, HostedClusterPhase};

/// Phase of every requested cluster name, `Missing` when the managing cluster has no such object
#[instrument(skip(client, names))]
pub async fn hosted_cluster_phases(
    client: &Client,
    namespace: &str,
    names: &[String],
) -> Result<BTreeMap<String, HostedClusterPhase>> {
    let hosted_clusters: Api<HostedCluster> = Api::namespaced(client.clone(), namespace);
    let list = hosted_clusters.list(&ListParams::default()).await?;

    let found: BTreeMap<String, HostedCluster> = list
        .items
        .into_iter()
        .map(|hc| (hc.name_any(), hc))
        .collect();

    Ok(names
        .iter()
        .map(|name| {
            let phase = match found.get(name) {
                Some(hc) => {
                    debug!(
                        "Hosted cluster {} has infra ID {} and release {}",
                        hc.display_name(),
                        hc.spec.infra_id.as_deref().unwrap_or("<unset>"),
                        hc.release_image().unwrap_or("<unset>")
                    );
                    if hc.is_degraded() {
                        warn!("Hosted cluster {} reports Degraded", hc.display_name());
                    }
                    if let Some(message) = hc.availability_message() {
                        info!("Hosted cluster {}: {}", hc.display_name(), message);
                    }
                    hc.phase()
                }
                None => HostedClusterPhase::Missing,
            };
            (name.clone(), phase)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{hosted_cluster_list_json, MockKubeApi};

    const LIST_PATH: &str = "/apis/hypershift.openshift.io/v1beta1/namespaces/clusters/hostedclusters";

    #[tokio::test]
    async fn test_phases_for_requested_names() {
        let api = MockKubeApi::new().on_get(
            LIST_PATH,
            200,
            &hosted_cluster_list_json(
                "clusters",
                &[("osa21-hyp-e2e", "True"), ("osa22-hyp-e2e", "False"), ("other", "True")],
            ),
        );
        let names = vec![
            "osa21-hyp-e2e".to_string(),
            "osa22-hyp-e2e".to_string(),
            "tok04-hyp-e2e".to_string(),
        ];

        let phases = hosted_cluster_phases(&api.into_client(), "clusters", &names)
            .await
            .unwrap();

        assert_eq!(phases.len(), 3);
        assert_eq!(phases["osa21-hyp-e2e"], HostedClusterPhase::Available);
        assert_eq!(phases["osa22-hyp-e2e"], HostedClusterPhase::Progressing);
        assert_eq!(phases["tok04-hyp-e2e"], HostedClusterPhase::Missing);
    }

    #[tokio::test]
    async fn test_list_failure_propagates() {
        let api = MockKubeApi::new();

        let result =
            hosted_cluster_phases(&api.into_client(), "clusters", &["osa21-hyp-e2e".to_string()])
                .await;

        assert!(result.is_err());
    }
}
