// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bootstrap, then fan out.

use tracing::{error, info};

use crate::bootstrap::{Bootstrapper, ManagingCluster, ManagingClusterSession};
use crate::error::Result;
use crate::provision::{ClusterTarget, FanoutReport, Orchestrator};
use crate::types::ApiKey;

/// Prepare the managing cluster and, only if that succeeds, create every target cluster.
///
/// A bootstrap failure is returned before any provisioning task exists.
/// Provisioning failures never surface here; they are in the report.
pub async fn bootstrap_and_provision(
    bootstrapper: &Bootstrapper,
    managing: &ManagingCluster,
    api_key: &ApiKey,
    orchestrator: &Orchestrator,
    targets: Vec<ClusterTarget>,
) -> Result<(ManagingClusterSession, FanoutReport)> {
    let session = bootstrapper
        .run(managing, api_key)
        .await
        .inspect_err(|e| error!("Environment bootstrap failed: {}", e))?;

    info!("Bootstrap complete, provisioning {} clusters", targets.len());
    let report = orchestrator.run(targets).await;

    for failure in report.failures() {
        if let Err(e) = &failure.result {
            error!("Cluster {} failed: {}", failure.cluster, e);
        }
    }

    Ok((session, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::MockReadinessProbe;
    use crate::error::ProvisionError;
    use crate::oauth::MockTokenSource;
    use crate::provision::release::MockReleaseResolver;
    use crate::provision::ClusterSettings;
    use crate::tools::cloud::MockCloudCli;
    use crate::tools::cluster::MockClusterCli;
    use crate::tools::hypershift::{MockClusterCreator, MockPrereqInstaller};
    use crate::tools::ClusterDetails;
    use crate::types::BearerToken;
    use std::path::PathBuf;
    use std::sync::Arc;
    use url::Url;

    fn managing() -> ManagingCluster {
        ManagingCluster {
            name: "hyp-mgmt".to_string(),
            region: "jp-tok".to_string(),
            operator_image: None,
        }
    }

    fn settings() -> ClusterSettings {
        ClusterSettings {
            ssh_key_path: PathBuf::from("/keys/id.pub"),
            pull_secret_path: PathBuf::from("/keys/pull.json"),
            resource_group: "e2e".to_string(),
            base_domain: "example.com".to_string(),
            node_pool_replicas: 1,
            namespace: "clusters".to_string(),
            release_image: Some("img".to_string()),
            control_plane_operator_image: None,
        }
    }

    fn osa_targets() -> Vec<ClusterTarget> {
        vec![
            ClusterTarget::new("osa", "osa21", "jp-osa"),
            ClusterTarget::new("osa", "osa22", "jp-osa"),
        ]
    }

    fn orchestrator(creator: MockClusterCreator) -> Orchestrator {
        let mut resolver = MockReleaseResolver::new();
        resolver.expect_resolve().never();
        Orchestrator::new(
            Arc::new(creator),
            Arc::new(resolver),
            settings(),
            ApiKey::new("k"),
        )
    }

    fn bootstrapper(cloud: MockCloudCli, tokens: MockTokenSource) -> Bootstrapper {
        let mut cluster_cli = MockClusterCli::new();
        cluster_cli.expect_login().returning(|_, _| Ok(()));
        let mut installer = MockPrereqInstaller::new();
        installer.expect_install().returning(|_| Ok(()));
        let mut readiness = MockReadinessProbe::new();
        readiness.expect_wait_ready().returning(|_| Ok(()));
        Bootstrapper::new(
            Box::new(cloud),
            Box::new(tokens),
            Box::new(cluster_cli),
            Box::new(installer),
            Box::new(readiness),
        )
    }

    #[tokio::test]
    async fn test_lookup_failure_dispatches_no_tasks() {
        let mut cloud = MockCloudCli::new();
        cloud.expect_login().returning(|_, _| Ok(()));
        cloud.expect_install_plugin().returning(|_| Ok(()));
        cloud.expect_get_cluster().returning(|_| {
            Err(ProvisionError::ClusterLookupError(
                "cluster hyp-mgmt not found".to_string(),
            ))
        });
        let mut tokens = MockTokenSource::new();
        tokens.expect_acquire().never();
        let mut creator = MockClusterCreator::new();
        creator.expect_create_cluster().never();

        let result = bootstrap_and_provision(
            &bootstrapper(cloud, tokens),
            &managing(),
            &ApiKey::new("k"),
            &orchestrator(creator),
            osa_targets(),
        )
        .await;

        assert!(matches!(result, Err(ProvisionError::ClusterLookupError(_))));
    }

    #[tokio::test]
    async fn test_successful_bootstrap_fans_out_and_swallows_task_errors() {
        let mut cloud = MockCloudCli::new();
        cloud.expect_login().returning(|_, _| Ok(()));
        cloud.expect_install_plugin().returning(|_| Ok(()));
        cloud.expect_get_cluster().returning(|_| {
            Ok(ClusterDetails {
                master_url: Url::parse("https://mgmt.example.com:32385").unwrap(),
            })
        });
        let mut tokens = MockTokenSource::new();
        tokens
            .expect_acquire()
            .times(1)
            .returning(|_, _| Ok(BearerToken::new("t")));
        let mut creator = MockClusterCreator::new();
        creator
            .expect_create_cluster()
            .times(2)
            .returning(|req, _| {
                if req.zone == "osa22" {
                    Err(ProvisionError::ClusterCreationError(format!(
                        "{}: boom",
                        req.name
                    )))
                } else {
                    Ok(())
                }
            });

        let (session, report) = bootstrap_and_provision(
            &bootstrapper(cloud, tokens),
            &managing(),
            &ApiKey::new("k"),
            &orchestrator(creator),
            osa_targets(),
        )
        .await
        .unwrap();

        assert_eq!(session.token.expose(), "t");
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
    }
}
