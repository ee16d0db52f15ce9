// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Concurrent fan-out of cluster creations.
//!
//! Every target gets its own task. Tasks share nothing mutable: each one
//! resolves its release, builds its own request and reports a
//! [`ProvisioningOutcome`]. A failing task never cancels or delays its
//! siblings, and the run only returns once every task has finished.
//!
//! There is no timeout or cancellation once a creation is dispatched; a hung
//! lifecycle tool holds the whole run at the join point.

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, Instrument};

use super::release::ReleaseResolver;
use super::request::{ClusterSettings, ClusterTarget, ProvisioningRequest};
use crate::error::{ProvisionError, Result};
use crate::tools::ClusterCreator;
use crate::types::ApiKey;

/// Result of one provisioning task
#[derive(Debug)]
pub struct ProvisioningOutcome {
    pub target: ClusterTarget,
    pub cluster: String,
    pub result: Result<()>,
}

impl ProvisioningOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a fan-out, in the order the targets were given
#[derive(Debug, Default)]
pub struct FanoutReport {
    pub outcomes: Vec<ProvisioningOutcome>,
}

impl FanoutReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn cluster_names(&self) -> Vec<String> {
        self.outcomes.iter().map(|o| o.cluster.clone()).collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProvisioningOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

pub struct Orchestrator {
    creator: Arc<dyn ClusterCreator>,
    resolver: Arc<dyn ReleaseResolver>,
    settings: Arc<ClusterSettings>,
    api_key: ApiKey,
}

impl Orchestrator {
    pub fn new(
        creator: Arc<dyn ClusterCreator>,
        resolver: Arc<dyn ReleaseResolver>,
        settings: ClusterSettings,
        api_key: ApiKey,
    ) -> Self {
        Self {
            creator,
            resolver,
            settings: Arc::new(settings),
            api_key,
        }
    }

    /// Create one cluster per target concurrently and wait for all of them
    pub async fn run(&self, targets: Vec<ClusterTarget>) -> FanoutReport {
        info!("Dispatching {} cluster creations", targets.len());

        let (targets, handles): (Vec<_>, Vec<_>) = targets
            .into_iter()
            .map(|target| {
                let span = info_span!("provision", cluster = %target.cluster_name());
                let task = provision_one(
                    target.clone(),
                    self.creator.clone(),
                    self.resolver.clone(),
                    self.settings.clone(),
                    self.api_key.clone(),
                )
                .instrument(span);
                (target, tokio::spawn(task))
            })
            .unzip();

        let outcomes = join_all(handles)
            .await
            .into_iter()
            .zip(targets)
            .map(|(joined, target)| {
                joined.unwrap_or_else(|e| {
                    let cluster = target.cluster_name();
                    error!("Provisioning task for {} did not finish: {}", cluster, e);
                    ProvisioningOutcome {
                        result: Err(ProvisionError::ClusterCreationError(format!(
                            "{}: task aborted: {}",
                            cluster, e
                        ))),
                        cluster,
                        target,
                    }
                })
            })
            .collect();

        let report = FanoutReport { outcomes };
        info!(
            "All {} provisioning tasks finished: {} succeeded, {} failed",
            report.outcomes.len(),
            report.succeeded(),
            report.failed()
        );
        report
    }
}

async fn provision_one(
    target: ClusterTarget,
    creator: Arc<dyn ClusterCreator>,
    resolver: Arc<dyn ReleaseResolver>,
    settings: Arc<ClusterSettings>,
    api_key: ApiKey,
) -> ProvisioningOutcome {
    let cluster = target.cluster_name();
    info!(
        "Creating cluster {} in region {}, zone {}, vpc region {}",
        cluster, target.region, target.zone, target.vpc_region
    );

    let result = create(&target, creator.as_ref(), resolver.as_ref(), &settings, &api_key).await;
    match &result {
        Ok(()) => info!("Cluster {} created", cluster),
        Err(e) => error!("Failed to create cluster {}: {}", cluster, e),
    }

    ProvisioningOutcome {
        target,
        cluster,
        result,
    }
}

async fn create(
    target: &ClusterTarget,
    creator: &dyn ClusterCreator,
    resolver: &dyn ReleaseResolver,
    settings: &ClusterSettings,
    api_key: &ApiKey,
) -> Result<()> {
    // Each task does its own lookup, nothing is cached between tasks
    let release_image = match &settings.release_image {
        Some(image) => image.clone(),
        None => resolver.resolve().await?,
    };

    let request = ProvisioningRequest::new(target, settings, release_image);
    debug!("Provisioning request: {:?}", request);
    creator.create_cluster(&request, api_key).await
}
