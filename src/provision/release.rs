// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Default release image lookup

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::{ProvisionError, Result};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReleaseResolver: Send + Sync {
    /// Resolve the release image to use when none is configured
    async fn resolve(&self) -> Result<String>;
}

/// Upgrade graph document served by the release feed
#[derive(Debug, Deserialize)]
pub struct ReleaseGraph {
    #[serde(default)]
    pub nodes: Vec<ReleaseNode>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseNode {
    pub version: String,
    pub payload: String,
}

impl ReleaseGraph {
    pub fn from_json(raw: &[u8]) -> Result<Self> {
        serde_json::from_slice(raw).map_err(|e| {
            ProvisionError::ReleaseResolutionError(format!("unexpected release feed document: {}", e))
        })
    }

    /// The node treated as "latest".
    ///
    /// This is the first node of the feed, which the graph does not order by
    /// version; the choice is kept so runs pick the same image as before.
    pub fn latest(&self) -> Option<&ReleaseNode> {
        self.nodes.first()
    }
}

/// Resolves the default release from an upgrade graph feed
pub struct ReleaseFeed {
    client: reqwest::Client,
    url: String,
}

impl ReleaseFeed {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ReleaseResolver for ReleaseFeed {
    #[instrument(skip(self), fields(feed = %self.url))]
    async fn resolve(&self) -> Result<String> {
        let body = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                ProvisionError::ReleaseResolutionError(format!("failed to query {}: {}", self.url, e))
            })?
            .bytes()
            .await
            .map_err(|e| {
                ProvisionError::ReleaseResolutionError(format!("failed to read {}: {}", self.url, e))
            })?;

        let graph = ReleaseGraph::from_json(&body)?;
        let node = graph.latest().ok_or_else(|| {
            ProvisionError::ReleaseResolutionError(format!("release feed {} has no nodes", self.url))
        })?;

        info!("Using release {} ({})", node.version, node.payload);
        Ok(node.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{json_response, spawn_http_server};

    #[test]
    fn test_latest_is_first_node_not_highest_version() {
        let graph = ReleaseGraph::from_json(
            br#"{"nodes": [
                {"version": "4.13.9", "payload": "quay.io/ocp-release@sha256:aaa"},
                {"version": "4.14.1", "payload": "quay.io/ocp-release@sha256:bbb"}
            ], "edges": [[0, 1]]}"#,
        )
        .unwrap();

        assert_eq!(graph.latest().unwrap().payload, "quay.io/ocp-release@sha256:aaa");
    }

    #[test]
    fn test_empty_graph_has_no_latest() {
        let graph = ReleaseGraph::from_json(br#"{"nodes": []}"#).unwrap();
        assert!(graph.latest().is_none());
    }

    #[test]
    fn test_malformed_graph_rejected() {
        let err = ReleaseGraph::from_json(br#"{"nodes": [{"version": 1}]}"#).unwrap_err();
        assert!(matches!(err, ProvisionError::ReleaseResolutionError(_)));
    }

    #[tokio::test]
    async fn test_feed_resolves_first_payload() {
        let addr = spawn_http_server(|_req, _addr| {
            json_response(
                200,
                r#"{"nodes": [{"version": "4.14.3", "payload": "quay.io/ocp-release:4.14.3-multi"}]}"#,
            )
        })
        .await;
        let feed = ReleaseFeed::new(reqwest::Client::new(), format!("http://{}/graph", addr));

        assert_eq!(feed.resolve().await.unwrap(), "quay.io/ocp-release:4.14.3-multi");
    }

    #[tokio::test]
    async fn test_feed_error_status_is_resolution_error() {
        let addr = spawn_http_server(|_req, _addr| json_response(503, "{}")).await;
        let feed = ReleaseFeed::new(reqwest::Client::new(), format!("http://{}/graph", addr));

        let err = feed.resolve().await.unwrap_err();
        assert!(matches!(err, ProvisionError::ReleaseResolutionError(_)));
    }

    #[tokio::test]
    async fn test_feed_without_nodes_is_resolution_error() {
        let addr = spawn_http_server(|_req, _addr| json_response(200, r#"{"nodes": []}"#)).await;
        let feed = ReleaseFeed::new(reqwest::Client::new(), format!("http://{}/graph", addr));

        let err = feed.resolve().await.unwrap_err();
        assert!(err.to_string().contains("no nodes"));
    }
}
