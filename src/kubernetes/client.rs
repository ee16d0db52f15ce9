// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation for the managing cluster session

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use tracing::{debug, instrument};

use crate::bootstrap::ManagingClusterSession;
use crate::error::{ProvisionError, Result};

const CONTEXT_NAME: &str = "managing-cluster";

/// Render a kubeconfig document that authenticates with the session's bearer token
pub fn render_kubeconfig(session: &ManagingClusterSession, namespace: &str) -> Result<String> {
    let server = session.api_server.as_str().trim_end_matches('/');
    let document = serde_json::json!({
        "apiVersion": "v1",
        "kind": "Config",
        "clusters": [{ "name": CONTEXT_NAME, "cluster": { "server": server } }],
        "users": [{ "name": CONTEXT_NAME, "user": { "token": session.token.expose() } }],
        "contexts": [{
            "name": CONTEXT_NAME,
            "context": { "cluster": CONTEXT_NAME, "user": CONTEXT_NAME, "namespace": namespace }
        }],
        "current-context": CONTEXT_NAME
    });

    serde_yaml::to_string(&document)
        .map_err(|e| ProvisionError::KubeconfigError(format!("Failed to render kubeconfig: {}", e)))
}

/// Create a Kubernetes client for the managing cluster
#[instrument(skip(session), fields(server = %session.api_server))]
pub async fn client_for_session(session: &ManagingClusterSession, namespace: &str) -> Result<Client> {
    debug!("Creating Kubernetes client for managing cluster");
    let kubeconfig = render_kubeconfig(session, namespace)?;
    create_client_from_kubeconfig(&kubeconfig).await
}

/// Create a Kubernetes client from a kubeconfig string
async fn create_client_from_kubeconfig(kubeconfig: &str) -> Result<Client> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| ProvisionError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    let client_config =
        kube::Config::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
            .await
            .map_err(|e| {
                ProvisionError::KubeconfigError(format!("Failed to create config: {}", e))
            })?;

    Client::try_from(client_config)
        .map_err(|e| ProvisionError::KubeconfigError(format!("Failed to create client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BearerToken;
    use url::Url;

    fn make_session() -> ManagingClusterSession {
        ManagingClusterSession {
            api_server: Url::parse("https://c115-e.jp-tok.containers.cloud.ibm.com:32385").unwrap(),
            token: BearerToken::new("sha256~token"),
        }
    }

    #[test]
    fn test_rendered_kubeconfig_parses() {
        let rendered = render_kubeconfig(&make_session(), "clusters").unwrap();

        let kubeconfig: Kubeconfig = serde_yaml::from_str(&rendered).unwrap();

        assert_eq!(kubeconfig.current_context.as_deref(), Some(CONTEXT_NAME));
        assert_eq!(kubeconfig.clusters.len(), 1);
        assert_eq!(
            kubeconfig.clusters[0]
                .cluster
                .as_ref()
                .and_then(|c| c.server.as_deref()),
            Some("https://c115-e.jp-tok.containers.cloud.ibm.com:32385")
        );
        assert_eq!(kubeconfig.auth_infos.len(), 1);
    }

    #[tokio::test]
    async fn test_client_for_session_uses_session_server() {
        let client = client_for_session(&make_session(), "clusters").await.unwrap();
        assert_eq!(client.default_namespace(), "clusters");
    }
}
