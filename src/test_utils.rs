// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: a mocked Kubernetes API for `kube::Client` and a small
//! real HTTP server for the OAuth and release feed flows.

use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::net::TcpListener;
use tower::Service;

/// A mock Kubernetes API that answers GET requests by exact path
#[derive(Clone, Default)]
pub struct MockKubeApi {
    responses: Arc<Mutex<HashMap<String, (u16, String)>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockKubeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.to_string()));
        self
    }

    /// Paths requested so far, in order
    pub fn requested_paths(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn into_client(self) -> Client {
        Client::new(self, "clusters")
    }
}

impl Service<Request<Body>> for MockKubeApi {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let path = req.uri().path().to_string();
        self.requests.lock().unwrap().push(path.clone());
        let response = if req.method() == http::Method::GET {
            self.responses.lock().unwrap().get(&path).cloned()
        } else {
            None
        };

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json(&path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Kubernetes Status body for a 404
pub fn not_found_json(path: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} not found", path),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// `/apis` discovery body listing the given groups at the given version
pub fn api_group_list_json(groups: &[(&str, &str)]) -> String {
    let groups: Vec<_> = groups
        .iter()
        .map(|(name, version)| {
            let group_version = format!("{}/{}", name, version);
            serde_json::json!({
                "name": name,
                "versions": [{ "groupVersion": group_version, "version": version }],
                "preferredVersion": { "groupVersion": group_version, "version": version }
            })
        })
        .collect();
    serde_json::json!({ "kind": "APIGroupList", "apiVersion": "v1", "groups": groups }).to_string()
}

/// `/apis/<group>/<version>` discovery body with one namespaced resource
pub fn api_resource_list_json(group_version: &str, plural: &str, kind: &str) -> String {
    serde_json::json!({
        "kind": "APIResourceList",
        "apiVersion": "v1",
        "groupVersion": group_version,
        "resources": [{
            "name": plural,
            "singularName": kind.to_lowercase(),
            "namespaced": true,
            "kind": kind,
            "verbs": ["get", "list", "watch", "create", "delete"]
        }]
    })
    .to_string()
}

/// HostedClusterList body; each entry is (name, Available condition status)
pub fn hosted_cluster_list_json(namespace: &str, clusters: &[(&str, &str)]) -> String {
    let items: Vec<_> = clusters
        .iter()
        .map(|(name, available)| {
            serde_json::json!({
                "apiVersion": "hypershift.openshift.io/v1beta1",
                "kind": "HostedCluster",
                "metadata": { "name": name, "namespace": namespace },
                "spec": { "infraID": format!("{}-infra", name) },
                "status": {
                    "conditions": [{ "type": "Available", "status": available, "message": "test" }]
                }
            })
        })
        .collect();
    serde_json::json!({
        "apiVersion": "hypershift.openshift.io/v1beta1",
        "kind": "HostedClusterList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// Start an HTTP/1 server on a random loopback port.
///
/// The handler also receives the server address so it can build absolute
/// URLs that point back at itself.
pub async fn spawn_http_server<F>(handler: F) -> SocketAddr
where
    F: Fn(&Request<Incoming>, SocketAddr) -> Response<Full<Bytes>> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let handler = handler.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let response = (*handler)(&req, addr);
                    async move { Ok::<_, Infallible>(response) }
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    addr
}

pub fn json_response(status: u16, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

pub fn text_response(status: u16, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("content-type", "text/plain")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

pub fn redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(302)
        .header("location", location)
        .body(Full::new(Bytes::new()))
        .unwrap()
}
