// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes access to the managing cluster: client creation from the
//! bootstrap session, CRD readiness, and hosted cluster read-back.

pub mod client;
pub mod crd;
pub mod hosted;

pub use client::client_for_session;
pub use crd::{wait_for_hosted_cluster_crd, CrdWait, HostedClusterCrdProbe};
pub use hosted::hosted_cluster_phases;
