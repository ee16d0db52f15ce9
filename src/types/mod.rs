// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Shared domain types.

pub mod credentials;
pub mod hosted_cluster;

pub use credentials::{ApiKey, BearerToken};
pub use hosted_cluster::{HostedCluster, HostedClusterPhase};
