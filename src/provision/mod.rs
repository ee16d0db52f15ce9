// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Planning and concurrent creation of the per-zone hosted clusters.

pub mod orchestrator;
pub mod release;
pub mod request;

pub use orchestrator::{FanoutReport, Orchestrator, ProvisioningOutcome};
pub use release::{ReleaseFeed, ReleaseResolver};
pub use request::{plan_targets, ClusterSettings, ClusterTarget, ProvisioningRequest};
