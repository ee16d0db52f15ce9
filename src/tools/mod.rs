// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Adapters for the external command line tools a run drives.
//!
//! Each tool sits behind an async trait so the bootstrap and fan-out logic
//! can be exercised with mocks. The real implementations spawn processes and
//! map a failed exit to the error variant of the step that ran them.

pub mod cloud;
pub mod cluster;
pub mod hypershift;

pub use cloud::{CloudCli, ClusterDetails, IbmCloudCli};
pub use cluster::{ClusterCli, OcCli};
pub use hypershift::{ClusterCreator, HypershiftCli, PrereqInstaller};

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Run a tool to completion and return its stdout.
///
/// Spawn failures and non-zero exits are returned as a message that carries
/// the exit status and the tool's stderr.
pub(crate) async fn run_tool(
    program: &Path,
    args: &[String],
    envs: &[(&str, &str)],
) -> std::result::Result<Vec<u8>, String> {
    debug!("Running {} {}", program.display(), args.first().map(String::as_str).unwrap_or(""));

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        cmd.env(key, value);
    }

    let output = cmd
        .output()
        .await
        .map_err(|e| format!("failed to run {}: {}", program.display(), e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "{} exited with {}: {}",
            program.display(),
            output.status,
            stderr.trim()
        ));
    }

    Ok(output.stdout)
}
