// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bearer token acquisition against an OpenShift OAuth server.

pub mod discovery;
pub mod token;

pub use discovery::{authorize_url, OAuthDiscovery};
pub use token::{extract_access_token, TokenAcquirer};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use url::Url;

use crate::error::Result;
use crate::types::{ApiKey, BearerToken};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Obtain a bearer token for a cluster API endpoint
    async fn acquire(&self, api_endpoint: &Url, api_key: &ApiKey) -> Result<BearerToken>;
}
