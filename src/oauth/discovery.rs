// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! OAuth authorization server metadata and the implicit-grant authorize URL

use serde::Deserialize;
use url::Url;

use crate::constants::oauth::{AUTHORIZE_PATH, CLIENT_ID, DISCOVERY_PATH};
use crate::error::{ProvisionError, Result};

/// The part of the authorization server metadata the token flow needs
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OAuthDiscovery {
    pub token_endpoint: String,
}

impl OAuthDiscovery {
    pub fn from_json(raw: &[u8]) -> Result<Self> {
        serde_json::from_slice(raw).map_err(|e| {
            ProvisionError::DiscoveryError(format!("unexpected discovery document: {}", e))
        })
    }

    pub fn authorize_url(&self) -> Result<Url> {
        authorize_url(&self.token_endpoint)
    }
}

/// Well-known metadata URL of a cluster API endpoint
pub fn discovery_url(api_endpoint: &Url) -> String {
    format!(
        "{}{}",
        api_endpoint.as_str().trim_end_matches('/'),
        DISCOVERY_PATH
    )
}

/// Build the implicit-grant authorize URL on the token endpoint's scheme and host
pub fn authorize_url(token_endpoint: &str) -> Result<Url> {
    let endpoint = Url::parse(token_endpoint).map_err(|e| {
        ProvisionError::DiscoveryError(format!("invalid token_endpoint {}: {}", token_endpoint, e))
    })?;
    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(ProvisionError::DiscoveryError(format!(
            "token_endpoint {} is not an http(s) URL",
            token_endpoint
        )));
    }

    let mut url = Url::parse(&endpoint.origin().ascii_serialization()).map_err(|e| {
        ProvisionError::DiscoveryError(format!("invalid token_endpoint {}: {}", token_endpoint, e))
    })?;
    url.set_path(AUTHORIZE_PATH);
    url.query_pairs_mut()
        .append_pair("client_id", CLIENT_ID)
        .append_pair("response_type", "token");
    Ok(url)
}
