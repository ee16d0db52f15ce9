// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Headless implicit-grant token acquisition.
//!
//! The OAuth server answers the authorize request with a redirect whose
//! fragment carries the token. Fragments are never sent to a server, so the
//! redirects are followed here rather than by the HTTP client, and the token
//! is read from the last `Location` reached, not from any header or body.

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::{form_urlencoded, Url};

use super::discovery::{discovery_url, OAuthDiscovery};
use super::TokenSource;
use crate::constants::oauth::{
    ACCESS_TOKEN_KEY, BASIC_AUTH_USER, CSRF_HEADER, CSRF_VALUE, MAX_REDIRECTS,
};
use crate::error::{ProvisionError, Result};
use crate::types::{ApiKey, BearerToken};

/// Pull the access token out of the fragment of a final redirect URL
pub fn extract_access_token(final_url: &Url) -> Result<BearerToken> {
    let location = format!("{}{}", final_url.origin().ascii_serialization(), final_url.path());
    let fragment = final_url.fragment().ok_or_else(|| {
        ProvisionError::TokenExtractionError(format!("no fragment in final URL {}", location))
    })?;

    form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == ACCESS_TOKEN_KEY)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .map(BearerToken::new)
        .ok_or_else(|| {
            ProvisionError::TokenExtractionError(format!(
                "no {} in fragment of final URL {}",
                ACCESS_TOKEN_KEY, location
            ))
        })
}

/// Obtains bearer tokens from an OpenShift OAuth server using an API key
pub struct TokenAcquirer {
    client: reqwest::Client,
}

impl TokenAcquirer {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()?;
        Ok(Self { client })
    }

    /// Fetch the authorization server metadata of a cluster API endpoint
    #[instrument(skip(self, api_endpoint), fields(endpoint = %api_endpoint))]
    pub async fn discover(&self, api_endpoint: &Url) -> Result<OAuthDiscovery> {
        let url = discovery_url(api_endpoint);
        debug!("Fetching {}", url);

        let body = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProvisionError::DiscoveryError(format!("error calling {}: {}", url, e)))?
            .bytes()
            .await
            .map_err(|e| {
                ProvisionError::DiscoveryError(format!("error reading response of {}: {}", url, e))
            })?;

        OAuthDiscovery::from_json(&body)
    }

    /// Send the authorize request and follow its redirects.
    ///
    /// Returns the first `Location` that carries a fragment, or the URL of the
    /// first non-redirect response. Credentials are only sent to the origin of
    /// the authorize endpoint.
    async fn authorize(&self, authorize_url: Url, api_key: &ApiKey) -> Result<Url> {
        let origin = authorize_url.origin();
        let mut current = authorize_url;

        for _ in 0..=MAX_REDIRECTS {
            debug!("Requesting {}", current.path());
            let mut request = self.client.get(current.clone()).header(CSRF_HEADER, CSRF_VALUE);
            if current.origin() == origin {
                request = request.basic_auth(BASIC_AUTH_USER, Some(api_key.expose()));
            }

            let response = request.send().await.map_err(|e| {
                ProvisionError::TokenExtractionError(format!("error calling {}: {}", current, e))
            })?;

            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok());
            let location = match location {
                Some(location) if response.status().is_redirection() => location,
                _ => {
                    debug!(
                        "Authorize flow ended at {} with status {}",
                        current.path(),
                        response.status()
                    );
                    return Ok(current);
                }
            };

            let next = current.join(location).map_err(|e| {
                ProvisionError::TokenExtractionError(format!(
                    "invalid redirect location from {}: {}",
                    current.path(),
                    e
                ))
            })?;
            if next.fragment().is_some() {
                debug!("Authorize flow redirected to {} with a fragment", next.path());
                return Ok(next);
            }
            current = next;
        }

        Err(ProvisionError::TokenExtractionError(format!(
            "more than {} redirects while authorizing",
            MAX_REDIRECTS
        )))
    }
}

#[async_trait]
impl TokenSource for TokenAcquirer {
    #[instrument(skip(self, api_endpoint, api_key), fields(endpoint = %api_endpoint))]
    async fn acquire(&self, api_endpoint: &Url, api_key: &ApiKey) -> Result<BearerToken> {
        let discovery = self.discover(api_endpoint).await?;
        let authorize_url = discovery.authorize_url()?;
        let final_url = self.authorize(authorize_url, api_key).await?;
        let token = extract_access_token(&final_url)?;
        info!("Obtained bearer token for {}", api_endpoint);
        Ok(token)
    }
}
