// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Identity service client.
//!
//! Presents a bearer token plus the service API key to the identity
//! service and maps the outcome onto [`AuthError`].
//!
//! ## Behavior
//!
//! - Every call goes to the identity service; results are not cached
//! - No retries
//! - The whole call (connect, response, body) is bounded by the configured
//!   timeout; a timeout is treated like a rejected token

use reqwest::header::HeaderName;
use tracing::warn;
use url::Url;

use super::{AuthError, VerifiedIdentity};
use crate::config::IdentityConfig;

/// Failure to build an [`IdentityClient`] from configuration.
#[derive(Debug, thiserror::Error)]
pub enum IdentityClientError {
    #[error("failed to create HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid API key header name: {0}")]
    HeaderName(#[from] reqwest::header::InvalidHeaderName),
}

/// HTTP client for the external identity-verification endpoint.
#[derive(Clone)]
pub struct IdentityClient {
    verify_url: Url,
    api_key: String,
    api_key_header: HeaderName,
    client: reqwest::Client,
}

impl IdentityClient {
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityClientError> {
        Ok(Self {
            verify_url: config.verify_url.clone(),
            api_key: config.api_key.clone(),
            api_key_header: HeaderName::from_bytes(config.api_key_header.as_bytes())?,
            client: reqwest::Client::builder().timeout(config.timeout).build()?,
        })
    }

    pub fn verify_url(&self) -> &Url {
        &self.verify_url
    }

    /// Verify a bearer token with the identity service.
    pub async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let response = self
            .client
            .get(self.verify_url.clone())
            .bearer_auth(token)
            .header(self.api_key_header.clone(), &self.api_key)
            .send()
            .await
            .map_err(|e| transport_failure(&e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                reason = "invalid_credential",
                upstream_status = status.as_u16(),
                "Identity service rejected bearer token"
            );
            return Err(AuthError::InvalidCredential);
        }

        let body = response.bytes().await.map_err(|e| transport_failure(&e))?;
        if body.is_empty() {
            return Ok(VerifiedIdentity::new(serde_json::Value::Null));
        }
        let identity = serde_json::from_slice(&body).map_err(|e| {
            warn!(
                reason = "upstream_unavailable",
                error = %e,
                "Identity service returned an unreadable body"
            );
            AuthError::InvalidOrExpiredCredential
        })?;

        Ok(VerifiedIdentity::new(identity))
    }
}

/// Classify a reqwest failure. Timeouts count as a rejected token; anything
/// else means the identity service could not be reached.
fn transport_failure(err: &reqwest::Error) -> AuthError {
    if err.is_timeout() {
        warn!(reason = "upstream_timeout", error = %err, "Identity service call timed out");
        AuthError::InvalidCredential
    } else {
        warn!(reason = "upstream_unavailable", error = %err, "Identity service call failed");
        AuthError::InvalidOrExpiredCredential
    }
}
