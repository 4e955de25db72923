// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization gate for protected routes.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/add-job", post(add_job))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         require_identity,
//!     ));
//! ```
//!
//! On success the [`VerifiedIdentity`] is inserted into the request
//! extensions, where the `Auth` extractor picks it up.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use super::{AuthError, IdentityClient, VerifiedIdentity};
use crate::state::AppState;

/// Scheme prefix required on the Authorization header (case-sensitive).
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the bearer token from a raw Authorization header value.
///
/// Values that are not visible ASCII are malformed even after a `Bearer ` prefix.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let raw = header
        .ok_or(AuthError::MissingOrMalformedCredential)?
        .to_str()
        .map_err(|_| AuthError::MissingOrMalformedCredential)?;

    let token = raw
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MissingOrMalformedCredential)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingOrMalformedCredential);
    }
    Ok(token)
}

/// Authorize a request from its Authorization header.
///
/// Malformed or missing headers are rejected without contacting the
/// identity service. Every other request is verified from scratch.
pub async fn authorize(
    header: Option<&HeaderValue>,
    verifier: &IdentityClient,
) -> Result<VerifiedIdentity, AuthError> {
    let token = bearer_token(header).inspect_err(|_| {
        warn!(
            reason = "missing_or_malformed",
            "Rejected request without a bearer token"
        );
    })?;

    let identity = verifier.verify(token).await?;
    debug!(subject = ?identity.subject(), "Bearer token verified");
    Ok(identity)
}

/// Middleware that rejects unauthenticated requests with 401.
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let result = authorize(request.headers().get(AUTHORIZATION), &state.identity).await;

    match result {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}
