// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for verified identities.
//!
//! Use the `Auth` extractor in handlers that require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     // identity is VerifiedIdentity
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::{middleware::authorize, AuthError, VerifiedIdentity};
use crate::state::AppState;

/// Extractor for a verified identity.
///
/// Reuses the identity placed in the request extensions by
/// `require_identity`; on routes without that middleware it runs the same
/// authorization itself.
pub struct Auth(pub VerifiedIdentity);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<VerifiedIdentity>().cloned() {
            return Ok(Auth(identity));
        }

        let identity = authorize(parts.headers.get(AUTHORIZATION), &state.identity).await?;
        parts.extensions.insert(identity.clone());
        Ok(Auth(identity))
    }
}
