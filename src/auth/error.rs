// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Reason a protected request was rejected.
///
/// Every variant is reported to the client as 401; the variants only differ
/// in logs and in the `error_code` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No Authorization header, or it does not carry a `Bearer ` token.
    /// The identity service is not contacted.
    MissingOrMalformedCredential,
    /// The identity service answered with a non-success status, or did not
    /// answer within the configured timeout.
    InvalidCredential,
    /// The call to the identity service failed (connect error, broken
    /// response, unreadable body).
    InvalidOrExpiredCredential,
}

#[derive(Serialize)]
struct AuthErrorBody {
    message: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingOrMalformedCredential => "missing_or_malformed_credential",
            AuthError::InvalidCredential => "invalid_credential",
            AuthError::InvalidOrExpiredCredential => "invalid_or_expired_credential",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingOrMalformedCredential => {
                write!(f, "Authorization header is required (expected 'Bearer <token>')")
            }
            AuthError::InvalidCredential => write!(f, "Invalid token"),
            AuthError::InvalidOrExpiredCredential => write!(f, "Invalid or expired token"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            message: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_credential_returns_401() {
        let response = AuthError::MissingOrMalformedCredential.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "missing_or_malformed_credential");
        assert!(body["message"].as_str().unwrap().contains("Bearer"));
    }

    #[test]
    fn every_variant_is_unauthorized() {
        for err in [
            AuthError::MissingOrMalformedCredential,
            AuthError::InvalidCredential,
            AuthError::InvalidOrExpiredCredential,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }
}
