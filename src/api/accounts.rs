// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use super::extract::JsonBody;
use crate::{
    error::ApiError,
    models::{AccountView, LoginRequest, LoginResponse, MessageResponse, RegisterRequest},
    services::Registration,
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    tag = "Accounts",
    responses(
        (status = 201, body = MessageResponse),
        (status = 400, description = "Missing field", body = MessageResponse),
        (status = 500, description = "Store failure, including an already registered email", body = MessageResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let account = state
        .accounts
        .register(Registration {
            name: request.name,
            email: request.email,
            department: request.department,
            password: request.password,
        })
        .await?;

    info!(account_id = %account.id, "Account registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    tag = "Accounts",
    responses(
        (status = 200, body = LoginResponse),
        (status = 400, description = "User not found or invalid credentials", body = MessageResponse),
        (status = 500, body = MessageResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let account = state
        .accounts
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: AccountView::from(account),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use wiremock::MockServer;

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            name: "A".into(),
            email: email.into(),
            department: "Eng".into(),
            password: "pw".into(),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server);

        let (status, Json(body)) = register(State(state.clone()), JsonBody(register_request("a@x.com")))
            .await
            .expect("registration succeeds");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.message, "User registered successfully");

        let Json(response) = login(
            State(state),
            JsonBody(LoginRequest {
                email: "a@x.com".into(),
                password: "pw".into(),
            }),
        )
        .await
        .expect("login succeeds");
        assert_eq!(response.user.email, "a@x.com");
        assert!(!response.user.is_verified);
    }

    #[tokio::test]
    async fn duplicate_registration_is_store_error() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server);

        register(State(state.clone()), JsonBody(register_request("a@x.com")))
            .await
            .unwrap();
        let err = register(State(state), JsonBody(register_request("a@x.com")))
            .await
            .err()
            .unwrap();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_bad_request() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server);
        register(State(state.clone()), JsonBody(register_request("a@x.com")))
            .await
            .unwrap();

        let err = login(
            State(state),
            JsonBody(LoginRequest {
                email: "a@x.com".into(),
                password: "nope".into(),
            }),
        )
        .await
        .err()
        .unwrap();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid credentials");
    }
}
