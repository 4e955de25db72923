// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::require_identity,
    config::CorsOrigins,
    models::{
        AccountView, CreateJobRequest, CreateJobResponse, LoginRequest, LoginResponse,
        MessageResponse, RegisterRequest,
    },
    state::AppState,
    storage::JobPosting,
};

pub mod accounts;
pub mod extract;
pub mod health;
pub mod jobs;

pub fn router(state: AppState, cors: &CorsOrigins) -> Router {
    let protected_routes = Router::new()
        .route("/add-job", post(jobs::add_job))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_identity,
        ));

    let public_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/all-jobs", get(jobs::all_jobs))
        .route("/latest-jobs", get(jobs::latest_jobs));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer(cors))
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::permissive(),
        CorsOrigins::List(list) => {
            let allowed: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(%origin, "Ignoring unparseable CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
                .max_age(Duration::from_secs(600))
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health,
        health::liveness,
        health::readiness,
        accounts::register,
        accounts::login,
        jobs::add_job,
        jobs::all_jobs,
        jobs::latest_jobs
    ),
    components(
        schemas(
            JobPosting,
            AccountView,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateJobRequest,
            CreateJobResponse,
            MessageResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Accounts", description = "Registration and login"),
        (name = "Jobs", description = "Job postings")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;
    use wiremock::MockServer;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server);
        let app = router(state, &CorsOrigins::List(vec!["https://app.example.com".into()]));
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server);
        let app = router(state, &CorsOrigins::Any);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[test]
    fn openapi_lists_job_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/add-job"));
        assert!(doc.paths.paths.contains_key("/latest-jobs"));
    }
}
