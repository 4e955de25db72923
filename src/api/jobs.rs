// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use super::extract::JsonBody;
use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreateJobRequest, CreateJobResponse, MessageResponse},
    services::{JobDraft, JobWindow},
    state::AppState,
    storage::JobPosting,
};

#[utoipa::path(
    post,
    path = "/add-job",
    request_body = CreateJobRequest,
    tag = "Jobs",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, body = CreateJobResponse),
        (status = 400, description = "Missing field", body = MessageResponse),
        (status = 401, description = "Missing, invalid or expired credential"),
        (status = 500, body = MessageResponse)
    )
)]
pub async fn add_job(
    State(state): State<AppState>,
    Auth(identity): Auth,
    JsonBody(request): JsonBody<CreateJobRequest>,
) -> Result<(StatusCode, Json<CreateJobResponse>), ApiError> {
    let job = state
        .jobs
        .create_job(JobDraft {
            title: request.title,
            description: request.description,
            link: request.link,
        })
        .await?;

    info!(job_id = %job.id, subject = ?identity.subject(), "Job posted");
    Ok((
        StatusCode::CREATED,
        Json(CreateJobResponse {
            message: "Job added successfully".to_string(),
            job,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/all-jobs",
    tag = "Jobs",
    responses(
        (status = 200, description = "Postings, newest first", body = [JobPosting]),
        (status = 500, body = MessageResponse)
    )
)]
pub async fn all_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobPosting>>, ApiError> {
    let window = JobWindow::from(state.jobs_config.all_jobs);
    Ok(Json(state.jobs.list_jobs(window).await?))
}

#[utoipa::path(
    get,
    path = "/latest-jobs",
    tag = "Jobs",
    responses(
        (status = 200, description = "Postings inside the latest window, newest first", body = [JobPosting]),
        (status = 500, body = MessageResponse)
    )
)]
pub async fn latest_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobPosting>>, ApiError> {
    let window = JobWindow::Since(state.jobs_config.latest_window);
    Ok(Json(state.jobs.list_jobs(window).await?))
}
