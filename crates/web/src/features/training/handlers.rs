use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        attempt::{AttemptQuery, CreateAttemptRequest},
        common::{ApiResponse, optional_uuid_param, require_uuid_param},
        progress::{ProgressQuery, ProgressSummary},
    },
    models::{Attempt, AttemptWithScenario},
};
use validator::Validate;

use crate::error::WebError;
use crate::extract::{ApiJson, ApiQuery};

use super::services;

#[utoipa::path(
    get,
    path = "/api/training/progress",
    params(ProgressQuery),
    responses(
        (status = 200, description = "Progress statistics wrapped in the success envelope", body = ProgressSummary),
        (status = 400, description = "userId missing or malformed")
    ),
    tag = "training"
)]
pub async fn get_progress(
    State(db): State<Database>,
    ApiQuery(query): ApiQuery<ProgressQuery>,
) -> Result<Response, WebError> {
    let user_id =
        require_uuid_param(query.user_id.as_deref(), "userId").map_err(WebError::BadRequest)?;

    let summary = services::get_progress(db.pool(), user_id).await?;

    Ok(Json(ApiResponse::success(summary)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/training/attempts",
    params(AttemptQuery),
    responses(
        (status = 200, description = "Attempts, most recent first", body = Vec<AttemptWithScenario>),
        (status = 400, description = "userId missing or malformed")
    ),
    tag = "training"
)]
pub async fn list_attempts(
    State(db): State<Database>,
    ApiQuery(query): ApiQuery<AttemptQuery>,
) -> Result<Response, WebError> {
    let user_id =
        require_uuid_param(query.user_id.as_deref(), "userId").map_err(WebError::BadRequest)?;
    let scenario_id = optional_uuid_param(query.scenario_id.as_deref(), "scenarioId")
        .map_err(WebError::BadRequest)?;

    let attempts = services::list_attempts(db.pool(), user_id, scenario_id).await?;

    Ok(Json(ApiResponse::success(attempts)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/training/attempts",
    request_body = CreateAttemptRequest,
    responses(
        (status = 201, description = "Attempt recorded", body = Attempt),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User or scenario does not exist")
    ),
    tag = "training"
)]
pub async fn record_attempt(
    State(db): State<Database>,
    ApiJson(req): ApiJson<CreateAttemptRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let attempt = services::record_attempt(db.pool(), &req).await?;

    tracing::info!(
        attempt_id = %attempt.attempt_id,
        user_id = %attempt.user_id,
        scenario_id = %attempt.scenario_id,
        passed = attempt.passed,
        checks_completed = attempt.checklist.completed_count(),
        "Training attempt recorded"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::success(attempt))).into_response())
}
