use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::ApiResponse,
        scenario::{CreateScenarioRequest, ScenarioFilter, UpdateScenarioRequest},
    },
    models::Scenario,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};

use super::services;

#[utoipa::path(
    get,
    path = "/api/scenarios",
    params(ScenarioFilter),
    responses(
        (status = 200, description = "Scenarios ordered by difficulty then title", body = Vec<Scenario>)
    ),
    tag = "scenarios"
)]
pub async fn list_scenarios(
    State(db): State<Database>,
    ApiQuery(filter): ApiQuery<ScenarioFilter>,
) -> Result<Response, WebError> {
    let scenarios = services::list_scenarios(db.pool(), &filter).await?;

    Ok(Json(ApiResponse::success(scenarios)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/scenarios/{id}",
    params(
        ("id" = Uuid, Path, description = "Scenario id")
    ),
    responses(
        (status = 200, description = "Scenario found", body = Scenario),
        (status = 404, description = "Scenario not found")
    ),
    tag = "scenarios"
)]
pub async fn get_scenario(
    State(db): State<Database>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Response, WebError> {
    let scenario = services::get_scenario(db.pool(), id).await?;

    Ok(Json(ApiResponse::success(scenario)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/scenarios",
    request_body = CreateScenarioRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Scenario created", body = Scenario),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "scenarios"
)]
pub async fn create_scenario(
    State(db): State<Database>,
    ApiJson(req): ApiJson<CreateScenarioRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let scenario = services::create_scenario(db.pool(), &req).await?;

    tracing::info!(
        scenario_id = %scenario.scenario_id,
        title = %scenario.title,
        difficulty = scenario.difficulty.as_str(),
        "Scenario created"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::success(scenario))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/scenarios/{id}",
    params(
        ("id" = Uuid, Path, description = "Scenario id")
    ),
    request_body = UpdateScenarioRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Scenario updated", body = Scenario),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Scenario not found")
    ),
    tag = "scenarios"
)]
pub async fn update_scenario(
    State(db): State<Database>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(update_req): ApiJson<UpdateScenarioRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_scenario(db.pool(), id, &update_req).await?;

    Ok(Json(ApiResponse::success(updated)).into_response())
}
