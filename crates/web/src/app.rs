use std::time::Duration;

use axum::{Router, routing::get};
use storage::Database;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features;
use crate::middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::training::handlers::get_progress,
        features::training::handlers::list_attempts,
        features::training::handlers::record_attempt,
        features::scenarios::handlers::list_scenarios,
        features::scenarios::handlers::get_scenario,
        features::scenarios::handlers::create_scenario,
        features::scenarios::handlers::update_scenario,
        features::health::health_check,
    ),
    components(
        schemas(
            storage::dto::attempt::CreateAttemptRequest,
            storage::dto::scenario::CreateScenarioRequest,
            storage::dto::scenario::UpdateScenarioRequest,
            storage::dto::progress::ProgressSummary,
            storage::dto::progress::DifficultyBreakdown,
            storage::models::Scenario,
            storage::models::Difficulty,
            storage::models::Attempt,
            storage::models::AttemptWithScenario,
            storage::models::Checklist,
            storage::models::Position,
        )
    ),
    tags(
        (name = "training", description = "Training attempts and progress"),
        (name = "scenarios", description = "Training scenario catalogue"),
        (name = "health", description = "Liveness"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

pub fn build_router(db: Database, api_keys: ApiKeys) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(features::health::health_check))
        .nest("/api/scenarios", features::scenarios::routes(api_keys))
        .nest("/api/training", features::training::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(db)
}
