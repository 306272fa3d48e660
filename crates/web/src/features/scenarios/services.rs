use sqlx::PgPool;
use storage::{
    dto::scenario::{CreateScenarioRequest, ScenarioFilter, UpdateScenarioRequest},
    error::Result,
    models::Scenario,
    repository::scenario::ScenarioRepository,
};
use uuid::Uuid;

/// List scenarios matching the filter
pub async fn list_scenarios(pool: &PgPool, filter: &ScenarioFilter) -> Result<Vec<Scenario>> {
    let repo = ScenarioRepository::new(pool);
    repo.list(filter).await
}

pub async fn get_scenario(pool: &PgPool, id: Uuid) -> Result<Scenario> {
    let repo = ScenarioRepository::new(pool);
    repo.find_by_id(id).await
}

/// Create a new scenario
pub async fn create_scenario(pool: &PgPool, request: &CreateScenarioRequest) -> Result<Scenario> {
    let repo = ScenarioRepository::new(pool);
    repo.create(request).await
}

/// Update a scenario
pub async fn update_scenario(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateScenarioRequest,
) -> Result<Scenario> {
    let repo = ScenarioRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}
