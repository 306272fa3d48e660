use sqlx::PgPool;
use storage::{
    dto::{attempt::CreateAttemptRequest, progress::ProgressSummary},
    error::Result,
    models::{Attempt, AttemptWithScenario},
    repository::attempt::AttemptRepository,
    services::progress,
};
use uuid::Uuid;

/// Record a completed training attempt
pub async fn record_attempt(pool: &PgPool, request: &CreateAttemptRequest) -> Result<Attempt> {
    let repo = AttemptRepository::new(pool);
    repo.create(request).await
}

/// List a user's attempts, optionally for one scenario
pub async fn list_attempts(
    pool: &PgPool,
    user_id: Uuid,
    scenario_id: Option<Uuid>,
) -> Result<Vec<AttemptWithScenario>> {
    let repo = AttemptRepository::new(pool);
    repo.list_for_user(user_id, scenario_id).await
}

/// Recompute a user's progress statistics from their attempts
pub async fn get_progress(pool: &PgPool, user_id: Uuid) -> Result<ProgressSummary> {
    let repo = AttemptRepository::new(pool);
    let attempts = repo.list_for_user(user_id, None).await?;

    Ok(progress::summarize(attempts))
}
