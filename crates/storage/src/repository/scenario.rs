use sqlx::{PgPool, Postgres, QueryBuilder, types::Json};
use uuid::Uuid;

use crate::dto::scenario::{CreateScenarioRequest, ScenarioFilter, UpdateScenarioRequest};
use crate::error::{Result, StorageError};
use crate::models::Scenario;

/// Repository for training scenario definitions
pub struct ScenarioRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScenarioRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List scenarios matching the filter, ordered by difficulty then title
    pub async fn list(&self, filter: &ScenarioFilter) -> Result<Vec<Scenario>> {
        let mut query = list_query(filter);

        let scenarios = query
            .build_query_as::<Scenario>()
            .fetch_all(self.pool)
            .await?;

        Ok(scenarios)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Scenario> {
        let scenario = sqlx::query_as::<_, Scenario>(
            r#"
            SELECT scenario_id, title, description, difficulty, category,
                   estimated_duration_minutes, learning_objectives,
                   site_width, site_length, load_weight, load_height, load_fragile,
                   passing_score, created_at, updated_at
            FROM training_scenarios
            WHERE scenario_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(scenario)
    }

    /// Insert a scenario. Titles are not required to be unique.
    pub async fn create(&self, req: &CreateScenarioRequest) -> Result<Scenario> {
        let scenario = sqlx::query_as::<_, Scenario>(
            r#"
            INSERT INTO training_scenarios (
                title, description, difficulty, category, estimated_duration_minutes,
                learning_objectives, site_width, site_length, load_weight, load_height,
                load_fragile, passing_score
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING scenario_id, title, description, difficulty, category,
                      estimated_duration_minutes, learning_objectives,
                      site_width, site_length, load_weight, load_height, load_fragile,
                      passing_score, created_at, updated_at
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.difficulty)
        .bind(&req.category)
        .bind(req.estimated_duration_minutes)
        .bind(Json(&req.learning_objectives))
        .bind(req.site_width)
        .bind(req.site_length)
        .bind(req.load_weight)
        .bind(req.load_height)
        .bind(req.load_fragile)
        .bind(req.passing_score)
        .fetch_one(self.pool)
        .await
        .map_err(map_check_violation)?;

        Ok(scenario)
    }

    /// Apply a partial update on top of the stored scenario
    pub async fn update(
        &self,
        existing: &Scenario,
        req: &UpdateScenarioRequest,
    ) -> Result<Scenario> {
        let title = req.title.as_ref().unwrap_or(&existing.title);
        let description = req.description.as_ref().unwrap_or(&existing.description);
        let difficulty = req.difficulty.unwrap_or(existing.difficulty);
        let category = req.category.as_ref().unwrap_or(&existing.category);
        let estimated_duration_minutes = req
            .estimated_duration_minutes
            .unwrap_or(existing.estimated_duration_minutes);
        let learning_objectives = req
            .learning_objectives
            .as_ref()
            .unwrap_or(&existing.learning_objectives.0);

        let scenario = sqlx::query_as::<_, Scenario>(
            r#"
            UPDATE training_scenarios
            SET title = $2,
                description = $3,
                difficulty = $4,
                category = $5,
                estimated_duration_minutes = $6,
                learning_objectives = $7,
                site_width = $8,
                site_length = $9,
                load_weight = $10,
                load_height = $11,
                load_fragile = $12,
                passing_score = $13,
                updated_at = now()
            WHERE scenario_id = $1
            RETURNING scenario_id, title, description, difficulty, category,
                      estimated_duration_minutes, learning_objectives,
                      site_width, site_length, load_weight, load_height, load_fragile,
                      passing_score, created_at, updated_at
            "#,
        )
        .bind(existing.scenario_id)
        .bind(title)
        .bind(description)
        .bind(difficulty)
        .bind(category)
        .bind(estimated_duration_minutes)
        .bind(Json(learning_objectives))
        .bind(req.site_width.unwrap_or(existing.site_width))
        .bind(req.site_length.unwrap_or(existing.site_length))
        .bind(req.load_weight.unwrap_or(existing.load_weight))
        .bind(req.load_height.unwrap_or(existing.load_height))
        .bind(req.load_fragile.unwrap_or(existing.load_fragile))
        .bind(req.passing_score.unwrap_or(existing.passing_score))
        .fetch_optional(self.pool)
        .await
        .map_err(map_check_violation)?
        .ok_or(StorageError::NotFound)?;

        Ok(scenario)
    }
}

fn map_check_violation(error: sqlx::Error) -> StorageError {
    let error = StorageError::from(error);
    if error.is_check_violation() {
        StorageError::ConstraintViolation("Scenario values are out of range".to_string())
    } else {
        error
    }
}

fn list_query(filter: &ScenarioFilter) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new(
        r#"
        SELECT scenario_id, title, description, difficulty, category,
               estimated_duration_minutes, learning_objectives,
               site_width, site_length, load_weight, load_height, load_fragile,
               passing_score, created_at, updated_at
        FROM training_scenarios
        WHERE 1=1
        "#,
    );

    if let Some(difficulty) = filter.difficulty {
        query.push(" AND difficulty = ");
        query.push_bind(difficulty);
    }

    if let Some(category) = filter.category() {
        query.push(" AND category = ");
        query.push_bind(category);
    }

    query.push(" ORDER BY difficulty, title");
    query
}
