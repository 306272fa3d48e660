use sqlx::{PgPool, Postgres, QueryBuilder, types::Json};
use uuid::Uuid;

use crate::dto::attempt::CreateAttemptRequest;
use crate::error::{Result, StorageError};
use crate::models::{Attempt, AttemptWithScenario};

pub struct AttemptRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AttemptRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a completed attempt. The id and completion time are assigned by
    /// the database.
    pub async fn create(&self, req: &CreateAttemptRequest) -> Result<Attempt> {
        let attempt = sqlx::query_as::<_, Attempt>(
            r#"
            INSERT INTO training_attempts (
                user_id, scenario_id, equipment_id, selected_position,
                capacity_checked, radius_checked, ground_bearing_checked,
                obstacles_checked, outriggers_checked,
                score, passed, time_taken_seconds
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING attempt_id, user_id, scenario_id, equipment_id, selected_position,
                      capacity_checked, radius_checked, ground_bearing_checked,
                      obstacles_checked, outriggers_checked,
                      score, passed, time_taken_seconds, completed_at
            "#,
        )
        .bind(req.user_id)
        .bind(req.scenario_id)
        .bind(&req.equipment_id)
        .bind(Json(req.selected_position))
        .bind(req.checklist.capacity_checked)
        .bind(req.checklist.radius_checked)
        .bind(req.checklist.ground_bearing_checked)
        .bind(req.checklist.obstacles_checked)
        .bind(req.checklist.outriggers_checked)
        .bind(req.score)
        .bind(req.passed)
        .bind(req.time_taken_seconds)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e)
                .on_foreign_key_violation("Referenced user or scenario does not exist")
        })?;

        Ok(attempt)
    }

    /// A user's attempts joined with scenario metadata, most recent first.
    ///
    /// Each row carries the number of attempts the user made on the same
    /// scenario, computed with a window over the selected rows.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        scenario_id: Option<Uuid>,
    ) -> Result<Vec<AttemptWithScenario>> {
        let mut query = list_for_user_query(user_id, scenario_id);

        let attempts = query
            .build_query_as::<AttemptWithScenario>()
            .fetch_all(self.pool)
            .await?;

        Ok(attempts)
    }
}

fn list_for_user_query(user_id: Uuid, scenario_id: Option<Uuid>) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        r#"
        SELECT
            a.attempt_id, a.user_id, a.scenario_id, a.equipment_id, a.selected_position,
            a.capacity_checked, a.radius_checked, a.ground_bearing_checked,
            a.obstacles_checked, a.outriggers_checked,
            a.score, a.passed, a.time_taken_seconds, a.completed_at,
            s.title AS scenario_title,
            s.difficulty,
            COUNT(*) OVER (PARTITION BY a.scenario_id) AS scenario_attempt_count
        FROM training_attempts a
        INNER JOIN training_scenarios s ON s.scenario_id = a.scenario_id
        WHERE a.user_id =
        "#,
    );
    query.push_bind(user_id);

    if let Some(scenario_id) = scenario_id {
        query.push(" AND a.scenario_id = ");
        query.push_bind(scenario_id);
    }

    query.push(" ORDER BY a.completed_at DESC, a.attempt_id");
    query
}
