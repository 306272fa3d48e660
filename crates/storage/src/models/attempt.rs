use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::Difficulty;

/// Crane position picked on the site plan, in site coordinates (metres)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Pre-lift checks the trainee ticked off before committing the lift
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    #[serde(default)]
    pub capacity_checked: bool,
    #[serde(default)]
    pub radius_checked: bool,
    #[serde(default)]
    pub ground_bearing_checked: bool,
    #[serde(default)]
    pub obstacles_checked: bool,
    #[serde(default)]
    pub outriggers_checked: bool,
}

impl Checklist {
    pub fn completed_count(&self) -> usize {
        [
            self.capacity_checked,
            self.radius_checked,
            self.ground_bearing_checked,
            self.obstacles_checked,
            self.outriggers_checked,
        ]
        .into_iter()
        .filter(|checked| *checked)
        .count()
    }
}

/// One completed training session. Written once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub attempt_id: Uuid,
    pub user_id: Uuid,
    pub scenario_id: Uuid,
    pub equipment_id: String,
    #[schema(value_type = Position)]
    pub selected_position: sqlx::types::Json<Position>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub checklist: Checklist,
    pub score: Option<i32>,
    pub passed: bool,
    pub time_taken_seconds: i32,
    pub completed_at: DateTime<Utc>,
}

/// Attempt joined with the scenario metadata the progress views need
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttemptWithScenario {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub attempt: Attempt,
    pub scenario_title: String,
    pub difficulty: Difficulty,
    /// How many attempts this user has made on the same scenario
    pub scenario_attempt_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checklist_completed_count() {
        let checklist = Checklist {
            capacity_checked: true,
            radius_checked: true,
            outriggers_checked: true,
            ..Default::default()
        };
        assert_eq!(checklist.completed_count(), 3);
        assert_eq!(Checklist::default().completed_count(), 0);
    }

    #[test]
    fn test_attempt_json_is_flat_camel_case() {
        let attempt = Attempt {
            attempt_id: Uuid::nil(),
            user_id: Uuid::nil(),
            scenario_id: Uuid::nil(),
            equipment_id: "ltm-1100".to_string(),
            selected_position: sqlx::types::Json(Position { x: 12.5, y: 4.0 }),
            checklist: Checklist {
                ground_bearing_checked: true,
                ..Default::default()
            },
            score: Some(88),
            passed: true,
            time_taken_seconds: 340,
            completed_at: Utc::now(),
        };

        let value = serde_json::to_value(&attempt).unwrap();
        assert_eq!(value["equipmentId"], "ltm-1100");
        assert_eq!(value["groundBearingChecked"], true);
        assert_eq!(value["capacityChecked"], false);
        assert_eq!(value["selectedPosition"]["x"], 12.5);
        assert_eq!(value["timeTakenSeconds"], 340);
        assert!(value.get("checklist").is_none());
    }
}
