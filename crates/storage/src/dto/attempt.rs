use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Checklist, Position};

/// Request payload submitted by the training UI when a session completes.
///
/// `passed` is computed client-side against the scenario's passing score.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttemptRequest {
    pub user_id: Uuid,

    pub scenario_id: Uuid,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Equipment id must be between 1 and 100 characters"
    ))]
    pub equipment_id: String,

    pub selected_position: Position,

    #[serde(flatten)]
    pub checklist: Checklist,

    #[validate(range(min = 0, message = "Score must not be negative"))]
    pub score: Option<i32>,

    pub passed: bool,

    #[validate(range(min = 0, message = "Time taken must not be negative"))]
    pub time_taken_seconds: i32,
}

/// Query string for listing a user's attempts
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AttemptQuery {
    /// Owner of the attempts (required)
    pub user_id: Option<String>,
    /// Restrict to a single scenario
    pub scenario_id: Option<String>,
}
