use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{AttemptWithScenario, Difficulty};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProgressQuery {
    /// User whose progress is summarised (required)
    pub user_id: Option<String>,
}

/// Statistics derived from every attempt a user has made
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_attempts: i64,
    pub passed_attempts: i64,
    pub average_score: i32,
    pub best_score: i32,
    pub by_difficulty: DifficultyBreakdown,
    pub recent_attempts: Vec<AttemptWithScenario>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct DifficultyBreakdown {
    pub beginner: Vec<AttemptWithScenario>,
    pub intermediate: Vec<AttemptWithScenario>,
    pub advanced: Vec<AttemptWithScenario>,
}

impl DifficultyBreakdown {
    pub fn bucket_mut(&mut self, difficulty: Difficulty) -> &mut Vec<AttemptWithScenario> {
        match difficulty {
            Difficulty::Beginner => &mut self.beginner,
            Difficulty::Intermediate => &mut self.intermediate,
            Difficulty::Advanced => &mut self.advanced,
        }
    }
}
