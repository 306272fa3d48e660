use crate::dto::progress::{DifficultyBreakdown, ProgressSummary};
use crate::models::AttemptWithScenario;

/// Number of attempts surfaced in `ProgressSummary::recent_attempts`
pub const RECENT_ATTEMPTS_LIMIT: usize = 5;

/// Derive a user's progress statistics from their attempts.
///
/// A missing score counts as 0 and still counts toward the average's
/// denominator. Averages are rounded to the nearest integer, halves up.
/// Attempts are ordered most recent first before `recent_attempts` is taken;
/// ties keep their input order.
pub fn summarize(mut attempts: Vec<AttemptWithScenario>) -> ProgressSummary {
    if attempts.is_empty() {
        return ProgressSummary::default();
    }

    attempts.sort_by(|a, b| b.attempt.completed_at.cmp(&a.attempt.completed_at));

    let total_attempts = attempts.len() as i64;
    let passed_attempts = attempts.iter().filter(|a| a.attempt.passed).count() as i64;

    let score_sum: i64 = attempts
        .iter()
        .map(|a| i64::from(score_of(a)))
        .sum();
    let average_score = (score_sum as f64 / total_attempts as f64).round() as i32;

    let best_score = attempts.iter().map(score_of).max().unwrap_or(0);

    let recent_attempts = attempts
        .iter()
        .take(RECENT_ATTEMPTS_LIMIT)
        .cloned()
        .collect();

    let mut by_difficulty = DifficultyBreakdown::default();
    for attempt in attempts {
        by_difficulty.bucket_mut(attempt.difficulty).push(attempt);
    }

    ProgressSummary {
        total_attempts,
        passed_attempts,
        average_score,
        best_score,
        by_difficulty,
        recent_attempts,
    }
}

fn score_of(attempt: &AttemptWithScenario) -> i32 {
    attempt.attempt.score.unwrap_or(0)
}
