mod attempt;
mod scenario;

pub use attempt::{Attempt, AttemptWithScenario, Checklist, Position};
pub use scenario::{Difficulty, Scenario};
