pub mod attempt;
pub mod common;
pub mod progress;
pub mod scenario;
