pub mod attempt;
pub mod scenario;
