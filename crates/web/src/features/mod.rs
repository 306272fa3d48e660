pub mod health;
pub mod scenarios;
pub mod training;
