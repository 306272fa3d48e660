pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

mod database;

pub use database::{Database, DatabaseOptions};
