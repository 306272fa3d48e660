use axum::{
    Router,
    routing::get,
};
use storage::Database;

use super::handlers::{get_progress, list_attempts, record_attempt};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/progress", get(get_progress))
        .route("/attempts", get(list_attempts).post(record_attempt))
}
