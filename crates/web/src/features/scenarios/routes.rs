use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use storage::Database;

use super::handlers::{create_scenario, get_scenario, list_scenarios, update_scenario};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_scenario))
        .route("/:id", put(update_scenario))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_scenarios))
        .route("/:id", get(get_scenario))
        .merge(protected)
}
