use axum::{Router, routing::{get, post}};

use crate::modules::results::controller::{
    create_result, get_result, list_results, update_result,
};
use crate::state::AppState;

pub fn init_results_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_result).get(list_results))
        .route("/{id}", get(get_result).put(update_result))
}
