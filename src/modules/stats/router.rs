use axum::{Router, routing::get};

use crate::modules::stats::controller::dashboard;
use crate::state::AppState;

pub fn init_stats_router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}
