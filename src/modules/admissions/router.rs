use axum::{Router, routing::{get, post}};

use crate::modules::admissions::controller::{
    approve_admission, get_admission, list_admissions, reject_admission, submit_admission,
};
use crate::state::AppState;

pub fn init_admissions_router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_admission).get(list_admissions))
        .route("/{id}", get(get_admission))
        .route("/{id}/approve", post(approve_admission))
        .route("/{id}/reject", post(reject_admission))
}
