use axum::{Router, routing::{get, post}};

use crate::modules::exams::controller::{
    create_exam, delete_exam, get_exam, list_exams, update_exam,
};
use crate::state::AppState;

pub fn init_exams_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_exam).get(list_exams))
        .route("/{id}", get(get_exam).put(update_exam).delete(delete_exam))
}
