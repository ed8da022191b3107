use axum::{Router, routing::{get, post}};

use crate::modules::attendance::controller::{
    create_attendance, get_attendance, list_attendance, update_attendance,
};
use crate::state::AppState;

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_attendance).get(list_attendance))
        .route("/{id}", get(get_attendance).put(update_attendance))
}
