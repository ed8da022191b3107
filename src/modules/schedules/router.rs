use axum::{Router, routing::{get, post}};

use crate::modules::schedules::controller::{
    create_schedule, delete_schedule, get_schedule, list_schedules, update_schedule,
};
use crate::state::AppState;

pub fn init_schedules_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_schedule).get(list_schedules))
        .route(
            "/{id}",
            get(get_schedule)
                .put(update_schedule)
                .delete(delete_schedule),
        )
}
