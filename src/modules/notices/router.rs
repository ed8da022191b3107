use axum::{Router, routing::{get, post}};

use crate::modules::notices::controller::{
    create_notice, delete_notice, get_notice, list_notices, update_notice,
};
use crate::state::AppState;

pub fn init_notices_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_notice).get(list_notices))
        .route(
            "/{id}",
            get(get_notice).put(update_notice).delete(delete_notice),
        )
}
