use axum::{Router, routing::{get, post}};

use crate::modules::reviews::controller::{
    create_review, delete_review, get_review, list_reviews,
};
use crate::state::AppState;

pub fn init_reviews_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review).get(list_reviews))
        .route("/{id}", get(get_review).delete(delete_review))
}
