use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::modules::users::controller::{
    create_user, get_user, list_users, update_user, update_user_password,
};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/{id}", get(get_user).put(update_user))
        .route("/{id}/password", patch(update_user_password))
}
