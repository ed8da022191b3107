use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::auth::controller::{login, logout, me, register_admin};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/logout", post(logout))
        .route("/register-admin", post(register_admin))
}
