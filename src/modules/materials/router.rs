use axum::{Router, routing::{get, post}};

use crate::modules::materials::controller::{
    create_material, delete_material, get_material, list_materials, update_material,
};
use crate::state::AppState;

pub fn init_materials_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_material).get(list_materials))
        .route(
            "/{id}",
            get(get_material).put(update_material).delete(delete_material),
        )
}
