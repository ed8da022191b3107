use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::modules::teachers::controller::{
    create_teacher, delete_teacher, get_teacher, get_teacher_classes, get_teacher_exams,
    get_teacher_schedule, get_teacher_students, get_teacher_subjects, list_teachers,
    update_teacher, update_teacher_password,
};
use crate::state::AppState;

pub fn init_teachers_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_teacher).get(list_teachers))
        .route(
            "/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
        .route("/{id}/password", patch(update_teacher_password))
        .route("/{id}/subjects", get(get_teacher_subjects))
        .route("/{id}/classes", get(get_teacher_classes))
        .route("/{id}/students", get(get_teacher_students))
        .route("/{id}/exams", get(get_teacher_exams))
        .route("/{id}/schedule", get(get_teacher_schedule))
}
