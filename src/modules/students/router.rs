use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::modules::students::controller::{
    create_student, delete_student, get_student, get_student_attendance,
    get_student_exam_results, get_student_notices, get_student_study_materials,
    get_student_subjects, list_students, update_student, update_student_password,
};
use crate::state::AppState;

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(list_students))
        .route(
            "/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/{id}/password", patch(update_student_password))
        .route("/{id}/attendance", get(get_student_attendance))
        .route("/{id}/exam-results", get(get_student_exam_results))
        .route("/{id}/subjects", get(get_student_subjects))
        .route("/{id}/study-materials", get(get_student_study_materials))
        .route("/{id}/notices", get(get_student_notices))
}
