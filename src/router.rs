use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::modules::admissions::router::init_admissions_router;
use crate::modules::attendance::router::init_attendance_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::classes::controller::public_classes;
use crate::modules::classes::router::init_classes_router;
use crate::modules::exams::router::init_exams_router;
use crate::modules::materials::router::init_materials_router;
use crate::modules::notices::controller::landing_notices;
use crate::modules::notices::router::init_notices_router;
use crate::modules::results::router::init_results_router;
use crate::modules::reviews::router::init_reviews_router;
use crate::modules::schedules::router::init_schedules_router;
use crate::modules::stats::router::init_stats_router;
use crate::modules::students::router::init_students_router;
use crate::modules::subjects::router::init_subjects_router;
use crate::modules::teachers::router::init_teachers_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    // Per-route guards live in the handlers; the /api/public subtree and
    // the admission form are the only unauthenticated surfaces.
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/users", init_users_router())
                .nest("/classes", init_classes_router())
                .nest("/teachers", init_teachers_router())
                .nest("/students", init_students_router())
                .nest("/subjects", init_subjects_router())
                .nest("/schedules", init_schedules_router())
                .nest("/attendance", init_attendance_router())
                .nest("/exams", init_exams_router())
                .nest("/exam-results", init_results_router())
                .nest("/study-materials", init_materials_router())
                .nest("/notices", init_notices_router())
                .nest("/teacher-reviews", init_reviews_router())
                .nest("/admissions", init_admissions_router())
                .nest("/stats", init_stats_router())
                .route("/public/classes", get(public_classes))
                .route("/public/notices", get(landing_notices)),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}
