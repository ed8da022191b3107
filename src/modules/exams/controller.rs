use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use utoipa::IntoParams;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::{RequireAdmin, RequireStaff};
use crate::modules::auth::model::ErrorResponse;
use crate::modules::exams::model::{CreateExamDto, Exam, UpdateExamDto};
use crate::modules::exams::service::ExamService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListExamsQuery {
    pub class_id: Option<i32>,
    pub subject_id: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/api/exams",
    request_body = CreateExamDto,
    responses(
        (status = 201, description = "Exam created", body = Exam),
        (status = 404, description = "Subject not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state, dto))]
pub async fn create_exam(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateExamDto>,
) -> Result<(StatusCode, Json<Exam>), AppError> {
    let exam = ExamService::create_exam(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(exam)))
}

#[utoipa::path(
    get,
    path = "/api/exams",
    params(ListExamsQuery),
    responses((status = 200, description = "List of exams", body = [Exam])),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state, _current))]
pub async fn list_exams(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(params): Query<ListExamsQuery>,
) -> Result<Json<Vec<Exam>>, AppError> {
    let exams = ExamService::list_exams(&state.db, params.class_id, params.subject_id).await?;
    Ok(Json(exams))
}

#[utoipa::path(
    get,
    path = "/api/exams/{id}",
    params(("id" = i32, Path, description = "Exam ID")),
    responses(
        (status = 200, description = "Exam details", body = Exam),
        (status = 404, description = "Exam not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state, _current))]
pub async fn get_exam(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Exam>, AppError> {
    let exam = ExamService::get_exam(&state.db, id).await?;
    Ok(Json(exam))
}

#[utoipa::path(
    put,
    path = "/api/exams/{id}",
    params(("id" = i32, Path, description = "Exam ID")),
    request_body = UpdateExamDto,
    responses(
        (status = 200, description = "Exam updated", body = Exam),
        (status = 404, description = "Exam not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state, dto))]
pub async fn update_exam(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateExamDto>,
) -> Result<Json<Exam>, AppError> {
    let exam = ExamService::update_exam(&state.db, id, dto).await?;
    Ok(Json(exam))
}

#[utoipa::path(
    delete,
    path = "/api/exams/{id}",
    params(("id" = i32, Path, description = "Exam ID")),
    responses(
        (status = 200, description = "Exam deleted"),
        (status = 400, description = "Exam still has results", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
#[instrument(skip(state))]
pub async fn delete_exam(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    ExamService::delete_exam(&state.db, id).await?;
    Ok(Json(json!({"message": "Exam deleted successfully"})))
}
