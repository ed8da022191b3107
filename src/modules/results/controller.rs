use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::RequireStaff;
use crate::modules::auth::model::ErrorResponse;
use crate::modules::results::model::{CreateResultDto, ExamResult, UpdateResultDto};
use crate::modules::results::service::ResultService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListResultsQuery {
    pub exam_id: Option<i32>,
    pub student_id: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/api/exam-results",
    request_body = CreateResultDto,
    responses(
        (status = 201, description = "Result recorded", body = ExamResult),
        (status = 400, description = "Marks out of range or result already recorded", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Exam results"
)]
#[instrument(skip(state, dto))]
pub async fn create_result(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateResultDto>,
) -> Result<(StatusCode, Json<ExamResult>), AppError> {
    let result = ResultService::create_result(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    get,
    path = "/api/exam-results",
    params(ListResultsQuery),
    responses((status = 200, description = "Exam results", body = [ExamResult])),
    security(("bearer_auth" = [])),
    tag = "Exam results"
)]
#[instrument(skip(state))]
pub async fn list_results(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<ListResultsQuery>,
) -> Result<Json<Vec<ExamResult>>, AppError> {
    let results =
        ResultService::list_results(&state.db, params.exam_id, params.student_id).await?;
    Ok(Json(results))
}

#[utoipa::path(
    get,
    path = "/api/exam-results/{id}",
    params(("id" = i32, Path, description = "Result ID")),
    responses(
        (status = 200, description = "Exam result", body = ExamResult),
        (status = 404, description = "Exam result not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Exam results"
)]
#[instrument(skip(state, _current))]
pub async fn get_result(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<ExamResult>, AppError> {
    let result = ResultService::get_result(&state.db, id).await?;
    Ok(Json(result))
}

#[utoipa::path(
    put,
    path = "/api/exam-results/{id}",
    params(("id" = i32, Path, description = "Result ID")),
    request_body = UpdateResultDto,
    responses(
        (status = 200, description = "Result updated", body = ExamResult),
        (status = 400, description = "Marks out of range", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Exam results"
)]
#[instrument(skip(state, dto))]
pub async fn update_result(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateResultDto>,
) -> Result<Json<ExamResult>, AppError> {
    let result = ResultService::update_result(&state.db, id, dto).await?;
    Ok(Json(result))
}
