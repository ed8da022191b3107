use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::RequireStaff;
use crate::modules::attendance::model::{Attendance, CreateAttendanceDto, UpdateAttendanceDto};
use crate::modules::attendance::service::AttendanceService;
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListAttendanceQuery {
    pub class_id: Option<i32>,
    pub student_id: Option<i32>,
    pub date: Option<NaiveDate>,
}

#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendanceDto,
    responses(
        (status = 201, description = "Attendance recorded", body = Attendance),
        (status = 400, description = "Invalid status or already marked today", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn create_attendance(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateAttendanceDto>,
) -> Result<(StatusCode, Json<Attendance>), AppError> {
    let attendance = AttendanceService::create_attendance(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(attendance)))
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(ListAttendanceQuery),
    responses((status = 200, description = "Attendance records", body = [Attendance])),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, _current))]
pub async fn list_attendance(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(params): Query<ListAttendanceQuery>,
) -> Result<Json<Vec<Attendance>>, AppError> {
    let records = AttendanceService::list_attendance(
        &state.db,
        params.class_id,
        params.student_id,
        params.date,
    )
    .await?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/attendance/{id}",
    params(("id" = i32, Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Attendance record", body = Attendance),
        (status = 404, description = "Attendance record not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, _current))]
pub async fn get_attendance(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Attendance>, AppError> {
    let attendance = AttendanceService::get_attendance(&state.db, id).await?;
    Ok(Json(attendance))
}

#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    params(("id" = i32, Path, description = "Attendance record ID")),
    request_body = UpdateAttendanceDto,
    responses(
        (status = 200, description = "Attendance updated", body = Attendance),
        (status = 404, description = "Attendance record not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn update_attendance(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateAttendanceDto>,
) -> Result<Json<Attendance>, AppError> {
    let attendance = AttendanceService::update_attendance(&state.db, id, dto).await?;
    Ok(Json(attendance))
}
