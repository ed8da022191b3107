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
use crate::modules::schedules::model::{ClassSchedule, CreateScheduleDto, UpdateScheduleDto};
use crate::modules::schedules::service::ScheduleService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListSchedulesQuery {
    pub class_id: Option<i32>,
    pub teacher_id: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/api/schedules",
    request_body = CreateScheduleDto,
    responses(
        (status = 201, description = "Schedule entry created", body = ClassSchedule),
        (status = 400, description = "Validation error or teacher slot conflict", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state, dto))]
pub async fn create_schedule(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateScheduleDto>,
) -> Result<(StatusCode, Json<ClassSchedule>), AppError> {
    let schedule = ScheduleService::create_schedule(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

#[utoipa::path(
    get,
    path = "/api/schedules",
    params(ListSchedulesQuery),
    responses((status = 200, description = "Schedule entries", body = [ClassSchedule])),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state, _current))]
pub async fn list_schedules(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(params): Query<ListSchedulesQuery>,
) -> Result<Json<Vec<ClassSchedule>>, AppError> {
    let schedules =
        ScheduleService::list_schedules(&state.db, params.class_id, params.teacher_id).await?;
    Ok(Json(schedules))
}

#[utoipa::path(
    get,
    path = "/api/schedules/{id}",
    params(("id" = i32, Path, description = "Schedule entry ID")),
    responses(
        (status = 200, description = "Schedule entry", body = ClassSchedule),
        (status = 404, description = "Schedule entry not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state, _current))]
pub async fn get_schedule(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<ClassSchedule>, AppError> {
    let schedule = ScheduleService::get_schedule(&state.db, id).await?;
    Ok(Json(schedule))
}

#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    params(("id" = i32, Path, description = "Schedule entry ID")),
    request_body = UpdateScheduleDto,
    responses(
        (status = 200, description = "Schedule entry updated", body = ClassSchedule),
        (status = 400, description = "Validation error or teacher slot conflict", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state, dto))]
pub async fn update_schedule(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateScheduleDto>,
) -> Result<Json<ClassSchedule>, AppError> {
    let schedule = ScheduleService::update_schedule(&state.db, id, dto).await?;
    Ok(Json(schedule))
}

#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    params(("id" = i32, Path, description = "Schedule entry ID")),
    responses(
        (status = 200, description = "Schedule entry deleted"),
        (status = 404, description = "Schedule entry not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
#[instrument(skip(state))]
pub async fn delete_schedule(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    ScheduleService::delete_schedule(&state.db, id).await?;
    Ok(Json(json!({"message": "Schedule entry deleted successfully"})))
}
