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
use crate::middleware::role::RequireStaff;
use crate::modules::auth::model::ErrorResponse;
use crate::modules::notices::model::{CreateNoticeDto, Notice, UpdateNoticeDto};
use crate::modules::notices::service::NoticeService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListNoticesQuery {
    pub target_role: Option<String>,
    pub active_only: Option<bool>,
}

#[utoipa::path(
    post,
    path = "/api/notices",
    request_body = CreateNoticeDto,
    responses(
        (status = 201, description = "Notice published", body = Notice),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state, staff, dto))]
pub async fn create_notice(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateNoticeDto>,
) -> Result<(StatusCode, Json<Notice>), AppError> {
    let notice = NoticeService::create_notice(&state.db, staff.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(notice)))
}

#[utoipa::path(
    get,
    path = "/api/notices",
    params(ListNoticesQuery),
    responses((status = 200, description = "Notices", body = [Notice])),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state, _current))]
pub async fn list_notices(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(params): Query<ListNoticesQuery>,
) -> Result<Json<Vec<Notice>>, AppError> {
    let notices = NoticeService::list_notices(
        &state.db,
        params.target_role,
        params.active_only.unwrap_or(false),
    )
    .await?;
    Ok(Json(notices))
}

#[utoipa::path(
    get,
    path = "/api/notices/{id}",
    params(("id" = i32, Path, description = "Notice ID")),
    responses(
        (status = 200, description = "Notice", body = Notice),
        (status = 404, description = "Notice not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state, _current))]
pub async fn get_notice(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Notice>, AppError> {
    let notice = NoticeService::get_notice(&state.db, id).await?;
    Ok(Json(notice))
}

#[utoipa::path(
    put,
    path = "/api/notices/{id}",
    params(("id" = i32, Path, description = "Notice ID")),
    request_body = UpdateNoticeDto,
    responses(
        (status = 200, description = "Notice updated", body = Notice),
        (status = 404, description = "Notice not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state, dto))]
pub async fn update_notice(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateNoticeDto>,
) -> Result<Json<Notice>, AppError> {
    let notice = NoticeService::update_notice(&state.db, id, dto).await?;
    Ok(Json(notice))
}

#[utoipa::path(
    delete,
    path = "/api/notices/{id}",
    params(("id" = i32, Path, description = "Notice ID")),
    responses(
        (status = 200, description = "Notice deleted"),
        (status = 404, description = "Notice not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state))]
pub async fn delete_notice(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    NoticeService::delete_notice(&state.db, id).await?;
    Ok(Json(json!({"message": "Notice deleted successfully"})))
}

/// Unauthenticated landing-page feed.
#[utoipa::path(
    get,
    path = "/api/public/notices",
    responses((status = 200, description = "Landing page notices", body = [Notice])),
    tag = "Public"
)]
#[instrument(skip(state))]
pub async fn landing_notices(
    State(state): State<AppState>,
) -> Result<Json<Vec<Notice>>, AppError> {
    let notices = NoticeService::landing_notices(&state.db).await?;
    Ok(Json(notices))
}
