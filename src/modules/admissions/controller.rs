use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use crate::middleware::role::RequireAdmin;
use crate::modules::admissions::model::{
    AdmissionApprovalResponse, AdmissionRequest, CreateAdmissionDto, ReviewAdmissionDto,
};
use crate::modules::admissions::service::AdmissionService;
use crate::modules::auth::model::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListAdmissionsQuery {
    pub status: Option<String>,
}

/// Open to the public; this is how prospective students apply.
#[utoipa::path(
    post,
    path = "/api/admissions",
    request_body = CreateAdmissionDto,
    responses(
        (status = 201, description = "Admission request submitted", body = AdmissionRequest),
        (status = 400, description = "Validation error or class full", body = ErrorResponse)
    ),
    tag = "Admissions"
)]
#[instrument(skip(state, dto))]
pub async fn submit_admission(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAdmissionDto>,
) -> Result<(StatusCode, Json<AdmissionRequest>), AppError> {
    let request = AdmissionService::submit_request(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    get,
    path = "/api/admissions",
    params(ListAdmissionsQuery),
    responses((status = 200, description = "Admission requests", body = [AdmissionRequest])),
    security(("bearer_auth" = [])),
    tag = "Admissions"
)]
#[instrument(skip(state))]
pub async fn list_admissions(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListAdmissionsQuery>,
) -> Result<Json<Vec<AdmissionRequest>>, AppError> {
    let requests = AdmissionService::list_requests(&state.db, params.status).await?;
    Ok(Json(requests))
}

#[utoipa::path(
    get,
    path = "/api/admissions/{id}",
    params(("id" = i32, Path, description = "Admission request ID")),
    responses(
        (status = 200, description = "Admission request", body = AdmissionRequest),
        (status = 404, description = "Admission request not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admissions"
)]
#[instrument(skip(state))]
pub async fn get_admission(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<AdmissionRequest>, AppError> {
    let request = AdmissionService::get_request(&state.db, id).await?;
    Ok(Json(request))
}

/// Approving mints the student account; the generated credentials appear
/// in this response and nowhere else.
#[utoipa::path(
    post,
    path = "/api/admissions/{id}/approve",
    params(("id" = i32, Path, description = "Admission request ID")),
    request_body = ReviewAdmissionDto,
    responses(
        (status = 200, description = "Request approved, student account created", body = AdmissionApprovalResponse),
        (status = 400, description = "Request already reviewed or class full", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admissions"
)]
#[instrument(skip(state, admin, dto))]
pub async fn approve_admission(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<ReviewAdmissionDto>,
) -> Result<Json<AdmissionApprovalResponse>, AppError> {
    let approval = AdmissionService::approve_request(&state.db, id, admin.id(), dto).await?;
    Ok(Json(approval))
}

#[utoipa::path(
    post,
    path = "/api/admissions/{id}/reject",
    params(("id" = i32, Path, description = "Admission request ID")),
    request_body = ReviewAdmissionDto,
    responses(
        (status = 200, description = "Request rejected", body = AdmissionRequest),
        (status = 400, description = "Request already reviewed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admissions"
)]
#[instrument(skip(state, admin, dto))]
pub async fn reject_admission(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<ReviewAdmissionDto>,
) -> Result<Json<AdmissionRequest>, AppError> {
    let request = AdmissionService::reject_request(&state.db, id, admin.id(), dto).await?;
    Ok(Json(request))
}
