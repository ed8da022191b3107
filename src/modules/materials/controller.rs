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
use crate::modules::materials::model::{CreateMaterialDto, StudyMaterial, UpdateMaterialDto};
use crate::modules::materials::service::MaterialService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListMaterialsQuery {
    pub subject_id: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/api/study-materials",
    request_body = CreateMaterialDto,
    responses(
        (status = 201, description = "Study material created", body = StudyMaterial),
        (status = 400, description = "Validation error or file too large", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Study materials"
)]
#[instrument(skip(state, staff, dto))]
pub async fn create_material(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateMaterialDto>,
) -> Result<(StatusCode, Json<StudyMaterial>), AppError> {
    let material = MaterialService::create_material(
        &state.db,
        staff.id(),
        state.storage_config.max_upload_bytes,
        dto,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(material)))
}

#[utoipa::path(
    get,
    path = "/api/study-materials",
    params(ListMaterialsQuery),
    responses((status = 200, description = "Study materials", body = [StudyMaterial])),
    security(("bearer_auth" = [])),
    tag = "Study materials"
)]
#[instrument(skip(state, _current))]
pub async fn list_materials(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(params): Query<ListMaterialsQuery>,
) -> Result<Json<Vec<StudyMaterial>>, AppError> {
    let materials = MaterialService::list_materials(&state.db, params.subject_id).await?;
    Ok(Json(materials))
}

#[utoipa::path(
    get,
    path = "/api/study-materials/{id}",
    params(("id" = i32, Path, description = "Study material ID")),
    responses(
        (status = 200, description = "Study material", body = StudyMaterial),
        (status = 404, description = "Study material not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Study materials"
)]
#[instrument(skip(state, _current))]
pub async fn get_material(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<StudyMaterial>, AppError> {
    let material = MaterialService::get_material(&state.db, id).await?;
    Ok(Json(material))
}

#[utoipa::path(
    put,
    path = "/api/study-materials/{id}",
    params(("id" = i32, Path, description = "Study material ID")),
    request_body = UpdateMaterialDto,
    responses(
        (status = 200, description = "Study material updated", body = StudyMaterial),
        (status = 400, description = "Validation error or file too large", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Study materials"
)]
#[instrument(skip(state, dto))]
pub async fn update_material(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateMaterialDto>,
) -> Result<Json<StudyMaterial>, AppError> {
    let material = MaterialService::update_material(
        &state.db,
        id,
        state.storage_config.max_upload_bytes,
        dto,
    )
    .await?;
    Ok(Json(material))
}

#[utoipa::path(
    delete,
    path = "/api/study-materials/{id}",
    params(("id" = i32, Path, description = "Study material ID")),
    responses(
        (status = 200, description = "Study material deleted"),
        (status = 404, description = "Study material not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Study materials"
)]
#[instrument(skip(state))]
pub async fn delete_material(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    MaterialService::delete_material(&state.db, id).await?;
    Ok(Json(json!({"message": "Study material deleted successfully"})))
}
