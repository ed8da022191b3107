use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use utoipa::IntoParams;

use crate::middleware::role::RequireAdmin;
use crate::modules::auth::model::ErrorResponse;
use crate::modules::reviews::model::{CreateReviewDto, TeacherReview};
use crate::modules::reviews::service::ReviewService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListReviewsQuery {
    pub teacher_id: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/api/teacher-reviews",
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review recorded", body = TeacherReview),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher reviews"
)]
#[instrument(skip(state, admin, dto))]
pub async fn create_review(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateReviewDto>,
) -> Result<(StatusCode, Json<TeacherReview>), AppError> {
    let review = ReviewService::create_review(&state.db, admin.id(), dto).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[utoipa::path(
    get,
    path = "/api/teacher-reviews",
    params(ListReviewsQuery),
    responses((status = 200, description = "Teacher reviews", body = [TeacherReview])),
    security(("bearer_auth" = [])),
    tag = "Teacher reviews"
)]
#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListReviewsQuery>,
) -> Result<Json<Vec<TeacherReview>>, AppError> {
    let reviews = ReviewService::list_reviews(&state.db, params.teacher_id).await?;
    Ok(Json(reviews))
}

#[utoipa::path(
    get,
    path = "/api/teacher-reviews/{id}",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Teacher review", body = TeacherReview),
        (status = 404, description = "Review not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher reviews"
)]
#[instrument(skip(state))]
pub async fn get_review(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<TeacherReview>, AppError> {
    let review = ReviewService::get_review(&state.db, id).await?;
    Ok(Json(review))
}

#[utoipa::path(
    delete,
    path = "/api/teacher-reviews/{id}",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted"),
        (status = 404, description = "Review not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher reviews"
)]
#[instrument(skip(state))]
pub async fn delete_review(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    ReviewService::delete_review(&state.db, id).await?;
    Ok(Json(json!({"message": "Review deleted successfully"})))
}
