use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::middleware::auth::CurrentUser;
use crate::modules::auth::model::{
    ErrorResponse, LoginRequest, LoginResponse, MessageResponse, ProfileResponse, RegisterAdminDto,
};
use crate::modules::auth::service::AuthService;
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Login with username or email and receive a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Incorrect credentials or inactive account", body = ErrorResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Profile of the authenticated user, with role-specific fields attached.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user profile", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, current))]
pub async fn me(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = AuthService::profile(&state.db, &current.0).await?;
    Ok(Json(profile))
}

/// Stateless logout acknowledgement; the client discards its token.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Logged out", body = MessageResponse)),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(_current))]
pub async fn logout(_current: CurrentUser) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    })
}

/// Create an admin account using a single-use admin creation code.
#[utoipa::path(
    post,
    path = "/api/auth/register-admin",
    request_body = RegisterAdminDto,
    responses(
        (status = 201, description = "Admin account created", body = User),
        (status = 403, description = "Invalid or already used admin code", body = ErrorResponse),
        (status = 400, description = "Validation error or duplicate username/email", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_admin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterAdminDto>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::register_admin(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
