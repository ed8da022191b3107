use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::users::model::{User, UserRole};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer token and resolves its subject
/// (the username) to an active user row. Handlers taking this argument
/// are authenticated; everything else is public.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }

    pub fn role(&self) -> Result<UserRole, AppError> {
        self.0.role()
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, full_name, phone, photo_url, role, is_active, created_at
             FROM users WHERE username = $1",
        )
        .bind(&claims.sub)
        .fetch_optional(&state.db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("Could not validate credentials"))?;

        if !user.is_active {
            return Err(AppError::unauthorized("Inactive user"));
        }

        Ok(CurrentUser(user))
    }
}
