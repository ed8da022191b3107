use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Notice {
    pub id: i32,
    pub created_by_id: i32,
    pub title: String,
    pub content: String,
    pub target_role: Option<String>,
    pub is_urgent: bool,
    pub show_on_landing: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNoticeDto {
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    /// Null means everyone.
    pub target_role: Option<String>,
    pub is_urgent: Option<bool>,
    pub show_on_landing: Option<bool>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateNoticeDto {
    #[validate(length(min = 1, max = 200, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
    pub target_role: Option<String>,
    pub is_urgent: Option<bool>,
    pub show_on_landing: Option<bool>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}
