use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct StudyMaterial {
    pub id: i32,
    pub subject_id: i32,
    pub created_by_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub file_path: Option<String>,
    pub file_url: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaterialDto {
    pub subject_id: i32,
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(max = 500, message = "file_path must be at most 500 characters"))]
    pub file_path: Option<String>,
    #[validate(url(message = "file_url must be a valid URL"))]
    pub file_url: Option<String>,
    #[validate(length(max = 50, message = "file_type must be at most 50 characters"))]
    pub file_type: Option<String>,
    #[validate(range(min = 0, message = "file_size must not be negative"))]
    pub file_size: Option<i64>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMaterialDto {
    #[validate(length(min = 1, max = 200, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 500, message = "file_path must be at most 500 characters"))]
    pub file_path: Option<String>,
    #[validate(url(message = "file_url must be a valid URL"))]
    pub file_url: Option<String>,
    #[validate(length(max = 50, message = "file_type must be at most 50 characters"))]
    pub file_type: Option<String>,
    #[validate(range(min = 0, message = "file_size must not be negative"))]
    pub file_size: Option<i64>,
    pub is_public: Option<bool>,
}
