use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Subject {
    pub id: i32,
    pub class_id: i32,
    pub teacher_id: i32,
    pub name: String,
    pub code: String,
    pub credits: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectDto {
    pub class_id: i32,
    pub teacher_id: i32,
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    /// Autogenerated from the name when absent.
    #[validate(length(min = 1, max = 10, message = "code must be 1-10 characters"))]
    pub code: Option<String>,
    #[validate(range(min = 1, max = 10, message = "credits must be between 1 and 10"))]
    pub credits: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSubjectDto {
    pub class_id: Option<i32>,
    pub teacher_id: Option<i32>,
    #[validate(length(min = 1, max = 100, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 10, message = "credits must be between 1 and 10"))]
    pub credits: Option<i32>,
}
