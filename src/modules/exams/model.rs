use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Exam {
    pub id: i32,
    pub subject_id: i32,
    pub class_id: i32,
    pub name: String,
    pub exam_date: DateTime<Utc>,
    pub max_marks: f64,
    pub duration_minutes: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateExamDto {
    pub subject_id: i32,
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    pub exam_date: DateTime<Utc>,
    #[validate(range(min = 1.0, message = "max_marks must be positive"))]
    pub max_marks: f64,
    #[validate(range(min = 1, message = "duration_minutes must be positive"))]
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateExamDto {
    #[validate(length(min = 1, max = 100, message = "name must not be empty"))]
    pub name: Option<String>,
    pub exam_date: Option<DateTime<Utc>>,
    #[validate(range(min = 1.0, message = "max_marks must be positive"))]
    pub max_marks: Option<f64>,
    #[validate(range(min = 1, message = "duration_minutes must be positive"))]
    pub duration_minutes: Option<i32>,
}
