use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct ExamResult {
    pub id: i32,
    pub exam_id: i32,
    pub student_id: i32,
    pub marks_obtained: f64,
    pub grade: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateResultDto {
    pub exam_id: i32,
    pub student_id: i32,
    #[validate(range(min = 0.0, message = "marks_obtained must not be negative"))]
    pub marks_obtained: f64,
    /// Derived from the marks when absent.
    #[validate(length(min = 1, max = 10, message = "grade must be 1-10 characters"))]
    pub grade: Option<String>,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateResultDto {
    #[validate(range(min = 0.0, message = "marks_obtained must not be negative"))]
    pub marks_obtained: Option<f64>,
    #[validate(length(min = 1, max = 10, message = "grade must be 1-10 characters"))]
    pub grade: Option<String>,
    pub remarks: Option<String>,
}
