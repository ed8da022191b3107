use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct TeacherReview {
    pub id: i32,
    pub teacher_id: i32,
    pub reviewed_by_id: i32,
    pub teaching_quality: Option<i32>,
    pub punctuality: Option<i32>,
    pub student_engagement: Option<i32>,
    pub overall_rating: Option<f64>,
    pub comments: Option<String>,
    pub review_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewDto {
    pub teacher_id: i32,
    #[validate(range(min = 1, max = 5, message = "teaching_quality must be between 1 and 5"))]
    pub teaching_quality: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "punctuality must be between 1 and 5"))]
    pub punctuality: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "student_engagement must be between 1 and 5"))]
    pub student_engagement: Option<i32>,
    pub comments: Option<String>,
}
