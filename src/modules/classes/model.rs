use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Class {
    pub id: i32,
    pub name: String,
    pub grade: i32,
    pub section: Option<String>,
    pub academic_year: Option<String>,
    pub capacity: i32,
    pub class_teacher_id: Option<i32>,
}

/// Reduced shape for the unauthenticated landing page: enough for a
/// prospective student to pick a class on the admission form.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct PublicClass {
    pub id: i32,
    pub name: String,
    pub grade: i32,
    pub section: Option<String>,
    pub academic_year: Option<String>,
    pub capacity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClassDto {
    #[validate(length(min = 1, max = 50, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 6, max = 12, message = "grade must be between 6 and 12"))]
    pub grade: i32,
    #[validate(length(max = 10, message = "section must be at most 10 characters"))]
    pub section: Option<String>,
    #[validate(length(max = 10, message = "academic_year must be at most 10 characters"))]
    pub academic_year: Option<String>,
    #[validate(range(min = 1, max = 100, message = "capacity must be between 1 and 100"))]
    pub capacity: Option<i32>,
    pub class_teacher_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClassDto {
    #[validate(length(min = 1, max = 50, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 6, max = 12, message = "grade must be between 6 and 12"))]
    pub grade: Option<i32>,
    #[validate(length(max = 10, message = "section must be at most 10 characters"))]
    pub section: Option<String>,
    #[validate(length(max = 10, message = "academic_year must be at most 10 characters"))]
    pub academic_year: Option<String>,
    #[validate(range(min = 1, max = 100, message = "capacity must be between 1 and 100"))]
    pub capacity: Option<i32>,
    pub class_teacher_id: Option<i32>,
}
