use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::User;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Teacher {
    pub id: i32,
    pub user_id: i32,
    pub employee_id: String,
    pub qualification: Option<String>,
    pub experience_years: i32,
    pub salary: Option<f64>,
    pub joining_date: DateTime<Utc>,
}

/// Teacher row with its owning user resolved. The user reference is
/// always present; reads join explicitly instead of leaving the field to
/// chance.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherRead {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub user: User,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeacherDto {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100, message = "full_name is required"))]
    pub full_name: String,
    #[validate(length(max = 15, message = "phone must be at most 15 characters"))]
    pub phone: Option<String>,
    #[validate(length(min = 6, max = 50, message = "password must be 6-50 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 20, message = "employee_id is required"))]
    pub employee_id: String,
    #[validate(length(max = 100, message = "qualification must be at most 100 characters"))]
    pub qualification: Option<String>,
    #[validate(range(min = 0, message = "experience_years must not be negative"))]
    pub experience_years: Option<i32>,
    #[validate(range(min = 0.0, message = "salary must not be negative"))]
    pub salary: Option<f64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTeacherDto {
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100, message = "full_name must not be empty"))]
    pub full_name: Option<String>,
    #[validate(length(max = 15, message = "phone must be at most 15 characters"))]
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    #[validate(length(max = 100, message = "qualification must be at most 100 characters"))]
    pub qualification: Option<String>,
    #[validate(range(min = 0, message = "experience_years must not be negative"))]
    pub experience_years: Option<i32>,
    #[validate(range(min = 0.0, message = "salary must not be negative"))]
    pub salary: Option<f64>,
}
