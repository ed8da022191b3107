use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::users::model::User;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    pub id: i32,
    pub user_id: i32,
    pub class_id: i32,
    pub roll_number: String,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub admission_date: DateTime<Utc>,
}

/// Student row with its owning user resolved.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentRead {
    #[serde(flatten)]
    pub student: Student,
    pub user: User,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
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
    pub class_id: i32,
    /// Autogenerated when absent.
    #[validate(length(min = 1, max = 20, message = "roll_number must be 1-20 characters"))]
    pub roll_number: Option<String>,
    #[validate(length(max = 100, message = "parent_name must be at most 100 characters"))]
    pub parent_name: Option<String>,
    #[validate(length(max = 15, message = "parent_phone must be at most 15 characters"))]
    pub parent_phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100, message = "full_name must not be empty"))]
    pub full_name: Option<String>,
    #[validate(length(max = 15, message = "phone must be at most 15 characters"))]
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub class_id: Option<i32>,
    #[validate(length(max = 100, message = "parent_name must be at most 100 characters"))]
    pub parent_name: Option<String>,
    #[validate(length(max = 15, message = "parent_phone must be at most 15 characters"))]
    pub parent_phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}
