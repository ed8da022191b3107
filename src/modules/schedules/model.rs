use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct ClassSchedule {
    pub id: i32,
    pub subject_id: i32,
    pub class_id: i32,
    pub teacher_id: i32,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateScheduleDto {
    pub subject_id: i32,
    pub class_id: i32,
    pub teacher_id: i32,
    #[validate(length(min = 1, max = 10, message = "day_of_week is required"))]
    pub day_of_week: String,
    #[validate(length(min = 5, max = 5, message = "start_time must be HH:MM"))]
    pub start_time: String,
    #[validate(length(min = 5, max = 5, message = "end_time must be HH:MM"))]
    pub end_time: String,
    #[validate(length(max = 50, message = "room must be at most 50 characters"))]
    pub room: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateScheduleDto {
    pub subject_id: Option<i32>,
    pub class_id: Option<i32>,
    pub teacher_id: Option<i32>,
    #[validate(length(min = 1, max = 10, message = "day_of_week must not be empty"))]
    pub day_of_week: Option<String>,
    #[validate(length(min = 5, max = 5, message = "start_time must be HH:MM"))]
    pub start_time: Option<String>,
    #[validate(length(min = 5, max = 5, message = "end_time must be HH:MM"))]
    pub end_time: Option<String>,
    #[validate(length(max = 50, message = "room must be at most 50 characters"))]
    pub room: Option<String>,
}
