use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const ATTENDANCE_STATUSES: [&str; 3] = ["present", "absent", "late"];

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Attendance {
    pub id: i32,
    pub student_id: i32,
    pub class_id: i32,
    pub date: DateTime<Utc>,
    pub status: String,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAttendanceDto {
    pub student_id: i32,
    /// Defaults to now; only the calendar day matters for uniqueness.
    pub date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 10, message = "status is required"))]
    pub status: String,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAttendanceDto {
    #[validate(length(min = 1, max = 10, message = "status must not be empty"))]
    pub status: Option<String>,
    pub remarks: Option<String>,
}
