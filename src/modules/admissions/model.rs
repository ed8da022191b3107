use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::students::model::StudentRead;

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct AdmissionRequest {
    pub id: i32,
    pub applicant_name: String,
    pub applicant_email: Option<String>,
    pub applicant_phone: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub class_id: i32,
    pub status: String,
    pub reviewed_by_id: Option<i32>,
    pub review_notes: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Public admission form; no authentication, no account fields. The
/// account is minted at approval time.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAdmissionDto {
    #[validate(length(min = 1, max = 100, message = "applicant_name is required"))]
    pub applicant_name: String,
    #[validate(email(message = "applicant_email must be a valid address"))]
    pub applicant_email: Option<String>,
    #[validate(length(max = 15, message = "applicant_phone must be at most 15 characters"))]
    pub applicant_phone: Option<String>,
    #[validate(length(max = 100, message = "parent_name must be at most 100 characters"))]
    pub parent_name: Option<String>,
    #[validate(length(max = 15, message = "parent_phone must be at most 15 characters"))]
    pub parent_phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub class_id: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewAdmissionDto {
    pub review_notes: Option<String>,
}

/// Returned exactly once, at approval. The password is generated and
/// never stored in clear anywhere else.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdmissionApprovalResponse {
    pub request: AdmissionRequest,
    pub student: StudentRead,
    pub username: String,
    pub password: String,
}
