use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::notices::model::Notice;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_classes: i64,
    pub total_subjects: i64,
    pub pending_admissions: i64,
    pub active_notices: i64,
    pub recent_notices: Vec<Notice>,
}
