use sqlx::PgPool;
use tracing::instrument;

use crate::modules::notices::model::Notice;
use crate::modules::stats::model::DashboardStats;
use crate::utils::errors::AppError;

pub struct StatsService;

impl StatsService {
    #[instrument(skip(db))]
    pub async fn dashboard(db: &PgPool) -> Result<DashboardStats, AppError> {
        let total_students = count(db, "SELECT COUNT(*) FROM students").await?;
        let total_teachers = count(db, "SELECT COUNT(*) FROM teachers").await?;
        let total_classes = count(db, "SELECT COUNT(*) FROM classes").await?;
        let total_subjects = count(db, "SELECT COUNT(*) FROM subjects").await?;
        let pending_admissions = count(
            db,
            "SELECT COUNT(*) FROM admission_requests WHERE status = 'pending'",
        )
        .await?;
        let active_notices = count(
            db,
            "SELECT COUNT(*) FROM notices
             WHERE is_active AND (expires_at IS NULL OR expires_at > NOW())",
        )
        .await?;

        let recent_notices = sqlx::query_as::<_, Notice>(
            "SELECT id, created_by_id, title, content, target_role, is_urgent,
                    show_on_landing, expires_at, is_active, created_at
             FROM notices
             WHERE is_active AND (expires_at IS NULL OR expires_at > NOW())
             ORDER BY created_at DESC
             LIMIT 5",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(DashboardStats {
            total_students,
            total_teachers,
            total_classes,
            total_subjects,
            pending_admissions,
            active_notices,
            recent_notices,
        })
    }
}

async fn count(db: &PgPool, sql: &str) -> Result<i64, AppError> {
    sqlx::query_scalar::<_, i64>(sql)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
}
