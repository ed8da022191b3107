use sqlx::PgPool;
use tracing::instrument;

use crate::modules::notices::model::{CreateNoticeDto, Notice, UpdateNoticeDto};
use crate::modules::users::model::UserRole;
use crate::utils::errors::AppError;

const NOTICE_COLUMNS: &str =
    "id, created_by_id, title, content, target_role, is_urgent, show_on_landing, \
     expires_at, is_active, created_at";

pub struct NoticeService;

impl NoticeService {
    #[instrument(skip(db, dto))]
    pub async fn create_notice(
        db: &PgPool,
        created_by_id: i32,
        dto: CreateNoticeDto,
    ) -> Result<Notice, AppError> {
        let target_role = validate_target_role(dto.target_role)?;

        let notice = sqlx::query_as::<_, Notice>(&format!(
            "INSERT INTO notices
                 (created_by_id, title, content, target_role, is_urgent,
                  show_on_landing, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {NOTICE_COLUMNS}"
        ))
        .bind(created_by_id)
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(&target_role)
        .bind(dto.is_urgent.unwrap_or(false))
        .bind(dto.show_on_landing.unwrap_or(false))
        .bind(dto.expires_at)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(notice)
    }

    #[instrument(skip(db))]
    pub async fn list_notices(
        db: &PgPool,
        target_role: Option<String>,
        active_only: bool,
    ) -> Result<Vec<Notice>, AppError> {
        let mut sql = format!("SELECT {NOTICE_COLUMNS} FROM notices WHERE 1 = 1");
        if active_only {
            sql.push_str(" AND is_active AND (expires_at IS NULL OR expires_at > NOW())");
        }
        if target_role.is_some() {
            sql.push_str(" AND (target_role IS NULL OR target_role = $1)");
        }
        sql.push_str(" ORDER BY is_urgent DESC, created_at DESC");

        let mut query = sqlx::query_as::<_, Notice>(&sql);
        if let Some(role) = &target_role {
            query = query.bind(role);
        }

        query.fetch_all(db).await.map_err(AppError::database)
    }

    /// Active, unexpired notices addressed to a role or to everyone.
    #[instrument(skip(db))]
    pub async fn list_visible_to(db: &PgPool, role: &str) -> Result<Vec<Notice>, AppError> {
        Self::list_notices(db, Some(role.to_string()), true).await
    }

    /// The unauthenticated landing feed: active, unexpired, and opted in.
    #[instrument(skip(db))]
    pub async fn landing_notices(db: &PgPool) -> Result<Vec<Notice>, AppError> {
        sqlx::query_as::<_, Notice>(&format!(
            "SELECT {NOTICE_COLUMNS} FROM notices
             WHERE is_active AND show_on_landing
               AND (expires_at IS NULL OR expires_at > NOW())
             ORDER BY is_urgent DESC, created_at DESC"
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_notice(db: &PgPool, id: i32) -> Result<Notice, AppError> {
        sqlx::query_as::<_, Notice>(&format!(
            "SELECT {NOTICE_COLUMNS} FROM notices WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Notice not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_notice(
        db: &PgPool,
        id: i32,
        dto: UpdateNoticeDto,
    ) -> Result<Notice, AppError> {
        let existing = Self::get_notice(db, id).await?;

        let target_role = match dto.target_role {
            Some(role) => validate_target_role(Some(role))?,
            None => existing.target_role,
        };

        let notice = sqlx::query_as::<_, Notice>(&format!(
            "UPDATE notices
             SET title = $1, content = $2, target_role = $3, is_urgent = $4,
                 show_on_landing = $5, expires_at = $6, is_active = $7
             WHERE id = $8
             RETURNING {NOTICE_COLUMNS}"
        ))
        .bind(dto.title.unwrap_or(existing.title))
        .bind(dto.content.unwrap_or(existing.content))
        .bind(&target_role)
        .bind(dto.is_urgent.unwrap_or(existing.is_urgent))
        .bind(dto.show_on_landing.unwrap_or(existing.show_on_landing))
        .bind(dto.expires_at.or(existing.expires_at))
        .bind(dto.is_active.unwrap_or(existing.is_active))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(notice)
    }

    #[instrument(skip(db))]
    pub async fn delete_notice(db: &PgPool, id: i32) -> Result<(), AppError> {
        Self::get_notice(db, id).await?;

        sqlx::query("DELETE FROM notices WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        Ok(())
    }
}

fn validate_target_role(role: Option<String>) -> Result<Option<String>, AppError> {
    match role {
        None => Ok(None),
        Some(role) => {
            UserRole::parse(&role)
                .map_err(|_| AppError::bad_request("target_role must be a valid role or null"))?;
            Ok(Some(role))
        }
    }
}
