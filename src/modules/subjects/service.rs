use sqlx::PgPool;
use tracing::instrument;

use crate::modules::classes::service::ClassService;
use crate::modules::subjects::model::{CreateSubjectDto, Subject, UpdateSubjectDto};
use crate::modules::teachers::service::TeacherService;
use crate::utils::codegen::next_subject_code;
use crate::utils::errors::{AppError, conflict_on_unique};

const SUBJECT_COLUMNS: &str = "id, class_id, teacher_id, name, code, credits";

pub struct SubjectService;

impl SubjectService {
    /// The code is derived from the subject name when the caller leaves
    /// it out; the unique index on code is the final arbiter either way.
    #[instrument(skip(db, dto))]
    pub async fn create_subject(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        ClassService::get_class(db, dto.class_id).await?;
        TeacherService::get_teacher(db, dto.teacher_id).await?;

        let code = match dto.code {
            Some(code) => code,
            None => {
                let existing = sqlx::query_scalar::<_, String>("SELECT code FROM subjects")
                    .fetch_all(db)
                    .await
                    .map_err(AppError::database)?;
                next_subject_code(&dto.name, &existing)
            }
        };

        let subject = sqlx::query_as::<_, Subject>(&format!(
            "INSERT INTO subjects (class_id, teacher_id, name, code, credits)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {SUBJECT_COLUMNS}"
        ))
        .bind(dto.class_id)
        .bind(dto.teacher_id)
        .bind(&dto.name)
        .bind(&code)
        .bind(dto.credits.unwrap_or(1))
        .fetch_one(db)
        .await
        .map_err(|e| conflict_on_unique(e, "Subject code already exists"))?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn list_subjects(
        db: &PgPool,
        class_id: Option<i32>,
    ) -> Result<Vec<Subject>, AppError> {
        match class_id {
            Some(class_id) => Self::list_by_class(db, class_id).await,
            None => sqlx::query_as::<_, Subject>(&format!(
                "SELECT {SUBJECT_COLUMNS} FROM subjects ORDER BY id"
            ))
            .fetch_all(db)
            .await
            .map_err(AppError::database),
        }
    }

    #[instrument(skip(db))]
    pub async fn list_by_class(db: &PgPool, class_id: i32) -> Result<Vec<Subject>, AppError> {
        sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE class_id = $1 ORDER BY id"
        ))
        .bind(class_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn list_by_teacher(db: &PgPool, teacher_id: i32) -> Result<Vec<Subject>, AppError> {
        sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE teacher_id = $1 ORDER BY id"
        ))
        .bind(teacher_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_subject(db: &PgPool, id: i32) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Subject not found"))
    }

    /// The code is immutable after creation; only assignment and metadata
    /// move.
    #[instrument(skip(db, dto))]
    pub async fn update_subject(
        db: &PgPool,
        id: i32,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        let existing = Self::get_subject(db, id).await?;

        if let Some(class_id) = dto.class_id {
            ClassService::get_class(db, class_id).await?;
        }
        if let Some(teacher_id) = dto.teacher_id {
            TeacherService::get_teacher(db, teacher_id).await?;
        }

        let subject = sqlx::query_as::<_, Subject>(&format!(
            "UPDATE subjects SET class_id = $1, teacher_id = $2, name = $3, credits = $4
             WHERE id = $5
             RETURNING {SUBJECT_COLUMNS}"
        ))
        .bind(dto.class_id.unwrap_or(existing.class_id))
        .bind(dto.teacher_id.unwrap_or(existing.teacher_id))
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.credits.unwrap_or(existing.credits))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(subject)
    }

    /// Deletion is blocked while exams, study materials, or schedule
    /// entries still reference the subject.
    #[instrument(skip(db))]
    pub async fn delete_subject(db: &PgPool, id: i32) -> Result<(), AppError> {
        Self::get_subject(db, id).await?;

        let exam_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exams WHERE subject_id = $1")
                .bind(id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;
        if exam_count > 0 {
            return Err(AppError::conflict(format!(
                "Cannot delete subject: {} exam(s) still reference it",
                exam_count
            )));
        }

        let material_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM study_materials WHERE subject_id = $1",
        )
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;
        if material_count > 0 {
            return Err(AppError::conflict(format!(
                "Cannot delete subject: {} study material(s) still reference it",
                material_count
            )));
        }

        let schedule_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM class_schedules WHERE subject_id = $1",
        )
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;
        if schedule_count > 0 {
            return Err(AppError::conflict(format!(
                "Cannot delete subject: {} schedule entry(ies) still reference it",
                schedule_count
            )));
        }

        sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        Ok(())
    }
}
