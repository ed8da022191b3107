use sqlx::PgPool;
use tracing::instrument;

use crate::modules::exams::model::{CreateExamDto, Exam, UpdateExamDto};
use crate::modules::subjects::service::SubjectService;
use crate::utils::errors::AppError;

const EXAM_COLUMNS: &str =
    "id, subject_id, class_id, name, exam_date, max_marks, duration_minutes";

pub struct ExamService;

impl ExamService {
    /// The class is taken from the subject, not from the caller.
    #[instrument(skip(db, dto))]
    pub async fn create_exam(db: &PgPool, dto: CreateExamDto) -> Result<Exam, AppError> {
        let subject = SubjectService::get_subject(db, dto.subject_id).await?;

        let exam = sqlx::query_as::<_, Exam>(&format!(
            "INSERT INTO exams (subject_id, class_id, name, exam_date, max_marks, duration_minutes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {EXAM_COLUMNS}"
        ))
        .bind(dto.subject_id)
        .bind(subject.class_id)
        .bind(&dto.name)
        .bind(dto.exam_date)
        .bind(dto.max_marks)
        .bind(dto.duration_minutes.unwrap_or(120))
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(exam)
    }

    #[instrument(skip(db))]
    pub async fn list_exams(
        db: &PgPool,
        class_id: Option<i32>,
        subject_id: Option<i32>,
    ) -> Result<Vec<Exam>, AppError> {
        let mut sql = format!("SELECT {EXAM_COLUMNS} FROM exams WHERE 1 = 1");
        let mut arg = 0;
        if class_id.is_some() {
            arg += 1;
            sql.push_str(&format!(" AND class_id = ${arg}"));
        }
        if subject_id.is_some() {
            arg += 1;
            sql.push_str(&format!(" AND subject_id = ${arg}"));
        }
        sql.push_str(" ORDER BY exam_date DESC");

        let mut query = sqlx::query_as::<_, Exam>(&sql);
        if let Some(class_id) = class_id {
            query = query.bind(class_id);
        }
        if let Some(subject_id) = subject_id {
            query = query.bind(subject_id);
        }

        query.fetch_all(db).await.map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn list_for_teacher(db: &PgPool, teacher_id: i32) -> Result<Vec<Exam>, AppError> {
        sqlx::query_as::<_, Exam>(&format!(
            "SELECT e.id, e.subject_id, e.class_id, e.name, e.exam_date,
                    e.max_marks, e.duration_minutes
             FROM exams e
             JOIN subjects s ON s.id = e.subject_id
             WHERE s.teacher_id = $1
             ORDER BY e.exam_date DESC"
        ))
        .bind(teacher_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_exam(db: &PgPool, id: i32) -> Result<Exam, AppError> {
        sqlx::query_as::<_, Exam>(&format!("SELECT {EXAM_COLUMNS} FROM exams WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("Exam not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_exam(db: &PgPool, id: i32, dto: UpdateExamDto) -> Result<Exam, AppError> {
        let existing = Self::get_exam(db, id).await?;

        let exam = sqlx::query_as::<_, Exam>(&format!(
            "UPDATE exams SET name = $1, exam_date = $2, max_marks = $3, duration_minutes = $4
             WHERE id = $5
             RETURNING {EXAM_COLUMNS}"
        ))
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.exam_date.unwrap_or(existing.exam_date))
        .bind(dto.max_marks.unwrap_or(existing.max_marks))
        .bind(dto.duration_minutes.unwrap_or(existing.duration_minutes))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(exam)
    }

    /// Deletion is blocked while results exist for the exam.
    #[instrument(skip(db))]
    pub async fn delete_exam(db: &PgPool, id: i32) -> Result<(), AppError> {
        Self::get_exam(db, id).await?;

        let result_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exam_results WHERE exam_id = $1")
                .bind(id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;
        if result_count > 0 {
            return Err(AppError::conflict(format!(
                "Cannot delete exam: {} result(s) are already recorded",
                result_count
            )));
        }

        sqlx::query("DELETE FROM exams WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        Ok(())
    }
}
