use sqlx::PgPool;
use tracing::instrument;

use crate::modules::exams::service::ExamService;
use crate::modules::results::model::{CreateResultDto, ExamResult, UpdateResultDto};
use crate::modules::students::service::StudentService;
use crate::utils::errors::{AppError, conflict_on_unique};
use crate::utils::grading::grade_for_marks;

const RESULT_COLUMNS: &str = "id, exam_id, student_id, marks_obtained, grade, remarks";

pub struct ResultService;

impl ResultService {
    /// One result per exam per student. Marks are bounded by the exam's
    /// max_marks; the grade falls out of the marks when not supplied.
    #[instrument(skip(db, dto))]
    pub async fn create_result(db: &PgPool, dto: CreateResultDto) -> Result<ExamResult, AppError> {
        let exam = ExamService::get_exam(db, dto.exam_id).await?;
        StudentService::get_student(db, dto.student_id).await?;

        if dto.marks_obtained > exam.max_marks {
            return Err(AppError::bad_request(format!(
                "marks_obtained ({}) cannot exceed max_marks ({})",
                dto.marks_obtained, exam.max_marks
            )));
        }

        let already_recorded = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM exam_results WHERE exam_id = $1 AND student_id = $2",
        )
        .bind(dto.exam_id)
        .bind(dto.student_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;
        if already_recorded > 0 {
            return Err(AppError::conflict(
                "Result already recorded for this student in this exam",
            ));
        }

        let grade = dto
            .grade
            .unwrap_or_else(|| grade_for_marks(dto.marks_obtained, exam.max_marks));

        let result = sqlx::query_as::<_, ExamResult>(&format!(
            "INSERT INTO exam_results (exam_id, student_id, marks_obtained, grade, remarks)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {RESULT_COLUMNS}"
        ))
        .bind(dto.exam_id)
        .bind(dto.student_id)
        .bind(dto.marks_obtained)
        .bind(&grade)
        .bind(&dto.remarks)
        .fetch_one(db)
        .await
        .map_err(|e| {
            conflict_on_unique(e, "Result already recorded for this student in this exam")
        })?;

        Ok(result)
    }

    #[instrument(skip(db))]
    pub async fn list_results(
        db: &PgPool,
        exam_id: Option<i32>,
        student_id: Option<i32>,
    ) -> Result<Vec<ExamResult>, AppError> {
        let mut sql = format!("SELECT {RESULT_COLUMNS} FROM exam_results WHERE 1 = 1");
        let mut arg = 0;
        if exam_id.is_some() {
            arg += 1;
            sql.push_str(&format!(" AND exam_id = ${arg}"));
        }
        if student_id.is_some() {
            arg += 1;
            sql.push_str(&format!(" AND student_id = ${arg}"));
        }
        sql.push_str(" ORDER BY id");

        let mut query = sqlx::query_as::<_, ExamResult>(&sql);
        if let Some(exam_id) = exam_id {
            query = query.bind(exam_id);
        }
        if let Some(student_id) = student_id {
            query = query.bind(student_id);
        }

        query.fetch_all(db).await.map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn list_for_student(
        db: &PgPool,
        student_id: i32,
    ) -> Result<Vec<ExamResult>, AppError> {
        sqlx::query_as::<_, ExamResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM exam_results WHERE student_id = $1 ORDER BY id"
        ))
        .bind(student_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_result(db: &PgPool, id: i32) -> Result<ExamResult, AppError> {
        sqlx::query_as::<_, ExamResult>(&format!(
            "SELECT {RESULT_COLUMNS} FROM exam_results WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Exam result not found"))
    }

    /// A marks change without an explicit grade re-derives the grade.
    #[instrument(skip(db, dto))]
    pub async fn update_result(
        db: &PgPool,
        id: i32,
        dto: UpdateResultDto,
    ) -> Result<ExamResult, AppError> {
        let existing = Self::get_result(db, id).await?;
        let exam = ExamService::get_exam(db, existing.exam_id).await?;

        let marks = dto.marks_obtained.unwrap_or(existing.marks_obtained);
        if marks > exam.max_marks {
            return Err(AppError::bad_request(format!(
                "marks_obtained ({}) cannot exceed max_marks ({})",
                marks, exam.max_marks
            )));
        }

        let grade = match (dto.grade, dto.marks_obtained) {
            (Some(grade), _) => Some(grade),
            (None, Some(new_marks)) => Some(grade_for_marks(new_marks, exam.max_marks)),
            (None, None) => existing.grade,
        };

        let result = sqlx::query_as::<_, ExamResult>(&format!(
            "UPDATE exam_results SET marks_obtained = $1, grade = $2, remarks = $3
             WHERE id = $4
             RETURNING {RESULT_COLUMNS}"
        ))
        .bind(marks)
        .bind(&grade)
        .bind(dto.remarks.or(existing.remarks))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(result)
    }
}
