use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::attendance::model::{
    ATTENDANCE_STATUSES, Attendance, CreateAttendanceDto, UpdateAttendanceDto,
};
use crate::modules::students::service::StudentService;
use crate::utils::errors::{AppError, conflict_on_unique};

const ATTENDANCE_COLUMNS: &str = "id, student_id, class_id, date, status, remarks";

pub struct AttendanceService;

impl AttendanceService {
    /// One record per student per UTC calendar day. The pre-check gives a
    /// readable error; the partial unique index catches the race.
    #[instrument(skip(db, dto))]
    pub async fn create_attendance(
        db: &PgPool,
        dto: CreateAttendanceDto,
    ) -> Result<Attendance, AppError> {
        let status = validate_status(&dto.status)?;
        let student = StudentService::get_student(db, dto.student_id).await?;
        let date = dto.date.unwrap_or_else(Utc::now);

        let already_marked = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendances
             WHERE student_id = $1
               AND (date AT TIME ZONE 'UTC')::date = ($2 AT TIME ZONE 'UTC')::date",
        )
        .bind(dto.student_id)
        .bind(date)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;
        if already_marked > 0 {
            return Err(AppError::conflict(
                "Attendance already marked for this student on this date",
            ));
        }

        let attendance = sqlx::query_as::<_, Attendance>(&format!(
            "INSERT INTO attendances (student_id, class_id, date, status, remarks)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(student.student.class_id)
        .bind(date)
        .bind(status)
        .bind(&dto.remarks)
        .fetch_one(db)
        .await
        .map_err(|e| {
            conflict_on_unique(e, "Attendance already marked for this student on this date")
        })?;

        Ok(attendance)
    }

    #[instrument(skip(db))]
    pub async fn list_attendance(
        db: &PgPool,
        class_id: Option<i32>,
        student_id: Option<i32>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Attendance>, AppError> {
        let mut sql = format!("SELECT {ATTENDANCE_COLUMNS} FROM attendances WHERE 1 = 1");
        let mut arg = 0;
        if class_id.is_some() {
            arg += 1;
            sql.push_str(&format!(" AND class_id = ${arg}"));
        }
        if student_id.is_some() {
            arg += 1;
            sql.push_str(&format!(" AND student_id = ${arg}"));
        }
        if date.is_some() {
            arg += 1;
            sql.push_str(&format!(
                " AND (date AT TIME ZONE 'UTC')::date = ${arg}"
            ));
        }
        sql.push_str(" ORDER BY date DESC, id DESC");

        let mut query = sqlx::query_as::<_, Attendance>(&sql);
        if let Some(class_id) = class_id {
            query = query.bind(class_id);
        }
        if let Some(student_id) = student_id {
            query = query.bind(student_id);
        }
        if let Some(date) = date {
            query = query.bind(date);
        }

        query.fetch_all(db).await.map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn list_for_student(
        db: &PgPool,
        student_id: i32,
    ) -> Result<Vec<Attendance>, AppError> {
        sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendances
             WHERE student_id = $1 ORDER BY date DESC"
        ))
        .bind(student_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_attendance(db: &PgPool, id: i32) -> Result<Attendance, AppError> {
        sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendances WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Attendance record not found"))
    }

    /// Only status and remarks move; student, class, and date are fixed
    /// at creation.
    #[instrument(skip(db, dto))]
    pub async fn update_attendance(
        db: &PgPool,
        id: i32,
        dto: UpdateAttendanceDto,
    ) -> Result<Attendance, AppError> {
        let existing = Self::get_attendance(db, id).await?;

        let status = match dto.status {
            Some(status) => validate_status(&status)?.to_string(),
            None => existing.status,
        };

        let attendance = sqlx::query_as::<_, Attendance>(&format!(
            "UPDATE attendances SET status = $1, remarks = $2
             WHERE id = $3
             RETURNING {ATTENDANCE_COLUMNS}"
        ))
        .bind(&status)
        .bind(dto.remarks.or(existing.remarks))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(attendance)
    }
}

fn validate_status(status: &str) -> Result<&str, AppError> {
    if ATTENDANCE_STATUSES.contains(&status) {
        Ok(status)
    } else {
        Err(AppError::bad_request(
            "status must be one of 'present', 'absent', 'late'",
        ))
    }
}
