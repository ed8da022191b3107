use chrono::NaiveTime;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::schedules::model::{
    ClassSchedule, CreateScheduleDto, UpdateScheduleDto, WEEKDAYS,
};
use crate::modules::subjects::service::SubjectService;
use crate::utils::errors::AppError;

const SCHEDULE_COLUMNS: &str =
    "id, subject_id, class_id, teacher_id, day_of_week, start_time, end_time, room";

pub struct ScheduleService;

impl ScheduleService {
    /// The overlap check against the teacher's other slots on the same
    /// day is a best-effort pre-check; there is no unique index that can
    /// enforce interval disjointness.
    #[instrument(skip(db, dto))]
    pub async fn create_schedule(
        db: &PgPool,
        dto: CreateScheduleDto,
    ) -> Result<ClassSchedule, AppError> {
        let subject = SubjectService::get_subject(db, dto.subject_id).await?;
        if subject.class_id != dto.class_id {
            return Err(AppError::bad_request(
                "Subject does not belong to the given class",
            ));
        }

        let day = normalize_weekday(&dto.day_of_week)?;
        let (start, end) = parse_slot(&dto.start_time, &dto.end_time)?;

        Self::ensure_no_overlap(db, dto.teacher_id, &day, start, end, None).await?;

        let schedule = sqlx::query_as::<_, ClassSchedule>(&format!(
            "INSERT INTO class_schedules
                 (subject_id, class_id, teacher_id, day_of_week, start_time, end_time, room)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {SCHEDULE_COLUMNS}"
        ))
        .bind(dto.subject_id)
        .bind(dto.class_id)
        .bind(dto.teacher_id)
        .bind(&day)
        .bind(&dto.start_time)
        .bind(&dto.end_time)
        .bind(&dto.room)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(schedule)
    }

    #[instrument(skip(db))]
    pub async fn list_schedules(
        db: &PgPool,
        class_id: Option<i32>,
        teacher_id: Option<i32>,
    ) -> Result<Vec<ClassSchedule>, AppError> {
        let mut sql = format!("SELECT {SCHEDULE_COLUMNS} FROM class_schedules WHERE 1 = 1");
        if class_id.is_some() {
            sql.push_str(" AND class_id = $1");
        }
        if teacher_id.is_some() {
            sql.push_str(if class_id.is_some() {
                " AND teacher_id = $2"
            } else {
                " AND teacher_id = $1"
            });
        }
        sql.push_str(" ORDER BY day_of_week, start_time");

        let mut query = sqlx::query_as::<_, ClassSchedule>(&sql);
        if let Some(class_id) = class_id {
            query = query.bind(class_id);
        }
        if let Some(teacher_id) = teacher_id {
            query = query.bind(teacher_id);
        }

        query.fetch_all(db).await.map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn list_by_teacher(
        db: &PgPool,
        teacher_id: i32,
    ) -> Result<Vec<ClassSchedule>, AppError> {
        sqlx::query_as::<_, ClassSchedule>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM class_schedules
             WHERE teacher_id = $1
             ORDER BY day_of_week, start_time"
        ))
        .bind(teacher_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_schedule(db: &PgPool, id: i32) -> Result<ClassSchedule, AppError> {
        sqlx::query_as::<_, ClassSchedule>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM class_schedules WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Schedule entry not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_schedule(
        db: &PgPool,
        id: i32,
        dto: UpdateScheduleDto,
    ) -> Result<ClassSchedule, AppError> {
        let existing = Self::get_schedule(db, id).await?;

        let subject_id = dto.subject_id.unwrap_or(existing.subject_id);
        let class_id = dto.class_id.unwrap_or(existing.class_id);
        let teacher_id = dto.teacher_id.unwrap_or(existing.teacher_id);

        let subject = SubjectService::get_subject(db, subject_id).await?;
        if subject.class_id != class_id {
            return Err(AppError::bad_request(
                "Subject does not belong to the given class",
            ));
        }

        let day = normalize_weekday(&dto.day_of_week.unwrap_or(existing.day_of_week))?;
        let start_time = dto.start_time.unwrap_or(existing.start_time);
        let end_time = dto.end_time.unwrap_or(existing.end_time);
        let (start, end) = parse_slot(&start_time, &end_time)?;

        Self::ensure_no_overlap(db, teacher_id, &day, start, end, Some(id)).await?;

        let schedule = sqlx::query_as::<_, ClassSchedule>(&format!(
            "UPDATE class_schedules
             SET subject_id = $1, class_id = $2, teacher_id = $3,
                 day_of_week = $4, start_time = $5, end_time = $6, room = $7
             WHERE id = $8
             RETURNING {SCHEDULE_COLUMNS}"
        ))
        .bind(subject_id)
        .bind(class_id)
        .bind(teacher_id)
        .bind(&day)
        .bind(&start_time)
        .bind(&end_time)
        .bind(dto.room.or(existing.room))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(schedule)
    }

    #[instrument(skip(db))]
    pub async fn delete_schedule(db: &PgPool, id: i32) -> Result<(), AppError> {
        Self::get_schedule(db, id).await?;

        sqlx::query("DELETE FROM class_schedules WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        Ok(())
    }

    async fn ensure_no_overlap(
        db: &PgPool,
        teacher_id: i32,
        day: &str,
        start: NaiveTime,
        end: NaiveTime,
        exclude_id: Option<i32>,
    ) -> Result<(), AppError> {
        let others = sqlx::query_as::<_, ClassSchedule>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM class_schedules
             WHERE teacher_id = $1 AND day_of_week = $2"
        ))
        .bind(teacher_id)
        .bind(day)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        for other in &others {
            if exclude_id == Some(other.id) {
                continue;
            }
            let (other_start, other_end) = parse_slot(&other.start_time, &other.end_time)?;
            if slots_overlap(start, end, other_start, other_end) {
                return Err(AppError::conflict(format!(
                    "Teacher already has a class on {} from {} to {}",
                    day, other.start_time, other.end_time
                )));
            }
        }

        Ok(())
    }
}

fn normalize_weekday(day: &str) -> Result<String, AppError> {
    let day = day.to_lowercase();
    if WEEKDAYS.contains(&day.as_str()) {
        Ok(day)
    } else {
        Err(AppError::bad_request(
            "day_of_week must be a weekday name, e.g. 'monday'",
        ))
    }
}

fn parse_slot(start: &str, end: &str) -> Result<(NaiveTime, NaiveTime), AppError> {
    let start = parse_time(start)?;
    let end = parse_time(end)?;
    if start >= end {
        return Err(AppError::bad_request("start_time must be before end_time"));
    }
    Ok((start, end))
}

fn parse_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::bad_request(format!("Invalid time '{}', expected HH:MM", value)))
}

/// Half-open intervals: back-to-back slots like 09:00-10:00 and
/// 10:00-11:00 do not collide.
fn slots_overlap(a_start: NaiveTime, a_end: NaiveTime, b_start: NaiveTime, b_end: NaiveTime) -> bool {
    a_start < b_end && b_start < a_end
}
