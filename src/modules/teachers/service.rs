use sqlx::PgPool;
use tracing::instrument;

use crate::modules::teachers::model::{CreateTeacherDto, Teacher, TeacherRead, UpdateTeacherDto};
use crate::modules::users::model::User;
use crate::utils::errors::{AppError, conflict_on_unique};
use crate::utils::password::hash_password;

const TEACHER_COLUMNS: &str =
    "id, user_id, employee_id, qualification, experience_years, salary, joining_date";
const USER_COLUMNS: &str =
    "id, username, email, full_name, phone, photo_url, role, is_active, created_at";

pub struct TeacherService;

impl TeacherService {
    /// User and teacher rows are created in one transaction; a duplicate
    /// username, email, or employee id rolls both back.
    #[instrument(skip(db, dto))]
    pub async fn create_teacher(db: &PgPool, dto: CreateTeacherDto) -> Result<TeacherRead, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let mut tx = db.begin().await.map_err(AppError::database)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, full_name, phone, role, password_hash)
             VALUES ($1, $2, $3, $4, 'teacher', $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&dto.full_name)
        .bind(&dto.phone)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "Username or email already registered"))?;

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "INSERT INTO teachers (user_id, employee_id, qualification, experience_years, salary)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(user.id)
        .bind(&dto.employee_id)
        .bind(&dto.qualification)
        .bind(dto.experience_years.unwrap_or(0))
        .bind(dto.salary)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "Employee ID already registered"))?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(TeacherRead { teacher, user })
    }

    #[instrument(skip(db))]
    pub async fn list_teachers(
        db: &PgPool,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<TeacherRead>, AppError> {
        let teachers = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers ORDER BY id OFFSET $1 LIMIT $2"
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        let user_ids: Vec<i32> = teachers.iter().map(|t| t.user_id).collect();
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)"
        ))
        .bind(&user_ids)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        teachers
            .into_iter()
            .map(|teacher| {
                let user = users
                    .iter()
                    .find(|u| u.id == teacher.user_id)
                    .cloned()
                    .ok_or_else(|| {
                        AppError::internal(anyhow::anyhow!(
                            "Teacher {} has no user row",
                            teacher.id
                        ))
                    })?;
                Ok(TeacherRead { teacher, user })
            })
            .collect()
    }

    #[instrument(skip(db))]
    pub async fn get_teacher(db: &PgPool, id: i32) -> Result<TeacherRead, AppError> {
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Teacher not found"))?;

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(teacher.user_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(TeacherRead { teacher, user })
    }

    #[instrument(skip(db, dto))]
    pub async fn update_teacher(
        db: &PgPool,
        id: i32,
        dto: UpdateTeacherDto,
    ) -> Result<TeacherRead, AppError> {
        let existing = Self::get_teacher(db, id).await?;

        let mut tx = db.begin().await.map_err(AppError::database)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET email = $1, full_name = $2, phone = $3, photo_url = $4
             WHERE id = $5
             RETURNING {USER_COLUMNS}"
        ))
        .bind(dto.email.or(existing.user.email))
        .bind(dto.full_name.unwrap_or(existing.user.full_name))
        .bind(dto.phone.or(existing.user.phone))
        .bind(dto.photo_url.or(existing.user.photo_url))
        .bind(existing.user.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "Email already registered"))?;

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "UPDATE teachers SET qualification = $1, experience_years = $2, salary = $3
             WHERE id = $4
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(dto.qualification.or(existing.teacher.qualification))
        .bind(
            dto.experience_years
                .unwrap_or(existing.teacher.experience_years),
        )
        .bind(dto.salary.or(existing.teacher.salary))
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(TeacherRead { teacher, user })
    }

    /// Removes the teacher and its owning user together. Rows that still
    /// reference the teacher (subjects, schedules, class assignments)
    /// make the delete fail on the foreign key.
    #[instrument(skip(db))]
    pub async fn delete_teacher(db: &PgPool, id: i32) -> Result<(), AppError> {
        let existing = Self::get_teacher(db, id).await?;

        let mut tx = db.begin().await.map_err(AppError::database)?;

        sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::database)?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(existing.user.id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(())
    }
}
