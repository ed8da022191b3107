use sqlx::PgPool;
use tracing::instrument;

use crate::modules::classes::service::ClassService;
use crate::modules::students::model::{CreateStudentDto, Student, StudentRead, UpdateStudentDto};
use crate::modules::users::model::User;
use crate::utils::codegen::next_roll_number;
use crate::utils::errors::{AppError, conflict_on_unique};
use crate::utils::password::hash_password;

const STUDENT_COLUMNS: &str =
    "id, user_id, class_id, roll_number, parent_name, parent_phone, address, \
     date_of_birth, admission_date";
const USER_COLUMNS: &str =
    "id, username, email, full_name, phone, photo_url, role, is_active, created_at";

pub struct StudentService;

impl StudentService {
    /// Enrollment checks class capacity first, then creates the user and
    /// student rows in one transaction. The roll number is generated from
    /// the highest existing one when the caller leaves it out.
    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<StudentRead, AppError> {
        ClassService::ensure_capacity(db, dto.class_id).await?;

        let roll_number = match dto.roll_number {
            Some(roll) => roll,
            None => {
                let existing =
                    sqlx::query_scalar::<_, String>("SELECT roll_number FROM students")
                        .fetch_all(db)
                        .await
                        .map_err(AppError::database)?;
                next_roll_number(&existing)
            }
        };

        let password_hash = hash_password(&dto.password)?;

        let mut tx = db.begin().await.map_err(AppError::database)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, full_name, phone, role, password_hash)
             VALUES ($1, $2, $3, $4, 'student', $5)
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

        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (user_id, class_id, roll_number, parent_name,
                                   parent_phone, address, date_of_birth)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(user.id)
        .bind(dto.class_id)
        .bind(&roll_number)
        .bind(&dto.parent_name)
        .bind(&dto.parent_phone)
        .bind(&dto.address)
        .bind(dto.date_of_birth)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "Roll number already registered"))?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(StudentRead { student, user })
    }

    #[instrument(skip(db))]
    pub async fn list_students(
        db: &PgPool,
        skip: i64,
        limit: i64,
        class_id: Option<i32>,
    ) -> Result<Vec<StudentRead>, AppError> {
        let students = match class_id {
            Some(class_id) => {
                sqlx::query_as::<_, Student>(&format!(
                    "SELECT {STUDENT_COLUMNS} FROM students WHERE class_id = $1
                     ORDER BY id OFFSET $2 LIMIT $3"
                ))
                .bind(class_id)
                .bind(skip)
                .bind(limit)
                .fetch_all(db)
                .await
            }
            None => {
                sqlx::query_as::<_, Student>(&format!(
                    "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id OFFSET $1 LIMIT $2"
                ))
                .bind(skip)
                .bind(limit)
                .fetch_all(db)
                .await
            }
        }
        .map_err(AppError::database)?;

        Self::attach_users(db, students).await
    }

    #[instrument(skip(db))]
    pub async fn list_by_class_ids(
        db: &PgPool,
        class_ids: &[i32],
    ) -> Result<Vec<StudentRead>, AppError> {
        if class_ids.is_empty() {
            return Ok(Vec::new());
        }

        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE class_id = ANY($1) ORDER BY id"
        ))
        .bind(class_ids)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Self::attach_users(db, students).await
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: i32) -> Result<StudentRead, AppError> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Student not found"))?;

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(student.user_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(StudentRead { student, user })
    }

    /// A class change re-runs the capacity gate against the target class.
    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: i32,
        dto: UpdateStudentDto,
    ) -> Result<StudentRead, AppError> {
        let existing = Self::get_student(db, id).await?;

        if let Some(new_class_id) = dto.class_id
            && new_class_id != existing.student.class_id
        {
            ClassService::ensure_capacity(db, new_class_id).await?;
        }

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

        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students SET class_id = $1, parent_name = $2, parent_phone = $3,
                                 address = $4, date_of_birth = $5
             WHERE id = $6
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(dto.class_id.unwrap_or(existing.student.class_id))
        .bind(dto.parent_name.or(existing.student.parent_name))
        .bind(dto.parent_phone.or(existing.student.parent_phone))
        .bind(dto.address.or(existing.student.address))
        .bind(dto.date_of_birth.or(existing.student.date_of_birth))
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(StudentRead { student, user })
    }

    /// Removes the student and its owning user together. Attendance and
    /// exam result rows that still reference the student make the delete
    /// fail on the foreign key.
    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: i32) -> Result<(), AppError> {
        let existing = Self::get_student(db, id).await?;

        let mut tx = db.begin().await.map_err(AppError::database)?;

        sqlx::query("DELETE FROM students WHERE id = $1")
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

    async fn attach_users(
        db: &PgPool,
        students: Vec<Student>,
    ) -> Result<Vec<StudentRead>, AppError> {
        let user_ids: Vec<i32> = students.iter().map(|s| s.user_id).collect();
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)"
        ))
        .bind(&user_ids)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        students
            .into_iter()
            .map(|student| {
                let user = users
                    .iter()
                    .find(|u| u.id == student.user_id)
                    .cloned()
                    .ok_or_else(|| {
                        AppError::internal(anyhow::anyhow!(
                            "Student {} has no user row",
                            student.id
                        ))
                    })?;
                Ok(StudentRead { student, user })
            })
            .collect()
    }
}
