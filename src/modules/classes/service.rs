use sqlx::PgPool;
use tracing::instrument;

use crate::modules::classes::model::{Class, CreateClassDto, PublicClass, UpdateClassDto};
use crate::utils::errors::{AppError, conflict_on_unique};

const CLASS_COLUMNS: &str =
    "id, name, grade, section, academic_year, capacity, class_teacher_id";

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db, dto))]
    pub async fn create_class(db: &PgPool, dto: CreateClassDto) -> Result<Class, AppError> {
        let class = sqlx::query_as::<_, Class>(&format!(
            "INSERT INTO classes (name, grade, section, academic_year, capacity, class_teacher_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {CLASS_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(dto.grade)
        .bind(&dto.section)
        .bind(&dto.academic_year)
        .bind(dto.capacity.unwrap_or(30))
        .bind(dto.class_teacher_id)
        .fetch_one(db)
        .await
        .map_err(|e| conflict_on_unique(e, "A class with this name already exists"))?;

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn list_classes(db: &PgPool) -> Result<Vec<Class>, AppError> {
        sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes ORDER BY grade, name"
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn public_classes(db: &PgPool) -> Result<Vec<PublicClass>, AppError> {
        sqlx::query_as::<_, PublicClass>(
            "SELECT id, name, grade, section, academic_year, capacity
             FROM classes ORDER BY grade, name",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_class(db: &PgPool, id: i32) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(&format!("SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("Class not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_class(
        db: &PgPool,
        id: i32,
        dto: UpdateClassDto,
    ) -> Result<Class, AppError> {
        let existing = Self::get_class(db, id).await?;

        let class = sqlx::query_as::<_, Class>(&format!(
            "UPDATE classes
             SET name = $1, grade = $2, section = $3, academic_year = $4,
                 capacity = $5, class_teacher_id = $6
             WHERE id = $7
             RETURNING {CLASS_COLUMNS}"
        ))
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.grade.unwrap_or(existing.grade))
        .bind(dto.section.or(existing.section))
        .bind(dto.academic_year.or(existing.academic_year))
        .bind(dto.capacity.unwrap_or(existing.capacity))
        .bind(dto.class_teacher_id.or(existing.class_teacher_id))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| conflict_on_unique(e, "A class with this name already exists"))?;

        Ok(class)
    }

    /// Deletion is blocked while the class still has students or subjects;
    /// the error names the blocking count so the admin knows what to move.
    #[instrument(skip(db))]
    pub async fn delete_class(db: &PgPool, id: i32) -> Result<(), AppError> {
        Self::get_class(db, id).await?;

        let student_count = Self::enrolled_count(db, id).await?;
        if student_count > 0 {
            return Err(AppError::conflict(format!(
                "Cannot delete class: {} student(s) are still enrolled",
                student_count
            )));
        }

        let subject_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subjects WHERE class_id = $1")
                .bind(id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;
        if subject_count > 0 {
            return Err(AppError::conflict(format!(
                "Cannot delete class: {} subject(s) are still assigned",
                subject_count
            )));
        }

        sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        Ok(())
    }

    /// Classes a teacher is attached to, either as class teacher or
    /// through a subject they teach.
    #[instrument(skip(db))]
    pub async fn list_for_teacher(db: &PgPool, teacher_id: i32) -> Result<Vec<Class>, AppError> {
        sqlx::query_as::<_, Class>(
            "SELECT DISTINCT c.id, c.name, c.grade, c.section, c.academic_year,
                    c.capacity, c.class_teacher_id
             FROM classes c
             LEFT JOIN subjects s ON s.class_id = c.id
             WHERE c.class_teacher_id = $1 OR s.teacher_id = $1
             ORDER BY c.id",
        )
        .bind(teacher_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    pub async fn enrolled_count(db: &PgPool, class_id: i32) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students WHERE class_id = $1")
            .bind(class_id)
            .fetch_one(db)
            .await
            .map_err(AppError::database)
    }

    /// Capacity gate used by direct student creation and by admission
    /// submission.
    pub async fn ensure_capacity(db: &PgPool, class_id: i32) -> Result<(), AppError> {
        let class = Self::get_class(db, class_id).await?;
        let enrolled = Self::enrolled_count(db, class_id).await?;
        if enrolled >= class.capacity as i64 {
            return Err(AppError::conflict(format!(
                "Class {} is full ({}/{} seats taken)",
                class.name, enrolled, class.capacity
            )));
        }
        Ok(())
    }
}
