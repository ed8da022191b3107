use sqlx::PgPool;
use tracing::instrument;

use crate::modules::materials::model::{CreateMaterialDto, StudyMaterial, UpdateMaterialDto};
use crate::modules::subjects::service::SubjectService;
use crate::utils::errors::AppError;

const MATERIAL_COLUMNS: &str =
    "id, subject_id, created_by_id, title, description, file_path, file_url, \
     file_type, file_size, is_public, created_at";

pub struct MaterialService;

impl MaterialService {
    /// The declared file size is validated against the configured ceiling;
    /// the binary itself lives in external storage.
    #[instrument(skip(db, dto))]
    pub async fn create_material(
        db: &PgPool,
        created_by_id: i32,
        max_upload_bytes: i64,
        dto: CreateMaterialDto,
    ) -> Result<StudyMaterial, AppError> {
        SubjectService::get_subject(db, dto.subject_id).await?;

        if let Some(size) = dto.file_size
            && size > max_upload_bytes
        {
            return Err(AppError::bad_request(format!(
                "file_size ({} bytes) exceeds the upload limit ({} bytes)",
                size, max_upload_bytes
            )));
        }

        let material = sqlx::query_as::<_, StudyMaterial>(&format!(
            "INSERT INTO study_materials
                 (subject_id, created_by_id, title, description, file_path,
                  file_url, file_type, file_size, is_public)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {MATERIAL_COLUMNS}"
        ))
        .bind(dto.subject_id)
        .bind(created_by_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.file_path)
        .bind(&dto.file_url)
        .bind(&dto.file_type)
        .bind(dto.file_size)
        .bind(dto.is_public.unwrap_or(true))
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(material)
    }

    #[instrument(skip(db))]
    pub async fn list_materials(
        db: &PgPool,
        subject_id: Option<i32>,
    ) -> Result<Vec<StudyMaterial>, AppError> {
        match subject_id {
            Some(subject_id) => sqlx::query_as::<_, StudyMaterial>(&format!(
                "SELECT {MATERIAL_COLUMNS} FROM study_materials
                 WHERE subject_id = $1 ORDER BY created_at DESC"
            ))
            .bind(subject_id)
            .fetch_all(db)
            .await
            .map_err(AppError::database),
            None => sqlx::query_as::<_, StudyMaterial>(&format!(
                "SELECT {MATERIAL_COLUMNS} FROM study_materials ORDER BY created_at DESC"
            ))
            .fetch_all(db)
            .await
            .map_err(AppError::database),
        }
    }

    /// Public materials for every subject of a class, the student view.
    #[instrument(skip(db))]
    pub async fn list_public_for_class(
        db: &PgPool,
        class_id: i32,
    ) -> Result<Vec<StudyMaterial>, AppError> {
        sqlx::query_as::<_, StudyMaterial>(&format!(
            "SELECT m.id, m.subject_id, m.created_by_id, m.title, m.description,
                    m.file_path, m.file_url, m.file_type, m.file_size, m.is_public,
                    m.created_at
             FROM study_materials m
             JOIN subjects s ON s.id = m.subject_id
             WHERE s.class_id = $1 AND m.is_public
             ORDER BY m.created_at DESC"
        ))
        .bind(class_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_material(db: &PgPool, id: i32) -> Result<StudyMaterial, AppError> {
        sqlx::query_as::<_, StudyMaterial>(&format!(
            "SELECT {MATERIAL_COLUMNS} FROM study_materials WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Study material not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_material(
        db: &PgPool,
        id: i32,
        max_upload_bytes: i64,
        dto: UpdateMaterialDto,
    ) -> Result<StudyMaterial, AppError> {
        let existing = Self::get_material(db, id).await?;

        if let Some(size) = dto.file_size
            && size > max_upload_bytes
        {
            return Err(AppError::bad_request(format!(
                "file_size ({} bytes) exceeds the upload limit ({} bytes)",
                size, max_upload_bytes
            )));
        }

        let material = sqlx::query_as::<_, StudyMaterial>(&format!(
            "UPDATE study_materials
             SET title = $1, description = $2, file_path = $3, file_url = $4,
                 file_type = $5, file_size = $6, is_public = $7
             WHERE id = $8
             RETURNING {MATERIAL_COLUMNS}"
        ))
        .bind(dto.title.unwrap_or(existing.title))
        .bind(dto.description.or(existing.description))
        .bind(dto.file_path.or(existing.file_path))
        .bind(dto.file_url.or(existing.file_url))
        .bind(dto.file_type.or(existing.file_type))
        .bind(dto.file_size.or(existing.file_size))
        .bind(dto.is_public.unwrap_or(existing.is_public))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(material)
    }

    #[instrument(skip(db))]
    pub async fn delete_material(db: &PgPool, id: i32) -> Result<(), AppError> {
        Self::get_material(db, id).await?;

        sqlx::query("DELETE FROM study_materials WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        Ok(())
    }
}
