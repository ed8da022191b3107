use sqlx::PgPool;
use tracing::instrument;

use crate::modules::users::model::{CreateUserDto, UpdateUserDto, User};
use crate::utils::errors::{AppError, conflict_on_unique};
use crate::utils::password::hash_password;

const USER_COLUMNS: &str =
    "id, username, email, full_name, phone, photo_url, role, is_active, created_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db, dto))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let existing = sqlx::query_scalar::<_, i32>(
            "SELECT id FROM users WHERE username = $1 OR email = $2",
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::conflict("Username or email already registered"));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, full_name, phone, photo_url, role, password_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&dto.full_name)
        .bind(&dto.phone)
        .bind(&dto.photo_url)
        .bind(dto.role.as_str())
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| conflict_on_unique(e, "Username or email already registered"))?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn list_users(
        db: &PgPool,
        role: Option<&str>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE ($1::text IS NULL OR role = $1)
             ORDER BY id
             OFFSET $2 LIMIT $3"
        ))
        .bind(role)
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(users)
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: i32) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_user(db: &PgPool, id: i32, dto: UpdateUserDto) -> Result<User, AppError> {
        let existing = Self::get_user(db, id).await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET email = $1, full_name = $2, phone = $3, photo_url = $4, is_active = $5
             WHERE id = $6
             RETURNING {USER_COLUMNS}"
        ))
        .bind(dto.email.or(existing.email))
        .bind(dto.full_name.unwrap_or(existing.full_name))
        .bind(dto.phone.or(existing.phone))
        .bind(dto.photo_url.or(existing.photo_url))
        .bind(dto.is_active.unwrap_or(existing.is_active))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| conflict_on_unique(e, "Email already registered"))?;

        Ok(user)
    }

    #[instrument(skip(db, password))]
    pub async fn update_password(db: &PgPool, id: i32, password: &str) -> Result<(), AppError> {
        let password_hash = hash_password(password)?;

        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(&password_hash)
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        Ok(())
    }
}
