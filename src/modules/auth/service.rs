use sqlx::PgPool;
use tracing::instrument;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{LoginRequest, LoginResponse, ProfileResponse, RegisterAdminDto};
use crate::modules::users::model::{User, UserRole};
use crate::utils::errors::{AppError, conflict_on_unique};
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

#[derive(sqlx::FromRow)]
struct UserWithPassword {
    id: i32,
    username: String,
    email: Option<String>,
    full_name: String,
    phone: Option<String>,
    photo_url: Option<String>,
    role: String,
    is_active: bool,
    password_hash: String,
}

#[derive(sqlx::FromRow)]
struct StudentLink {
    id: i32,
    roll_number: String,
    class_id: i32,
}

#[derive(sqlx::FromRow)]
struct TeacherLink {
    id: i32,
    employee_id: String,
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        // Identifier resolves as a username first, then as an email. The
        // error is identical for an unknown identifier and a wrong
        // password so the response does not leak which usernames exist.
        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, username, email, full_name, phone, photo_url, role, is_active, password_hash
             FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        let user = match user {
            Some(u) => Some(u),
            None => sqlx::query_as::<_, UserWithPassword>(
                "SELECT id, username, email, full_name, phone, photo_url, role, is_active, password_hash
                 FROM users WHERE email = $1",
            )
            .bind(&dto.username)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?,
        };

        let user =
            user.ok_or_else(|| AppError::unauthorized("Incorrect username or password"))?;

        if !verify_password(&dto.password, &user.password_hash)? {
            return Err(AppError::unauthorized("Incorrect username or password"));
        }

        if !user.is_active {
            return Err(AppError::unauthorized("Inactive user"));
        }

        let role = UserRole::parse(&user.role)?;
        let access_token = create_access_token(&user.username, role, jwt_config)?;

        let mut profile = ProfileResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            photo_url: user.photo_url,
            role: user.role,
            is_active: user.is_active,
            student_id: None,
            roll_number: None,
            class_id: None,
            teacher_id: None,
            employee_id: None,
        };
        Self::attach_role_links(db, role, &mut profile).await?;

        Ok(LoginResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: profile,
        })
    }

    #[instrument(skip(db, user))]
    pub async fn profile(db: &PgPool, user: &User) -> Result<ProfileResponse, AppError> {
        let mut profile = ProfileResponse {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            phone: user.phone.clone(),
            photo_url: user.photo_url.clone(),
            role: user.role.clone(),
            is_active: user.is_active,
            student_id: None,
            roll_number: None,
            class_id: None,
            teacher_id: None,
            employee_id: None,
        };
        Self::attach_role_links(db, user.role()?, &mut profile).await?;
        Ok(profile)
    }

    async fn attach_role_links(
        db: &PgPool,
        role: UserRole,
        profile: &mut ProfileResponse,
    ) -> Result<(), AppError> {
        match role {
            UserRole::Student => {
                let link = sqlx::query_as::<_, StudentLink>(
                    "SELECT id, roll_number, class_id FROM students WHERE user_id = $1",
                )
                .bind(profile.id)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

                if let Some(link) = link {
                    profile.student_id = Some(link.id);
                    profile.roll_number = Some(link.roll_number);
                    profile.class_id = Some(link.class_id);
                }
            }
            UserRole::Teacher => {
                let link = sqlx::query_as::<_, TeacherLink>(
                    "SELECT id, employee_id FROM teachers WHERE user_id = $1",
                )
                .bind(profile.id)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

                if let Some(link) = link {
                    profile.teacher_id = Some(link.id);
                    profile.employee_id = Some(link.employee_id);
                }
            }
            UserRole::Admin => {}
        }
        Ok(())
    }

    /// Mints an admin account from a one-shot creation code. The code is
    /// claimed (flipped inactive) and the user inserted in a single
    /// transaction, so a failed insert releases nothing.
    #[instrument(skip(db, dto))]
    pub async fn register_admin(db: &PgPool, dto: RegisterAdminDto) -> Result<User, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let claimed = sqlx::query_scalar::<_, i32>(
            "UPDATE admin_creation_codes SET is_active = FALSE
             WHERE code = $1 AND is_active = TRUE
             RETURNING id",
        )
        .bind(&dto.admin_code)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::database)?;

        if claimed.is_none() {
            return Err(AppError::forbidden("Invalid or already used admin code"));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, full_name, phone, role, password_hash)
             VALUES ($1, $2, $3, $4, 'admin', $5)
             RETURNING id, username, email, full_name, phone, photo_url, role, is_active, created_at",
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&dto.full_name)
        .bind(&dto.phone)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "Username or email already registered"))?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(user)
    }
}
