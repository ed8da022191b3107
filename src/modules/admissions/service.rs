use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::admissions::model::{
    AdmissionApprovalResponse, AdmissionRequest, CreateAdmissionDto, ReviewAdmissionDto,
};
use crate::modules::classes::service::ClassService;
use crate::modules::students::model::{Student, StudentRead};
use crate::modules::users::model::User;
use crate::utils::codegen::{admission_username, next_roll_number, roll_number_digits};
use crate::utils::errors::{AppError, conflict_on_unique};
use crate::utils::password::{generate_password, hash_password};

const REQUEST_COLUMNS: &str =
    "id, applicant_name, applicant_email, applicant_phone, parent_name, parent_phone, \
     address, date_of_birth, class_id, status, reviewed_by_id, review_notes, \
     reviewed_at, created_at";
const STUDENT_COLUMNS: &str =
    "id, user_id, class_id, roll_number, parent_name, parent_phone, address, \
     date_of_birth, admission_date";
const USER_COLUMNS: &str =
    "id, username, email, full_name, phone, photo_url, role, is_active, created_at";

pub struct AdmissionService;

impl AdmissionService {
    /// Public submission. The capacity gate runs here as well so the
    /// applicant learns about a full class immediately, not weeks later
    /// at review time.
    #[instrument(skip(db, dto))]
    pub async fn submit_request(
        db: &PgPool,
        dto: CreateAdmissionDto,
    ) -> Result<AdmissionRequest, AppError> {
        ClassService::ensure_capacity(db, dto.class_id).await?;

        let request = sqlx::query_as::<_, AdmissionRequest>(&format!(
            "INSERT INTO admission_requests
                 (applicant_name, applicant_email, applicant_phone, parent_name,
                  parent_phone, address, date_of_birth, class_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(&dto.applicant_name)
        .bind(&dto.applicant_email)
        .bind(&dto.applicant_phone)
        .bind(&dto.parent_name)
        .bind(&dto.parent_phone)
        .bind(&dto.address)
        .bind(dto.date_of_birth)
        .bind(dto.class_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(request)
    }

    #[instrument(skip(db))]
    pub async fn list_requests(
        db: &PgPool,
        status: Option<String>,
    ) -> Result<Vec<AdmissionRequest>, AppError> {
        match status {
            Some(status) => sqlx::query_as::<_, AdmissionRequest>(&format!(
                "SELECT {REQUEST_COLUMNS} FROM admission_requests
                 WHERE status = $1 ORDER BY created_at DESC"
            ))
            .bind(status)
            .fetch_all(db)
            .await
            .map_err(AppError::database),
            None => sqlx::query_as::<_, AdmissionRequest>(&format!(
                "SELECT {REQUEST_COLUMNS} FROM admission_requests ORDER BY created_at DESC"
            ))
            .fetch_all(db)
            .await
            .map_err(AppError::database),
        }
    }

    #[instrument(skip(db))]
    pub async fn get_request(db: &PgPool, id: i32) -> Result<AdmissionRequest, AppError> {
        sqlx::query_as::<_, AdmissionRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM admission_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Admission request not found"))
    }

    /// Approval is a single transaction: lock the request row, re-check
    /// capacity, mint the roll number, username, and password, create the
    /// user and student, and mark the request approved. The clear-text
    /// password exists only in the response.
    #[instrument(skip(db, dto))]
    pub async fn approve_request(
        db: &PgPool,
        id: i32,
        reviewer_id: i32,
        dto: ReviewAdmissionDto,
    ) -> Result<AdmissionApprovalResponse, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let request = sqlx::query_as::<_, AdmissionRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM admission_requests WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Admission request not found"))?;

        if request.status != "pending" {
            return Err(AppError::conflict(format!(
                "Admission request has already been {}",
                request.status
            )));
        }

        let class = ClassService::get_class(db, request.class_id).await?;
        let enrolled = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM students WHERE class_id = $1",
        )
        .bind(request.class_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;
        if enrolled >= class.capacity as i64 {
            return Err(AppError::conflict(format!(
                "Class {} is full ({}/{} seats taken)",
                class.name, enrolled, class.capacity
            )));
        }

        let existing_rolls = sqlx::query_scalar::<_, String>("SELECT roll_number FROM students")
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::database)?;
        let roll_number = next_roll_number(&existing_rolls);

        let username =
            Self::free_username(&mut tx, &request.applicant_name, roll_number_digits(&roll_number))
                .await?;
        let password = generate_password();
        let password_hash = hash_password(&password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, full_name, phone, role, password_hash)
             VALUES ($1, $2, $3, $4, 'student', $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&username)
        .bind(&request.applicant_email)
        .bind(&request.applicant_name)
        .bind(&request.applicant_phone)
        .bind(&password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "Applicant email already registered"))?;

        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (user_id, class_id, roll_number, parent_name,
                                   parent_phone, address, date_of_birth)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(user.id)
        .bind(request.class_id)
        .bind(&roll_number)
        .bind(&request.parent_name)
        .bind(&request.parent_phone)
        .bind(&request.address)
        .bind(request.date_of_birth)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "Roll number already registered"))?;

        let request = sqlx::query_as::<_, AdmissionRequest>(&format!(
            "UPDATE admission_requests
             SET status = 'approved', reviewed_by_id = $1, review_notes = $2, reviewed_at = $3
             WHERE id = $4
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(reviewer_id)
        .bind(&dto.review_notes)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(AdmissionApprovalResponse {
            request,
            student: StudentRead { student, user },
            username,
            password,
        })
    }

    /// Rejection records who said no and why; only pending requests move.
    #[instrument(skip(db, dto))]
    pub async fn reject_request(
        db: &PgPool,
        id: i32,
        reviewer_id: i32,
        dto: ReviewAdmissionDto,
    ) -> Result<AdmissionRequest, AppError> {
        let existing = Self::get_request(db, id).await?;
        if existing.status != "pending" {
            return Err(AppError::conflict(format!(
                "Admission request has already been {}",
                existing.status
            )));
        }

        let request = sqlx::query_as::<_, AdmissionRequest>(&format!(
            "UPDATE admission_requests
             SET status = 'rejected', reviewed_by_id = $1, review_notes = $2, reviewed_at = $3
             WHERE id = $4 AND status = 'pending'
             RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(reviewer_id)
        .bind(&dto.review_notes)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::conflict("Admission request has already been reviewed"))?;

        Ok(request)
    }

    async fn free_username(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        full_name: &str,
        roll_suffix: u32,
    ) -> Result<String, AppError> {
        let base = admission_username(full_name, roll_suffix);
        let mut candidate = base.clone();
        let mut attempt = 1;

        loop {
            let taken = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM users WHERE username = $1",
            )
            .bind(&candidate)
            .fetch_one(&mut **tx)
            .await
            .map_err(AppError::database)?;

            if taken == 0 {
                return Ok(candidate);
            }
            candidate = format!("{base}{attempt}");
            attempt += 1;
        }
    }
}
