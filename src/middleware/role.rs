//! Role and ownership checks.
//!
//! The elevation policy lives in one table ([`elevated_roles`]) instead of
//! scattered conditionals, because it is deliberately asymmetric: admins
//! are elevated everywhere, teachers are elevated over student-owned
//! resources but NOT over other teachers (a teacher may only touch their
//! own profile, password, and schedule), and students only ever reach
//! their own rows. This mirrors the business policy of the center and is
//! not to be "fixed".

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::middleware::auth::CurrentUser;
use crate::modules::users::model::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Resource types owned by a single user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedResource {
    Student,
    Teacher,
}

/// Roles allowed to act on any instance of the resource, not just their
/// own.
pub fn elevated_roles(resource: OwnedResource) -> &'static [UserRole] {
    match resource {
        OwnedResource::Student => &[UserRole::Admin, UserRole::Teacher],
        OwnedResource::Teacher => &[UserRole::Admin],
    }
}

pub fn check_role(current: &CurrentUser, required: UserRole) -> Result<(), AppError> {
    let role = current.role()?;
    if role != required {
        return Err(AppError::forbidden(format!(
            "Access denied. Required role: {:?}",
            required
        )));
    }
    Ok(())
}

pub fn check_any_role(current: &CurrentUser, allowed: &[UserRole]) -> Result<(), AppError> {
    let role = current.role()?;
    if !allowed.contains(&role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {:?}",
            allowed
        )));
    }
    Ok(())
}

/// Succeeds when the caller's role is elevated for `resource`, or when the
/// caller owns the resource (their user id equals `owner_user_id`).
pub fn ensure_owner_or_elevated(
    current: &CurrentUser,
    resource: OwnedResource,
    owner_user_id: i32,
) -> Result<(), AppError> {
    let role = current.role()?;
    if elevated_roles(resource).contains(&role) || current.id() == owner_user_id {
        return Ok(());
    }
    Err(AppError::forbidden(
        "Access denied. You may only access your own records.",
    ))
}

/// Extractor for admin-only endpoints.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = CurrentUser::from_request_parts(parts, state).await?;
        check_role(&current, UserRole::Admin)?;
        Ok(RequireAdmin(current))
    }
}

/// Extractor for staff endpoints (admin or teacher).
#[derive(Debug, Clone)]
pub struct RequireStaff(pub CurrentUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let current = CurrentUser::from_request_parts(parts, state).await?;
        check_any_role(&current, &[UserRole::Admin, UserRole::Teacher])?;
        Ok(RequireStaff(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::users::model::User;
    use chrono::Utc;

    fn user_with(id: i32, role: UserRole) -> CurrentUser {
        CurrentUser(User {
            id,
            username: format!("user{}", id),
            email: None,
            full_name: "Test User".to_string(),
            phone: None,
            photo_url: None,
            role: role.as_str().to_string(),
            is_active: true,
            created_at: Utc::now(),
        })
    }

    #[test]
    fn admin_elevated_for_both_resources() {
        let admin = user_with(1, UserRole::Admin);
        assert!(ensure_owner_or_elevated(&admin, OwnedResource::Student, 99).is_ok());
        assert!(ensure_owner_or_elevated(&admin, OwnedResource::Teacher, 99).is_ok());
    }

    #[test]
    fn teacher_elevated_for_students_only() {
        let teacher = user_with(2, UserRole::Teacher);
        assert!(ensure_owner_or_elevated(&teacher, OwnedResource::Student, 99).is_ok());
        assert!(ensure_owner_or_elevated(&teacher, OwnedResource::Teacher, 99).is_err());
        // still allowed on their own teacher resource
        assert!(ensure_owner_or_elevated(&teacher, OwnedResource::Teacher, 2).is_ok());
    }

    #[test]
    fn student_only_reaches_own_rows() {
        let student = user_with(3, UserRole::Student);
        assert!(ensure_owner_or_elevated(&student, OwnedResource::Student, 3).is_ok());
        assert!(ensure_owner_or_elevated(&student, OwnedResource::Student, 4).is_err());
        assert!(ensure_owner_or_elevated(&student, OwnedResource::Teacher, 3).is_ok());
    }

    #[test]
    fn role_checks() {
        let teacher = user_with(5, UserRole::Teacher);
        assert!(check_role(&teacher, UserRole::Teacher).is_ok());
        assert!(check_role(&teacher, UserRole::Admin).is_err());
        assert!(check_any_role(&teacher, &[UserRole::Admin, UserRole::Teacher]).is_ok());
        assert!(check_any_role(&teacher, &[UserRole::Admin]).is_err());
    }
}
