use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use utoipa::IntoParams;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::{
    OwnedResource, RequireAdmin, RequireStaff, ensure_owner_or_elevated,
};
use crate::modules::attendance::model::Attendance;
use crate::modules::attendance::service::AttendanceService;
use crate::modules::auth::model::ErrorResponse;
use crate::modules::materials::model::StudyMaterial;
use crate::modules::materials::service::MaterialService;
use crate::modules::notices::model::Notice;
use crate::modules::notices::service::NoticeService;
use crate::modules::results::model::ExamResult;
use crate::modules::results::service::ResultService;
use crate::modules::students::model::{CreateStudentDto, StudentRead, UpdateStudentDto};
use crate::modules::students::service::StudentService;
use crate::modules::subjects::model::Subject;
use crate::modules::subjects::service::SubjectService;
use crate::modules::users::model::PasswordUpdateDto;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListStudentsQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub class_id: Option<i32>,
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student enrolled", body = StudentRead),
        (status = 400, description = "Validation error, class full, or duplicate identifier", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<StudentRead>), AppError> {
    let student = StudentService::create_student(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/students",
    params(ListStudentsQuery),
    responses((status = 200, description = "List of students", body = [StudentRead])),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<ListStudentsQuery>,
) -> Result<Json<Vec<StudentRead>>, AppError> {
    let students = StudentService::list_students(
        &state.db,
        params.skip.unwrap_or(0),
        params.limit.unwrap_or(100),
        params.class_id,
    )
    .await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = StudentRead),
        (status = 403, description = "Not your profile", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, current))]
pub async fn get_student(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<StudentRead>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Student, student.user.id)?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = StudentRead),
        (status = 403, description = "Not your profile", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, current, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<StudentRead>, AppError> {
    let existing = StudentService::get_student(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Student, existing.user.id)?;
    let student = StudentService::update_student(&state.db, id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    StudentService::delete_student(&state.db, id).await?;
    Ok(Json(json!({"message": "Student deleted successfully"})))
}

#[utoipa::path(
    patch,
    path = "/api/students/{id}/password",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = PasswordUpdateDto,
    responses(
        (status = 200, description = "Password updated"),
        (status = 403, description = "Not your profile", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, current, dto))]
pub async fn update_student_password(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<PasswordUpdateDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Student, student.user.id)?;

    crate::modules::users::service::UserService::update_password(
        &state.db,
        student.user.id,
        &dto.password,
    )
    .await?;
    Ok(Json(json!({"message": "Password updated successfully"})))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/attendance",
    params(("id" = i32, Path, description = "Student ID")),
    responses((status = 200, description = "Attendance history", body = [Attendance])),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, current))]
pub async fn get_student_attendance(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Attendance>>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Student, student.user.id)?;
    let records = AttendanceService::list_for_student(&state.db, id).await?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/exam-results",
    params(("id" = i32, Path, description = "Student ID")),
    responses((status = 200, description = "Exam results for the student", body = [ExamResult])),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, current))]
pub async fn get_student_exam_results(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ExamResult>>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Student, student.user.id)?;
    let results = ResultService::list_for_student(&state.db, id).await?;
    Ok(Json(results))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/subjects",
    params(("id" = i32, Path, description = "Student ID")),
    responses((status = 200, description = "Subjects for the student's class", body = [Subject])),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, current))]
pub async fn get_student_subjects(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Subject>>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Student, student.user.id)?;
    let subjects = SubjectService::list_by_class(&state.db, student.student.class_id).await?;
    Ok(Json(subjects))
}

/// Students only see materials marked public; staff fetch the full set
/// through the materials listing instead.
#[utoipa::path(
    get,
    path = "/api/students/{id}/study-materials",
    params(("id" = i32, Path, description = "Student ID")),
    responses((status = 200, description = "Public study materials for the student's class", body = [StudyMaterial])),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, current))]
pub async fn get_student_study_materials(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<StudyMaterial>>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Student, student.user.id)?;
    let materials =
        MaterialService::list_public_for_class(&state.db, student.student.class_id).await?;
    Ok(Json(materials))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/notices",
    params(("id" = i32, Path, description = "Student ID")),
    responses((status = 200, description = "Active notices visible to students", body = [Notice])),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, current))]
pub async fn get_student_notices(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Notice>>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Student, student.user.id)?;
    let notices = NoticeService::list_visible_to(&state.db, "student").await?;
    Ok(Json(notices))
}
