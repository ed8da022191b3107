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
use crate::middleware::role::{OwnedResource, RequireAdmin, ensure_owner_or_elevated};
use crate::modules::auth::model::ErrorResponse;
use crate::modules::classes::model::Class;
use crate::modules::classes::service::ClassService;
use crate::modules::exams::model::Exam;
use crate::modules::exams::service::ExamService;
use crate::modules::schedules::model::ClassSchedule;
use crate::modules::schedules::service::ScheduleService;
use crate::modules::students::model::StudentRead;
use crate::modules::students::service::StudentService;
use crate::modules::subjects::model::Subject;
use crate::modules::subjects::service::SubjectService;
use crate::modules::teachers::model::{CreateTeacherDto, TeacherRead, UpdateTeacherDto};
use crate::modules::teachers::service::TeacherService;
use crate::modules::users::model::PasswordUpdateDto;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTeachersQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Teacher created", body = TeacherRead),
        (status = 400, description = "Validation error or duplicate identifier", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn create_teacher(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateTeacherDto>,
) -> Result<(StatusCode, Json<TeacherRead>), AppError> {
    let teacher = TeacherService::create_teacher(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

#[utoipa::path(
    get,
    path = "/api/teachers",
    params(ListTeachersQuery),
    responses((status = 200, description = "List of teachers", body = [TeacherRead])),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn list_teachers(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListTeachersQuery>,
) -> Result<Json<Vec<TeacherRead>>, AppError> {
    let teachers = TeacherService::list_teachers(
        &state.db,
        params.skip.unwrap_or(0),
        params.limit.unwrap_or(100),
    )
    .await?;
    Ok(Json(teachers))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}",
    params(("id" = i32, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher details", body = TeacherRead),
        (status = 403, description = "Not your profile", body = ErrorResponse),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, current))]
pub async fn get_teacher(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<TeacherRead>, AppError> {
    let teacher = TeacherService::get_teacher(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Teacher, teacher.user.id)?;
    Ok(Json(teacher))
}

#[utoipa::path(
    put,
    path = "/api/teachers/{id}",
    params(("id" = i32, Path, description = "Teacher ID")),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = TeacherRead),
        (status = 403, description = "Not your profile", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, current, dto))]
pub async fn update_teacher(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<TeacherRead>, AppError> {
    let existing = TeacherService::get_teacher(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Teacher, existing.user.id)?;
    let teacher = TeacherService::update_teacher(&state.db, id, dto).await?;
    Ok(Json(teacher))
}

#[utoipa::path(
    delete,
    path = "/api/teachers/{id}",
    params(("id" = i32, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher deleted"),
        (status = 404, description = "Teacher not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    TeacherService::delete_teacher(&state.db, id).await?;
    Ok(Json(json!({"message": "Teacher deleted successfully"})))
}

/// A teacher may only change their own password; admins may change any.
#[utoipa::path(
    patch,
    path = "/api/teachers/{id}/password",
    params(("id" = i32, Path, description = "Teacher ID")),
    request_body = PasswordUpdateDto,
    responses(
        (status = 200, description = "Password updated"),
        (status = 403, description = "Not your profile", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, current, dto))]
pub async fn update_teacher_password(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<PasswordUpdateDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let teacher = TeacherService::get_teacher(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Teacher, teacher.user.id)?;

    crate::modules::users::service::UserService::update_password(
        &state.db,
        teacher.user.id,
        &dto.password,
    )
    .await?;
    Ok(Json(json!({"message": "Password updated successfully"})))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}/subjects",
    params(("id" = i32, Path, description = "Teacher ID")),
    responses((status = 200, description = "Subjects taught by the teacher", body = [Subject])),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, current))]
pub async fn get_teacher_subjects(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Subject>>, AppError> {
    let teacher = TeacherService::get_teacher(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Teacher, teacher.user.id)?;
    let subjects = SubjectService::list_by_teacher(&state.db, id).await?;
    Ok(Json(subjects))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}/classes",
    params(("id" = i32, Path, description = "Teacher ID")),
    responses((status = 200, description = "Classes the teacher is attached to", body = [Class])),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, current))]
pub async fn get_teacher_classes(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Class>>, AppError> {
    let teacher = TeacherService::get_teacher(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Teacher, teacher.user.id)?;
    let classes = ClassService::list_for_teacher(&state.db, id).await?;
    Ok(Json(classes))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}/students",
    params(("id" = i32, Path, description = "Teacher ID")),
    responses((status = 200, description = "Students in the teacher's classes", body = [StudentRead])),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, current))]
pub async fn get_teacher_students(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<StudentRead>>, AppError> {
    let teacher = TeacherService::get_teacher(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Teacher, teacher.user.id)?;

    let classes = ClassService::list_for_teacher(&state.db, id).await?;
    let class_ids: Vec<i32> = classes.iter().map(|c| c.id).collect();
    let students = StudentService::list_by_class_ids(&state.db, &class_ids).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}/exams",
    params(("id" = i32, Path, description = "Teacher ID")),
    responses((status = 200, description = "Exams for the teacher's subjects", body = [Exam])),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, current))]
pub async fn get_teacher_exams(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Exam>>, AppError> {
    let teacher = TeacherService::get_teacher(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Teacher, teacher.user.id)?;
    let exams = ExamService::list_for_teacher(&state.db, id).await?;
    Ok(Json(exams))
}

#[utoipa::path(
    get,
    path = "/api/teachers/{id}/schedule",
    params(("id" = i32, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Weekly schedule for the teacher", body = [ClassSchedule]),
        (status = 403, description = "Not your schedule", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, current))]
pub async fn get_teacher_schedule(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ClassSchedule>>, AppError> {
    let teacher = TeacherService::get_teacher(&state.db, id).await?;
    ensure_owner_or_elevated(&current, OwnedResource::Teacher, teacher.user.id)?;
    let schedule = ScheduleService::list_by_teacher(&state.db, id).await?;
    Ok(Json(schedule))
}
