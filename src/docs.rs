use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::admissions::model::{
    AdmissionApprovalResponse, AdmissionRequest, CreateAdmissionDto, ReviewAdmissionDto,
};
use crate::modules::attendance::model::{Attendance, CreateAttendanceDto, UpdateAttendanceDto};
use crate::modules::auth::model::{
    ErrorResponse, LoginRequest, LoginResponse, MessageResponse, ProfileResponse, RegisterAdminDto,
};
use crate::modules::classes::model::{Class, CreateClassDto, PublicClass, UpdateClassDto};
use crate::modules::exams::model::{CreateExamDto, Exam, UpdateExamDto};
use crate::modules::materials::model::{CreateMaterialDto, StudyMaterial, UpdateMaterialDto};
use crate::modules::notices::model::{CreateNoticeDto, Notice, UpdateNoticeDto};
use crate::modules::results::model::{CreateResultDto, ExamResult, UpdateResultDto};
use crate::modules::reviews::model::{CreateReviewDto, TeacherReview};
use crate::modules::schedules::model::{ClassSchedule, CreateScheduleDto, UpdateScheduleDto};
use crate::modules::stats::model::DashboardStats;
use crate::modules::students::model::{CreateStudentDto, Student, StudentRead, UpdateStudentDto};
use crate::modules::subjects::model::{CreateSubjectDto, Subject, UpdateSubjectDto};
use crate::modules::teachers::model::{CreateTeacherDto, Teacher, TeacherRead, UpdateTeacherDto};
use crate::modules::users::model::{
    CreateUserDto, PasswordUpdateDto, UpdateUserDto, User, UserRole,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::me,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::register_admin,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::update_user_password,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::list_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::classes::controller::public_classes,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::list_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::teachers::controller::update_teacher_password,
        crate::modules::teachers::controller::get_teacher_subjects,
        crate::modules::teachers::controller::get_teacher_classes,
        crate::modules::teachers::controller::get_teacher_students,
        crate::modules::teachers::controller::get_teacher_exams,
        crate::modules::teachers::controller::get_teacher_schedule,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::update_student_password,
        crate::modules::students::controller::get_student_attendance,
        crate::modules::students::controller::get_student_exam_results,
        crate::modules::students::controller::get_student_subjects,
        crate::modules::students::controller::get_student_study_materials,
        crate::modules::students::controller::get_student_notices,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::list_subjects,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::schedules::controller::create_schedule,
        crate::modules::schedules::controller::list_schedules,
        crate::modules::schedules::controller::get_schedule,
        crate::modules::schedules::controller::update_schedule,
        crate::modules::schedules::controller::delete_schedule,
        crate::modules::attendance::controller::create_attendance,
        crate::modules::attendance::controller::list_attendance,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::update_attendance,
        crate::modules::exams::controller::create_exam,
        crate::modules::exams::controller::list_exams,
        crate::modules::exams::controller::get_exam,
        crate::modules::exams::controller::update_exam,
        crate::modules::exams::controller::delete_exam,
        crate::modules::results::controller::create_result,
        crate::modules::results::controller::list_results,
        crate::modules::results::controller::get_result,
        crate::modules::results::controller::update_result,
        crate::modules::materials::controller::create_material,
        crate::modules::materials::controller::list_materials,
        crate::modules::materials::controller::get_material,
        crate::modules::materials::controller::update_material,
        crate::modules::materials::controller::delete_material,
        crate::modules::notices::controller::create_notice,
        crate::modules::notices::controller::list_notices,
        crate::modules::notices::controller::get_notice,
        crate::modules::notices::controller::update_notice,
        crate::modules::notices::controller::delete_notice,
        crate::modules::notices::controller::landing_notices,
        crate::modules::reviews::controller::create_review,
        crate::modules::reviews::controller::list_reviews,
        crate::modules::reviews::controller::get_review,
        crate::modules::reviews::controller::delete_review,
        crate::modules::admissions::controller::submit_admission,
        crate::modules::admissions::controller::list_admissions,
        crate::modules::admissions::controller::get_admission,
        crate::modules::admissions::controller::approve_admission,
        crate::modules::admissions::controller::reject_admission,
        crate::modules::stats::controller::dashboard,
    ),
    components(
        schemas(
            User,
            UserRole,
            CreateUserDto,
            UpdateUserDto,
            PasswordUpdateDto,
            LoginRequest,
            LoginResponse,
            ProfileResponse,
            RegisterAdminDto,
            MessageResponse,
            ErrorResponse,
            Class,
            PublicClass,
            CreateClassDto,
            UpdateClassDto,
            Teacher,
            TeacherRead,
            CreateTeacherDto,
            UpdateTeacherDto,
            Student,
            StudentRead,
            CreateStudentDto,
            UpdateStudentDto,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            ClassSchedule,
            CreateScheduleDto,
            UpdateScheduleDto,
            Attendance,
            CreateAttendanceDto,
            UpdateAttendanceDto,
            Exam,
            CreateExamDto,
            UpdateExamDto,
            ExamResult,
            CreateResultDto,
            UpdateResultDto,
            StudyMaterial,
            CreateMaterialDto,
            UpdateMaterialDto,
            Notice,
            CreateNoticeDto,
            UpdateNoticeDto,
            TeacherReview,
            CreateReviewDto,
            AdmissionRequest,
            CreateAdmissionDto,
            ReviewAdmissionDto,
            AdmissionApprovalResponse,
            DashboardStats,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and profile endpoints"),
        (name = "Users", description = "User account management"),
        (name = "Classes", description = "Class management"),
        (name = "Teachers", description = "Teacher management"),
        (name = "Students", description = "Student management"),
        (name = "Subjects", description = "Subject management"),
        (name = "Schedules", description = "Weekly class schedules"),
        (name = "Attendance", description = "Daily attendance tracking"),
        (name = "Exams", description = "Exam management"),
        (name = "Exam results", description = "Exam result recording"),
        (name = "Study materials", description = "Study material references"),
        (name = "Notices", description = "Notice board"),
        (name = "Teacher reviews", description = "Internal teacher evaluations"),
        (name = "Admissions", description = "Public admission pipeline"),
        (name = "Stats", description = "Dashboard statistics"),
        (name = "Public", description = "Unauthenticated landing-page endpoints")
    ),
    info(
        title = "Coachdesk API",
        version = "0.1.0",
        description = "REST backend for coaching center management: classes, teachers, students, attendance, exams, and admissions.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
