//! Development fixtures. Seeds a small but fully-linked data set so every
//! endpoint has something to return: classes with teachers and students,
//! subjects with a schedule, one exam with results, and landing content.

use anyhow::Result;
use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::modules::classes::model::CreateClassDto;
use crate::modules::classes::service::ClassService;
use crate::modules::exams::model::CreateExamDto;
use crate::modules::exams::service::ExamService;
use crate::modules::notices::model::CreateNoticeDto;
use crate::modules::notices::service::NoticeService;
use crate::modules::results::model::CreateResultDto;
use crate::modules::results::service::ResultService;
use crate::modules::schedules::model::CreateScheduleDto;
use crate::modules::schedules::service::ScheduleService;
use crate::modules::students::model::CreateStudentDto;
use crate::modules::students::service::StudentService;
use crate::modules::subjects::model::CreateSubjectDto;
use crate::modules::subjects::service::SubjectService;
use crate::modules::teachers::model::CreateTeacherDto;
use crate::modules::teachers::service::TeacherService;
use crate::utils::password::hash_password;

/// Seed password shared by every generated account.
pub const SEED_PASSWORD: &str = "changeme1";

pub async fn seed_database(db: &PgPool) -> Result<()> {
    seed_admin(db).await?;

    let teacher = TeacherService::create_teacher(
        db,
        CreateTeacherDto {
            username: "rkarim".into(),
            email: Some("rkarim@example.com".into()),
            full_name: "Rashed Karim".into(),
            phone: Some("01710000001".into()),
            password: SEED_PASSWORD.into(),
            employee_id: "EMP001".into(),
            qualification: Some("MSc Mathematics".into()),
            experience_years: Some(6),
            salary: Some(32000.0),
        },
    )
    .await
    .map_err(|e| e.error)?;

    let class = ClassService::create_class(
        db,
        CreateClassDto {
            name: "Class 8 Morning".into(),
            grade: 8,
            section: Some("A".into()),
            academic_year: Some("2026".into()),
            capacity: Some(30),
            class_teacher_id: Some(teacher.teacher.id),
        },
    )
    .await
    .map_err(|e| e.error)?;

    let subject = SubjectService::create_subject(
        db,
        CreateSubjectDto {
            class_id: class.id,
            teacher_id: teacher.teacher.id,
            name: "Mathematics".into(),
            code: None,
            credits: Some(4),
        },
    )
    .await
    .map_err(|e| e.error)?;

    ScheduleService::create_schedule(
        db,
        CreateScheduleDto {
            subject_id: subject.id,
            class_id: class.id,
            teacher_id: teacher.teacher.id,
            day_of_week: "monday".into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            room: Some("Room 2".into()),
        },
    )
    .await
    .map_err(|e| e.error)?;

    let mut student_ids = Vec::new();
    for (username, full_name) in [
        ("nafisa01", "Nafisa Rahman"),
        ("tanvir02", "Tanvir Ahmed"),
        ("mithila03", "Mithila Chowdhury"),
    ] {
        let student = StudentService::create_student(
            db,
            CreateStudentDto {
                username: username.into(),
                email: Some(format!("{username}@example.com")),
                full_name: full_name.into(),
                phone: None,
                password: SEED_PASSWORD.into(),
                class_id: class.id,
                roll_number: None,
                parent_name: None,
                parent_phone: None,
                address: None,
                date_of_birth: None,
            },
        )
        .await
        .map_err(|e| e.error)?;
        student_ids.push(student.student.id);
    }

    let exam = ExamService::create_exam(
        db,
        CreateExamDto {
            subject_id: subject.id,
            name: "Midterm".into(),
            exam_date: Utc::now() - Duration::days(7),
            max_marks: 100.0,
            duration_minutes: Some(90),
        },
    )
    .await
    .map_err(|e| e.error)?;

    for (student_id, marks) in student_ids.iter().zip([88.0, 67.0, 45.0]) {
        ResultService::create_result(
            db,
            CreateResultDto {
                exam_id: exam.id,
                student_id: *student_id,
                marks_obtained: marks,
                grade: None,
                remarks: None,
            },
        )
        .await
        .map_err(|e| e.error)?;
    }

    let admin_id =
        sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE username = 'admin'")
            .fetch_one(db)
            .await?;

    NoticeService::create_notice(
        db,
        admin_id,
        CreateNoticeDto {
            title: "Admissions open for 2026".into(),
            content: "Apply through the admission form on the landing page.".into(),
            target_role: None,
            is_urgent: None,
            show_on_landing: Some(true),
            expires_at: None,
        },
    )
    .await
    .map_err(|e| e.error)?;

    println!("Seeded 1 teacher, 1 class, 3 students, 1 exam. Password: {SEED_PASSWORD}");
    Ok(())
}

async fn seed_admin(db: &PgPool) -> Result<()> {
    let password_hash = hash_password(SEED_PASSWORD).map_err(|e| e.error)?;

    sqlx::query(
        "INSERT INTO users (username, email, full_name, role, password_hash)
         VALUES ('admin', 'admin@example.com', 'Seed Admin', 'admin', $1)
         ON CONFLICT (username) DO NOTHING",
    )
    .bind(&password_hash)
    .execute(db)
    .await?;

    Ok(())
}

/// Wipes everything the seeder creates, child tables first.
pub async fn clear_database(db: &PgPool) -> Result<()> {
    for table in [
        "exam_results",
        "attendances",
        "study_materials",
        "class_schedules",
        "exams",
        "teacher_reviews",
        "admission_requests",
        "subjects",
        "students",
        "notices",
        "classes",
        "teachers",
        "admin_creation_codes",
        "users",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(db)
            .await?;
    }

    println!("Cleared all application tables");
    Ok(())
}
