mod common;

use axum::http::StatusCode;
use common::{
    create_test_class, create_test_student, create_test_subject, create_test_teacher,
    get_auth_token, json_request, response_json, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn create_exam(app: &axum::Router, token: &str, subject_id: i32, max_marks: f64) -> i32 {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/exams",
            Some(token),
            Some(json!({
                "subject_id": subject_id,
                "name": "Midterm",
                "exam_date": "2026-04-10T10:00:00Z",
                "max_marks": max_marks
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response_json(response).await["id"].as_i64().unwrap() as i32
}

#[sqlx::test(migrations = "./migrations")]
async fn test_result_grade_derived_from_marks(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let subject_id = create_test_subject(&pool, class_id, teacher_id, "MAT-801").await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let exam_id = create_exam(&app, &token, subject_id, 100.0).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/exam-results",
            Some(&token),
            Some(json!({
                "exam_id": exam_id,
                "student_id": student_id,
                "marks_obtained": 88.0
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["grade"], "5.00 (A+)");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_explicit_grade_wins_over_derivation(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let subject_id = create_test_subject(&pool, class_id, teacher_id, "MAT-801").await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let exam_id = create_exam(&app, &token, subject_id, 100.0).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/exam-results",
            Some(&token),
            Some(json!({
                "exam_id": exam_id,
                "student_id": student_id,
                "marks_obtained": 88.0,
                "grade": "A*"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["grade"], "A*");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_marks_above_maximum_rejected(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let subject_id = create_test_subject(&pool, class_id, teacher_id, "MAT-801").await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let exam_id = create_exam(&app, &token, subject_id, 50.0).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/exam-results",
            Some(&token),
            Some(json!({
                "exam_id": exam_id,
                "student_id": student_id,
                "marks_obtained": 51.0
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_result_rejected(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let subject_id = create_test_subject(&pool, class_id, teacher_id, "MAT-801").await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let exam_id = create_exam(&app, &token, subject_id, 100.0).await;

    let payload = json!({
        "exam_id": exam_id,
        "student_id": student_id,
        "marks_obtained": 70.0
    });

    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/exam-results",
            Some(&token),
            Some(payload.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let duplicate = app
        .oneshot(json_request(
            "POST",
            "/api/exam-results",
            Some(&token),
            Some(payload),
        ))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_marks_rederives_grade(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let subject_id = create_test_subject(&pool, class_id, teacher_id, "MAT-801").await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let exam_id = create_exam(&app, &token, subject_id, 100.0).await;

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/exam-results",
            Some(&token),
            Some(json!({
                "exam_id": exam_id,
                "student_id": student_id,
                "marks_obtained": 45.0
            })),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let result_id = response_json(created).await["id"].as_i64().unwrap();

    let updated = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/exam-results/{result_id}"),
            Some(&token),
            Some(json!({"marks_obtained": 62.0})),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let body = response_json(updated).await;
    assert_eq!(body["marks_obtained"], 62.0);
    assert_eq!(body["grade"], "3.50 (A-)");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_exam_delete_blocked_by_results(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let subject_id = create_test_subject(&pool, class_id, teacher_id, "MAT-801").await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    common::create_test_user(&pool, "boss", "secret123", "admin").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let exam_id = create_exam(&app, &token, subject_id, 100.0).await;

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/exam-results",
            Some(&token),
            Some(json!({
                "exam_id": exam_id,
                "student_id": student_id,
                "marks_obtained": 70.0
            })),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let admin_token = get_auth_token(app.clone(), "boss", "secret123").await;
    let response = app
        .oneshot(json_request(
            "DELETE",
            &format!("/api/exams/{exam_id}"),
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
