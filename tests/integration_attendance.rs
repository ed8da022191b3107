mod common;

use axum::http::StatusCode;
use common::{
    create_test_class, create_test_student, create_test_teacher, get_auth_token, json_request,
    response_json, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_marks_attendance(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    create_test_teacher(&pool, "teach1", "secret123").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/attendance",
            Some(&token),
            Some(json!({"student_id": student_id, "status": "present"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["student_id"], student_id);
    // The class is resolved from the student record.
    assert_eq!(body["class_id"], class_id);
    assert_eq!(body["status"], "present");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_same_day_duplicate_rejected(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    create_test_teacher(&pool, "teach1", "secret123").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/attendance",
            Some(&token),
            Some(json!({
                "student_id": student_id,
                "date": "2026-03-02T09:00:00Z",
                "status": "present"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    // A different time on the same day still collides.
    let duplicate = app
        .oneshot(json_request(
            "POST",
            "/api/attendance",
            Some(&token),
            Some(json!({
                "student_id": student_id,
                "date": "2026-03-02T14:30:00Z",
                "status": "late"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_next_day_is_a_fresh_record(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    create_test_teacher(&pool, "teach1", "secret123").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    for date in ["2026-03-02T09:00:00Z", "2026-03-03T09:00:00Z"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/attendance",
                Some(&token),
                Some(json!({"student_id": student_id, "date": date, "status": "present"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED, "date {date}");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_status_rejected(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    create_test_teacher(&pool, "teach1", "secret123").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/attendance",
            Some(&token),
            Some(json!({"student_id": student_id, "status": "asleep"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_filters_by_date(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    create_test_teacher(&pool, "teach1", "secret123").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    for date in ["2026-03-02T09:00:00Z", "2026-03-03T09:00:00Z"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/attendance",
                Some(&token),
                Some(json!({"student_id": student_id, "date": date, "status": "present"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/attendance?date=2026-03-02",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_mark_attendance(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "stud1", "secret123").await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/attendance",
            Some(&token),
            Some(json!({"student_id": student_id, "status": "present"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_reads_own_attendance(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    create_test_teacher(&pool, "teach1", "secret123").await;
    let app = setup_test_app(pool);

    let teacher_token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let marked = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/attendance",
            Some(&teacher_token),
            Some(json!({"student_id": student_id, "status": "absent"})),
        ))
        .await
        .unwrap();
    assert_eq!(marked.status(), StatusCode::CREATED);

    let student_token = get_auth_token(app.clone(), "stud1", "secret123").await;
    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/students/{student_id}/attendance"),
            Some(&student_token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["status"], "absent");
}
