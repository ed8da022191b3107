mod common;

use axum::http::StatusCode;
use common::{
    create_test_class, create_test_subject, create_test_teacher, get_auth_token, json_request,
    response_json, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn slot(subject_id: i32, class_id: i32, teacher_id: i32, day: &str, start: &str, end: &str) -> serde_json::Value {
    json!({
        "subject_id": subject_id,
        "class_id": class_id,
        "teacher_id": teacher_id,
        "day_of_week": day,
        "start_time": start,
        "end_time": end
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_schedule(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let subject_id = create_test_subject(&pool, class_id, teacher_id, "MAT-801").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/schedules",
            Some(&token),
            Some(slot(subject_id, class_id, teacher_id, "Monday", "09:00", "10:00")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    // Weekday is stored lowercase.
    assert_eq!(body["day_of_week"], "monday");
    assert_eq!(body["start_time"], "09:00");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_overlapping_slot_rejected(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let other_class_id = create_test_class(&pool, "Class B", 30).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let subject_id = create_test_subject(&pool, class_id, teacher_id, "MAT-801").await;
    let other_subject_id = create_test_subject(&pool, other_class_id, teacher_id, "MAT-802").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/schedules",
            Some(&token),
            Some(slot(subject_id, class_id, teacher_id, "monday", "09:00", "10:00")),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    // Same teacher, same day, overlapping window, even in another class.
    let clash = app
        .oneshot(json_request(
            "POST",
            "/api/schedules",
            Some(&token),
            Some(slot(other_subject_id, other_class_id, teacher_id, "monday", "09:30", "10:30")),
        ))
        .await
        .unwrap();
    assert_eq!(clash.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_back_to_back_slots_allowed(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let subject_id = create_test_subject(&pool, class_id, teacher_id, "MAT-801").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    for (start, end) in [("09:00", "10:00"), ("10:00", "11:00")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/schedules",
                Some(&token),
                Some(slot(subject_id, class_id, teacher_id, "monday", start, end)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED, "{start}-{end}");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_same_window_other_day_allowed(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let subject_id = create_test_subject(&pool, class_id, teacher_id, "MAT-801").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    for day in ["monday", "tuesday"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/schedules",
                Some(&token),
                Some(slot(subject_id, class_id, teacher_id, day, "09:00", "10:00")),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED, "{day}");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_backwards_window_rejected(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let subject_id = create_test_subject(&pool, class_id, teacher_id, "MAT-801").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/schedules",
            Some(&token),
            Some(slot(subject_id, class_id, teacher_id, "monday", "11:00", "10:00")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_weekday_rejected(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let subject_id = create_test_subject(&pool, class_id, teacher_id, "MAT-801").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/schedules",
            Some(&token),
            Some(slot(subject_id, class_id, teacher_id, "someday", "09:00", "10:00")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_does_not_clash_with_self(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let subject_id = create_test_subject(&pool, class_id, teacher_id, "MAT-801").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/schedules",
            Some(&token),
            Some(slot(subject_id, class_id, teacher_id, "monday", "09:00", "10:00")),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = response_json(created).await["id"].as_i64().unwrap();

    // Shifting within the slot's own window must not trip the overlap check.
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/schedules/{id}"),
            Some(&token),
            Some(json!({"start_time": "09:15", "end_time": "10:15"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["start_time"], "09:15");
}
