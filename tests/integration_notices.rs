mod common;

use axum::http::StatusCode;
use common::{
    create_test_class, create_test_student, create_test_teacher, get_auth_token, json_request,
    response_json, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn post_notice(app: &axum::Router, token: &str, body: serde_json::Value) {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/notices", Some(token), Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_landing_notices_are_public(pool: PgPool) {
    create_test_teacher(&pool, "teach1", "secret123").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    post_notice(
        &app,
        &token,
        json!({
            "title": "Admissions open",
            "content": "Apply before June.",
            "show_on_landing": true
        }),
    )
    .await;
    post_notice(
        &app,
        &token,
        json!({"title": "Staff meeting", "content": "Friday 4pm."}),
    )
    .await;

    let response = app
        .oneshot(json_request("GET", "/api/public/notices", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    // Only the landing-flagged notice is exposed.
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Admissions open");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_urgent_landing_notices_come_first(pool: PgPool) {
    create_test_teacher(&pool, "teach1", "secret123").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    post_notice(
        &app,
        &token,
        json!({"title": "Routine", "content": "x", "show_on_landing": true}),
    )
    .await;
    post_notice(
        &app,
        &token,
        json!({
            "title": "Closed tomorrow",
            "content": "x",
            "show_on_landing": true,
            "is_urgent": true
        }),
    )
    .await;

    let response = app
        .oneshot(json_request("GET", "/api/public/notices", None, None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body[0]["title"], "Closed tomorrow");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_notice_hidden_from_landing(pool: PgPool) {
    create_test_teacher(&pool, "teach1", "secret123").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    post_notice(
        &app,
        &token,
        json!({
            "title": "Old news",
            "content": "x",
            "show_on_landing": true,
            "expires_at": "2020-01-01T00:00:00Z"
        }),
    )
    .await;

    let response = app
        .oneshot(json_request("GET", "/api/public/notices", None, None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_feed_respects_target_role(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    create_test_teacher(&pool, "teach1", "secret123").await;
    let app = setup_test_app(pool);

    let teacher_token = get_auth_token(app.clone(), "teach1", "secret123").await;
    post_notice(
        &app,
        &teacher_token,
        json!({"title": "For everyone", "content": "x"}),
    )
    .await;
    post_notice(
        &app,
        &teacher_token,
        json!({"title": "Exam hall rules", "content": "x", "target_role": "student"}),
    )
    .await;
    post_notice(
        &app,
        &teacher_token,
        json!({"title": "Payroll update", "content": "x", "target_role": "teacher"}),
    )
    .await;

    let student_token = get_auth_token(app.clone(), "stud1", "secret123").await;
    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/students/{student_id}/notices"),
            Some(&student_token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"For everyone"));
    assert!(titles.contains(&"Exam hall rules"));
    assert!(!titles.contains(&"Payroll update"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_bogus_target_role_rejected(pool: PgPool) {
    create_test_teacher(&pool, "teach1", "secret123").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/notices",
            Some(&token),
            Some(json!({"title": "x", "content": "x", "target_role": "janitor"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
