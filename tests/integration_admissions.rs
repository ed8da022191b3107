mod common;

use axum::http::StatusCode;
use common::{
    create_test_class, create_test_student, create_test_user, get_auth_token, json_request,
    response_json, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn submit_request(app: &axum::Router, class_id: i32, name: &str) -> i32 {
    // No email on purpose; applicant email is optional and unique once a
    // user account is minted from it.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admissions",
            None,
            Some(json!({
                "applicant_name": name,
                "class_id": class_id
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response_json(response).await["id"].as_i64().unwrap() as i32
}

#[sqlx::test(migrations = "./migrations")]
async fn test_public_submission_needs_no_auth(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admissions",
            None,
            Some(json!({"applicant_name": "Rahim Uddin", "class_id": class_id})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["status"], "pending");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submission_blocked_when_class_full(pool: PgPool) {
    let class_id = create_test_class(&pool, "Tiny Class", 1).await;
    create_test_student(&pool, "stud1", "secret123", class_id).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admissions",
            None,
            Some(json!({"applicant_name": "Rahim Uddin", "class_id": class_id})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_listing_requires_admin(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    create_test_student(&pool, "stud1", "secret123", class_id).await;
    let app = setup_test_app(pool);

    let unauthenticated = app
        .clone()
        .oneshot(json_request("GET", "/api/admissions", None, None))
        .await
        .unwrap();
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

    let token = get_auth_token(app.clone(), "stud1", "secret123").await;
    let as_student = app
        .oneshot(json_request("GET", "/api/admissions", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(as_student.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_approval_mints_working_account(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    create_test_user(&pool, "boss", "secret123", "admin").await;
    let app = setup_test_app(pool);

    let request_id = submit_request(&app, class_id, "Rahim Uddin").await;

    let token = get_auth_token(app.clone(), "boss", "secret123").await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/admissions/{request_id}/approve"),
            Some(&token),
            Some(json!({"review_notes": "Documents verified"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["request"]["status"], "approved");
    let username = body["username"].as_str().unwrap().to_string();
    let password = body["password"].as_str().unwrap().to_string();
    assert_eq!(body["student"]["class_id"], class_id);

    // The minted credentials log in as a student.
    let login = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": username, "password": password})),
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
    let login_body = response_json(login).await;
    assert_eq!(login_body["user"]["role"], "student");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_request_approved_only_once(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    create_test_user(&pool, "boss", "secret123", "admin").await;
    let app = setup_test_app(pool);

    let request_id = submit_request(&app, class_id, "Rahim Uddin").await;

    let token = get_auth_token(app.clone(), "boss", "secret123").await;
    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/admissions/{request_id}/approve"),
            Some(&token),
            Some(json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(json_request(
            "POST",
            &format!("/api/admissions/{request_id}/approve"),
            Some(&token),
            Some(json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_rejected_request_cannot_be_approved(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    create_test_user(&pool, "boss", "secret123", "admin").await;
    let app = setup_test_app(pool.clone());

    let request_id = submit_request(&app, class_id, "Rahim Uddin").await;

    let token = get_auth_token(app.clone(), "boss", "secret123").await;
    let rejected = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/admissions/{request_id}/reject"),
            Some(&token),
            Some(json!({"review_notes": "Incomplete documents"})),
        ))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::OK);
    let body = response_json(rejected).await;
    assert_eq!(body["status"], "rejected");

    let approve = app
        .oneshot(json_request(
            "POST",
            &format!("/api/admissions/{request_id}/approve"),
            Some(&token),
            Some(json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(approve.status(), StatusCode::BAD_REQUEST);

    let students = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(students, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_approval_generates_distinct_usernames(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    create_test_user(&pool, "boss", "secret123", "admin").await;
    let app = setup_test_app(pool.clone());

    let first_id = submit_request(&app, class_id, "Rahim Uddin").await;
    let second_id = submit_request(&app, class_id, "Rahim Uddin").await;

    let token = get_auth_token(app.clone(), "boss", "secret123").await;
    let mut usernames = Vec::new();
    for id in [first_id, second_id] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/admissions/{id}/approve"),
                Some(&token),
                Some(json!({})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        usernames.push(body["username"].as_str().unwrap().to_string());
    }

    assert_ne!(usernames[0], usernames[1]);
}
