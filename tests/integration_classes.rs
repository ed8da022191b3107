mod common;

use axum::http::StatusCode;
use common::{
    create_test_class, create_test_student, create_test_user, get_auth_token, json_request,
    response_json, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_class(pool: PgPool) {
    create_test_user(&pool, "boss", "secret123", "admin").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "boss", "secret123").await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/classes",
            Some(&token),
            Some(json!({
                "name": "Class 9 Morning",
                "grade": 9,
                "section": "A",
                "capacity": 25
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["name"], "Class 9 Morning");
    assert_eq!(body["capacity"], 25);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_class_name_rejected(pool: PgPool) {
    create_test_class(&pool, "Class 9 Morning", 30).await;
    create_test_user(&pool, "boss", "secret123", "admin").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "boss", "secret123").await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/classes",
            Some(&token),
            Some(json!({"name": "Class 9 Morning", "grade": 9})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_public_classes_need_no_auth(pool: PgPool) {
    create_test_class(&pool, "Class 8 Morning", 30).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request("GET", "/api/public/classes", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Class 8 Morning");
    // The public shape carries no class_teacher_id.
    assert!(body[0].get("class_teacher_id").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_list_classes(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    create_test_student(&pool, "stud1", "secret123", class_id).await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "stud1", "secret123").await;
    let response = app
        .oneshot(json_request("GET", "/api/classes", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_blocked_while_students_enrolled(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    create_test_student(&pool, "stud1", "secret123", class_id).await;
    create_test_user(&pool, "boss", "secret123", "admin").await;
    let app = setup_test_app(pool.clone());

    let token = get_auth_token(app.clone(), "boss", "secret123").await;
    let response = app
        .oneshot(json_request(
            "DELETE",
            &format!("/api/classes/{class_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let still_there = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM classes WHERE id = $1")
        .bind(class_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(still_there, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_empty_class(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    create_test_user(&pool, "boss", "secret123", "admin").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "boss", "secret123").await;
    let response = app
        .oneshot(json_request(
            "DELETE",
            &format!("/api/classes/{class_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_capacity_gate_blocks_enrollment(pool: PgPool) {
    let class_id = create_test_class(&pool, "Tiny Class", 1).await;
    create_test_student(&pool, "stud1", "secret123", class_id).await;
    create_test_user(&pool, "boss", "secret123", "admin").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "boss", "secret123").await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/students",
            Some(&token),
            Some(json!({
                "username": "stud2",
                "full_name": "Second Student",
                "password": "secret123",
                "class_id": class_id
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("full"));
}
