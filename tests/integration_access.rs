mod common;

use axum::http::StatusCode;
use common::{
    create_test_class, create_test_student, create_test_teacher, create_test_user,
    get_auth_token, json_request, setup_test_app,
};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_student_reads_own_profile_only(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (own_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    let (other_id, _) = create_test_student(&pool, "stud2", "secret123", class_id).await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "stud1", "secret123").await;

    let own = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/students/{own_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(own.status(), StatusCode::OK);

    let other = app
        .oneshot(json_request(
            "GET",
            &format!("/api/students/{other_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_reads_any_student(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    create_test_teacher(&pool, "teach1", "secret123").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;
    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/students/{student_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_profile_closed_to_other_teachers(pool: PgPool) {
    // Teacher records are owner-or-admin; a fellow teacher is not elevated.
    let (own_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    let (other_id, _) = create_test_teacher(&pool, "teach2", "secret123").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "teach1", "secret123").await;

    let own = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/teachers/{own_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(own.status(), StatusCode::OK);

    let other = app
        .oneshot(json_request(
            "GET",
            &format!("/api/teachers/{other_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_reads_everything(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (student_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    let (teacher_id, _) = create_test_teacher(&pool, "teach1", "secret123").await;
    create_test_user(&pool, "boss", "secret123", "admin").await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "boss", "secret123").await;

    for uri in [
        format!("/api/students/{student_id}"),
        format!("/api/teachers/{teacher_id}"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("GET", &uri, Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_cannot_create_students(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    create_test_student(&pool, "stud1", "secret123", class_id).await;
    let app = setup_test_app(pool);

    let token = get_auth_token(app.clone(), "stud1", "secret123").await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/students",
            Some(&token),
            Some(serde_json::json!({
                "username": "newkid",
                "full_name": "New Kid",
                "password": "secret123",
                "class_id": class_id
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_password_change_scope(pool: PgPool) {
    let class_id = create_test_class(&pool, "Class A", 30).await;
    let (own_id, _) = create_test_student(&pool, "stud1", "secret123", class_id).await;
    let (other_id, _) = create_test_student(&pool, "stud2", "secret123", class_id).await;
    let app = setup_test_app(pool.clone());

    let token = get_auth_token(app.clone(), "stud1", "secret123").await;

    let own = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/students/{own_id}/password"),
            Some(&token),
            Some(serde_json::json!({"password": "newsecret1"})),
        ))
        .await
        .unwrap();
    assert_eq!(own.status(), StatusCode::OK);

    let other = app.clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/students/{other_id}/password"),
            Some(&token),
            Some(serde_json::json!({"password": "newsecret1"})),
        ))
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::FORBIDDEN);

    // The new password works.
    let login = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(serde_json::json!({"username": "stud1", "password": "newsecret1"})),
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_expired_token_rejected(pool: PgPool) {
    use coachdesk::config::jwt::JwtConfig;
    use coachdesk::modules::users::model::UserRole;
    use coachdesk::utils::jwt::create_access_token;

    create_test_user(&pool, "jdoe", "secret123", "admin").await;
    let app = setup_test_app(pool);

    let expired_config = JwtConfig {
        secret: "test-secret-not-for-production".to_string(),
        access_token_expiry: -300,
    };
    let token = create_access_token("jdoe", UserRole::Admin, &expired_config).unwrap();

    let response = app
        .oneshot(json_request("GET", "/api/auth/me", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
