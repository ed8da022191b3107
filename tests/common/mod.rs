use axum::body::Body;
use axum::http::{Request, StatusCode};
use coachdesk::config::cors::CorsConfig;
use coachdesk::config::jwt::JwtConfig;
use coachdesk::config::storage::StorageConfig;
use coachdesk::router::init_router;
use coachdesk::state::AppState;
use coachdesk::utils::password::hash_password;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        jwt_config: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry: 3600,
        },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        storage_config: StorageConfig {
            max_upload_bytes: 1024 * 1024,
        },
    }
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    init_router(test_state(pool))
}

/// Inserts a user row directly, bypassing the API.
pub async fn create_test_user(pool: &PgPool, username: &str, password: &str, role: &str) -> i32 {
    let hashed = hash_password(password).unwrap();

    sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (username, email, full_name, role, password_hash)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(username)
    .bind(format!("{username}@test.example"))
    .bind(format!("Test {username}"))
    .bind(role)
    .bind(&hashed)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_class(pool: &PgPool, name: &str, capacity: i32) -> i32 {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO classes (name, grade, capacity) VALUES ($1, 8, $2) RETURNING id",
    )
    .bind(name)
    .bind(capacity)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// User plus teacher row; returns (teacher_id, user_id).
#[allow(dead_code)]
pub async fn create_test_teacher(pool: &PgPool, username: &str, password: &str) -> (i32, i32) {
    let user_id = create_test_user(pool, username, password, "teacher").await;
    let teacher_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO teachers (user_id, employee_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(user_id)
    .bind(format!("EMP-{username}"))
    .fetch_one(pool)
    .await
    .unwrap();
    (teacher_id, user_id)
}

/// User plus student row; returns (student_id, user_id).
#[allow(dead_code)]
pub async fn create_test_student(
    pool: &PgPool,
    username: &str,
    password: &str,
    class_id: i32,
) -> (i32, i32) {
    let user_id = create_test_user(pool, username, password, "student").await;
    let student_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO students (user_id, class_id, roll_number) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id)
    .bind(class_id)
    .bind(format!("R-{username}"))
    .fetch_one(pool)
    .await
    .unwrap();
    (student_id, user_id)
}

#[allow(dead_code)]
pub async fn create_test_subject(pool: &PgPool, class_id: i32, teacher_id: i32, code: &str) -> i32 {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO subjects (class_id, teacher_id, name, code)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(class_id)
    .bind(teacher_id)
    .bind(format!("Subject {code}"))
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn get_auth_token(app: axum::Router, username: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

/// Builds an authenticated JSON request.
#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => Body::from(serde_json::to_string(&value).unwrap()),
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

#[allow(dead_code)]
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
