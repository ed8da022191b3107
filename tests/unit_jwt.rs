use coachdesk::config::jwt::JwtConfig;
use coachdesk::modules::users::model::UserRole;
use coachdesk::utils::jwt::{create_access_token, verify_token};

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_and_verify_roundtrip() {
    let config = test_jwt_config();

    let token = create_access_token("jdoe", UserRole::Teacher, &config).unwrap();
    let claims = verify_token(&token, &config).unwrap();

    assert_eq!(claims.sub, "jdoe");
    assert_eq!(claims.role, "teacher");
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_all_roles_encode() {
    let config = test_jwt_config();

    for role in [UserRole::Admin, UserRole::Teacher, UserRole::Student] {
        let token = create_access_token("someone", role, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.role, role.as_str());
    }
}

#[test]
fn test_wrong_secret_rejected() {
    let config = test_jwt_config();
    let token = create_access_token("jdoe", UserRole::Student, &config).unwrap();

    let other = JwtConfig {
        secret: "a_different_secret".to_string(),
        access_token_expiry: 3600,
    };

    assert!(verify_token(&token, &other).is_err());
}

#[test]
fn test_expired_token_rejected() {
    let config = JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        // negative expiry puts exp in the past
        access_token_expiry: -120,
    };

    let token = create_access_token("jdoe", UserRole::Student, &config).unwrap();
    assert!(verify_token(&token, &config).is_err());
}

#[test]
fn test_garbage_token_rejected() {
    let config = test_jwt_config();
    assert!(verify_token("not.a.token", &config).is_err());
}
