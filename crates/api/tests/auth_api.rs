//! HTTP-level tests for login, bootstrap, token checks and password change.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, build_test_app_with, post_json, post_json_auth,
    post_json_with_header, put_json_auth, test_config, test_jwt_config,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use sqlx::SqlitePool;

use festival_api::auth::jwt::{validate_token, Claims};
use festival_api::auth::password::hash_password;
use festival_api::auth::provision::provision_admin;
use festival_api::config::AdminCredentials;
use festival_db::models::user::CreateUser;
use festival_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &SqlitePool, username: &str, password: &str) {
    let input = CreateUser {
        username: username.to_string(),
        password_hash: hash_password(password).expect("hashing should succeed"),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
}

fn page_body() -> serde_json::Value {
    json!({ "title": "Program" })
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// First login against an empty user table creates exactly one account.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_login_bootstraps_admin(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/login", json!({ "username": "admin", "password": "festival-2026" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let token = json["data"]["token"].as_str().unwrap();
    assert_eq!(json["data"]["user"]["username"], "admin");
    assert_eq!(json["data"]["expiresIn"], 7 * 24 * 60 * 60);

    let claims = validate_token(token, &test_jwt_config()).unwrap();
    assert_eq!(claims.sub, "admin");
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

/// Once an account exists, a different username cannot bootstrap another.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_later_logins_must_match(pool: SqlitePool) {
    create_user(&pool, "admin", "festival-2026").await;

    let wrong_user = post_json(
        build_test_app(pool.clone()),
        "/api/login",
        json!({ "username": "intruder", "password": "whatever" }),
    )
    .await;
    assert_eq!(wrong_user.status(), StatusCode::UNAUTHORIZED);

    let wrong_password = post_json(
        build_test_app(pool.clone()),
        "/api/login",
        json!({ "username": "admin", "password": "nope" }),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    // Unknown user and bad password are indistinguishable.
    assert_eq!(body_json(wrong_user).await, body_json(wrong_password).await);

    let ok = post_json(
        build_test_app(pool.clone()),
        "/api/login",
        json!({ "username": "admin", "password": "festival-2026" }),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap_can_be_disabled(pool: SqlitePool) {
    let config = festival_api::config::ServerConfig {
        allow_bootstrap_login: false,
        ..test_config()
    };
    let app = build_test_app_with(pool.clone(), config);

    let response = post_json(app, "/api/login", json!({ "username": "admin", "password": "festival-2026" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_credentials_are_rejected(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/login", json!({ "username": "", "password": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_provisioned_admin_can_log_in(pool: SqlitePool) {
    let admin = AdminCredentials {
        username: "boss".into(),
        password: "configured-secret".into(),
    };
    provision_admin(&pool, &admin).await.unwrap();
    // Provisioning twice resets rather than duplicates.
    provision_admin(&pool, &admin).await.unwrap();

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/login",
        json!({ "username": "boss", "password": "configured-secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Token enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_token_is_401(pool: SqlitePool) {
    let response = post_json(build_test_app(pool), "/api/pages", page_body()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_bearer_scheme_is_401(pool: SqlitePool) {
    let response =
        post_json_with_header(build_test_app(pool), "/api/pages", page_body(), "Basic YWRtaW46eA==").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tampered_token_is_403(pool: SqlitePool) {
    let mut token = admin_token();
    token.push('x');
    let response = post_json_auth(build_test_app(pool), "/api/pages", page_body(), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_token_is_403(pool: SqlitePool) {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "admin".into(),
        iat: now - 8 * 24 * 60 * 60,
        exp: now - 24 * 60 * 60,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(common::TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let response = post_json_auth(build_test_app(pool), "/api/pages", page_body(), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_valid_token_is_accepted(pool: SqlitePool) {
    let response =
        post_json_auth(build_test_app(pool), "/api/pages", page_body(), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Password change
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_password(pool: SqlitePool) {
    create_user(&pool, "admin", "festival-2026").await;
    let token = admin_token();

    let wrong_current = put_json_auth(
        build_test_app(pool.clone()),
        "/api/users/me/password",
        json!({ "currentPassword": "nope", "newPassword": "brand-new-pass" }),
        &token,
    )
    .await;
    assert_eq!(wrong_current.status(), StatusCode::BAD_REQUEST);

    let too_short = put_json_auth(
        build_test_app(pool.clone()),
        "/api/users/me/password",
        json!({ "currentPassword": "festival-2026", "newPassword": "short" }),
        &token,
    )
    .await;
    assert_eq!(too_short.status(), StatusCode::BAD_REQUEST);

    let changed = put_json_auth(
        build_test_app(pool.clone()),
        "/api/users/me/password",
        json!({ "currentPassword": "festival-2026", "newPassword": "brand-new-pass" }),
        &token,
    )
    .await;
    assert_eq!(changed.status(), StatusCode::NO_CONTENT);

    let old = post_json(
        build_test_app(pool.clone()),
        "/api/login",
        json!({ "username": "admin", "password": "festival-2026" }),
    )
    .await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    let new = post_json(
        build_test_app(pool),
        "/api/login",
        json!({ "username": "admin", "password": "brand-new-pass" }),
    )
    .await;
    assert_eq!(new.status(), StatusCode::OK);
}
