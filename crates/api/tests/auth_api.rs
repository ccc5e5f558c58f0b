//! HTTP-level integration tests for login and self-service registration.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json};
use manualcraft_core::roles::{ROLE_ADMIN, ROLE_VIEWER};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200 with a token and the user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, _) = common::create_user(&pool, "loginuser", ROLE_ADMIN, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "loginuser", "password": common::TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string(), "response must contain token");
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "loginuser");
    assert_eq!(json["user"]["role"], "admin");
    assert!(
        json["user"].get("password_hash").is_none(),
        "password hash must never be serialized"
    );
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    common::create_user(&pool, "wrongpw", ROLE_VIEWER, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid username or password");
}

/// Login with a nonexistent username returns 401 with the same message as a
/// wrong password, so usernames cannot be enumerated.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid username or password");
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration creates a viewer account and returns a usable token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_creates_viewer(pool: PgPool) {
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "newbie",
        "email": "newbie@test.com",
        "password": "a_decent_password",
        "full_name": "New B."
    });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "viewer");
    assert_eq!(json["user"]["full_name"], "New B.");

    // The returned token authenticates follow-up requests.
    let token = json["token"].as_str().unwrap();
    let response = get_auth(app, "/api/v1/projects", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Registering a taken username returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_username(pool: PgPool) {
    common::create_user(&pool, "taken", ROLE_VIEWER, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "taken",
        "email": "other@test.com",
        "password": "a_decent_password"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A password below the minimum length is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_weak_password(pool: PgPool) {
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "weak",
        "email": "weak@test.com",
        "password": "short"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Token enforcement
// ---------------------------------------------------------------------------

/// Requests without a token are rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_token_rejected(pool: PgPool) {
    let (app, _uploads) = common::build_test_app(pool);

    let response = common::get(app, "/api/v1/projects").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Garbage tokens are rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_garbage_token_rejected(pool: PgPool) {
    let (app, _uploads) = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/projects", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A token for a deleted user stops working immediately, since every
/// request loads the live user row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_for_deleted_user_rejected(pool: PgPool) {
    let (user, token) = common::create_user(&pool, "gone", ROLE_VIEWER, None).await;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .expect("delete should succeed");
    let (app, _uploads) = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/projects", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
