//! HTTP-level integration tests for admin user management.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use manualcraft_core::roles::{ROLE_ADMIN, ROLE_EDITOR, ROLE_VIEWER};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Admin gating
// ---------------------------------------------------------------------------

/// Non-admins get 403 on every /users route.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_users_routes_admin_only(pool: PgPool) {
    let (_editor, editor_token) = common::create_user(&pool, "editor", ROLE_EDITOR, None).await;
    let (viewer, viewer_token) = common::create_user(&pool, "viewer", ROLE_VIEWER, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/v1/users", &editor_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/users/{}", viewer.id),
        &viewer_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = serde_json::json!({ "username": "x", "email": "x@test.com" });
    let response = post_json_auth(app, "/api/v1/users", body, &editor_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Creating a user without a password returns a generated one exactly once.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_user_generates_password(pool: PgPool) {
    let (_admin, token) = common::create_user(&pool, "admin", ROLE_ADMIN, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "fresh",
        "email": "fresh@test.com",
        "role": "editor"
    });
    let response = post_json_auth(app.clone(), "/api/v1/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["role"], "editor");
    let generated = json["generated_password"].as_str().unwrap();
    assert_eq!(generated.len(), 12);

    // The generated password actually works for login.
    let body = serde_json::json!({ "username": "fresh", "password": generated });
    let response = common::post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// A supplied password is used and never echoed back.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_user_with_password(pool: PgPool) {
    let (_admin, token) = common::create_user(&pool, "admin", ROLE_ADMIN, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "chosen",
        "email": "chosen@test.com",
        "password": "their_own_password"
    });
    let response = post_json_auth(app, "/api/v1/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["role"], "viewer", "role defaults to viewer");
    assert!(json.get("generated_password").is_none());
    assert!(json.get("password_hash").is_none());
}

/// An unknown role is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_user_unknown_role(pool: PgPool) {
    let (_admin, token) = common::create_user(&pool, "admin", ROLE_ADMIN, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "who",
        "email": "who@test.com",
        "role": "superuser"
    });
    let response = post_json_auth(app, "/api/v1/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Role changes apply to the target's next request, since tokens carry no
/// role claim.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_role_change_applies_immediately(pool: PgPool) {
    let (_admin, admin_token) = common::create_user(&pool, "admin", ROLE_ADMIN, None).await;
    let (target, target_token) = common::create_user(&pool, "target", ROLE_VIEWER, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    // Viewer cannot list users.
    let response = get_auth(app.clone(), "/api/v1/users", &target_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = serde_json::json!({ "role": "admin" });
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/users/{}", target.id),
        body,
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Same token, new role.
    let response = get_auth(app, "/api/v1/users", &target_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Demoting the only admin is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cannot_demote_last_admin(pool: PgPool) {
    let (admin, token) = common::create_user(&pool, "admin", ROLE_ADMIN, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({ "role": "viewer" });
    let response = put_json_auth(app, &format!("/api/v1/users/{}", admin.id), body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Cannot demote the last remaining admin");
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// Deleting the only admin is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cannot_delete_last_admin(pool: PgPool) {
    let (admin, token) = common::create_user(&pool, "admin", ROLE_ADMIN, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let response = delete_auth(app, &format!("/api/v1/users/{}", admin.id), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Cannot delete the last remaining admin");
}

/// With a second admin present, deletion goes through.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_admin_with_backup(pool: PgPool) {
    let (first, token) = common::create_user(&pool, "first", ROLE_ADMIN, None).await;
    common::create_user(&pool, "second", ROLE_ADMIN, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let response = delete_auth(app, &format!("/api/v1/users/{}", first.id), &token).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// A user who still owns projects cannot be deleted.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cannot_delete_project_owner(pool: PgPool) {
    let (_admin, token) = common::create_user(&pool, "admin", ROLE_ADMIN, None).await;
    let (owner, _) = common::create_user(&pool, "owner", ROLE_EDITOR, None).await;
    common::create_project(&pool, owner.id, "Theirs", "draft", None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let response = delete_auth(app, &format!("/api/v1/users/{}", owner.id), &token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A user who authored content in someone else's project cannot be
/// deleted; the error names the blocking rows instead of surfacing a
/// bare constraint violation.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cannot_delete_content_author(pool: PgPool) {
    let (admin, admin_token) = common::create_user(&pool, "admin", ROLE_ADMIN, None).await;
    let (author, author_token) = common::create_user(&pool, "author", ROLE_EDITOR, None).await;
    let project = common::create_project(&pool, admin.id, "Admin guide", "draft", None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({ "project_id": project.id, "element_type": "text" });
    let response = post_json_auth(app.clone(), "/api/v1/elements", body, &author_token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete_auth(app, &format!("/api/v1/users/{}", author.id), &admin_token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("element"));
}

/// Deleting a nonexistent user returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_missing_user(pool: PgPool) {
    let (_admin, token) = common::create_user(&pool, "admin", ROLE_ADMIN, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let response = delete_auth(app, "/api/v1/users/4242", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
