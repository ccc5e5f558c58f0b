#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use manualcraft_api::auth::jwt::{generate_token, JwtConfig};
use manualcraft_api::auth::password::hash_password;
use manualcraft_api::config::ServerConfig;
use manualcraft_api::router::build_app_router;
use manualcraft_api::state::AppState;
use manualcraft_db::models::project::{CreateProject, Project};
use manualcraft_db::models::user::User;
use manualcraft_db::repositories::user_repo::NewUser;
use manualcraft_db::repositories::{ProjectRepo, UserRepo};

/// Password used for every user created through [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults and the given upload dir.
pub fn test_config(upload_dir: String) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_base_url: "http://localhost:3000".to_string(),
        upload_dir,
        max_upload_bytes: manualcraft_core::media::MAX_FILE_SIZE as usize,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery)
/// that production uses. The returned [`TempDir`] is the upload directory;
/// keep it alive for the duration of the test.
pub fn build_test_app(pool: PgPool) -> (Router, TempDir) {
    let upload_dir = tempfile::tempdir().expect("tempdir creation should succeed");
    let config = test_config(upload_dir.path().to_string_lossy().into_owned());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };

    (build_app_router(state, &config), upload_dir)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user directly in the database and return the row plus a valid
/// access token for it. The password is always [`TEST_PASSWORD`].
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    role: &str,
    department_id: Option<i64>,
) -> (User, String) {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &NewUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash,
            full_name: None,
            department_id,
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed");

    let token = generate_token(
        user.id,
        &JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            token_expiry_mins: 60,
        },
    )
    .expect("token generation should succeed");

    (user, token)
}

/// Create a project directly in the database.
pub async fn create_project(
    pool: &PgPool,
    created_by: i64,
    title: &str,
    status: &str,
    department_id: Option<i64>,
) -> Project {
    ProjectRepo::create(
        pool,
        created_by,
        &CreateProject {
            title: title.to_string(),
            description: None,
            status: Some(status.to_string()),
            department_id,
            task_type_id: None,
        },
    )
    .await
    .expect("project creation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request construction should succeed");

    app.oneshot(request).await.expect("request should succeed")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// POST a two-part multipart form (`project_id` text field + `file` part)
/// the way the media upload endpoint expects.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    project_id: i64,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> Response<Body> {
    let boundary = "test-boundary-7da24f2e50cf";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"project_id\"\r\n\r\n{project_id}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("request construction should succeed");

    app.oneshot(request).await.expect("request should succeed")
}

/// Read a response body to completion and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .expect("body collection should succeed")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Read a response body to completion as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    http_body_util::BodyExt::collect(response.into_body())
        .await
        .expect("body collection should succeed")
        .to_bytes()
        .to_vec()
}
