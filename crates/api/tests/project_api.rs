//! HTTP-level integration tests for the projects resource: CRUD,
//! role-scoped listing, the detail payload, and the timeline layout.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use manualcraft_core::roles::{ROLE_ADMIN, ROLE_EDITOR, ROLE_VIEWER};
use manualcraft_db::repositories::{DepartmentRepo, ProjectRepo};
use sqlx::PgPool;

async fn create_department(pool: &PgPool, name: &str) -> i64 {
    DepartmentRepo::create(
        pool,
        &manualcraft_db::models::department::CreateDepartment {
            name: name.to_string(),
            description: None,
        },
    )
    .await
    .expect("department creation should succeed")
    .id
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// Creating a project defaults the status to draft and records the creator.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_defaults(pool: PgPool) {
    let (user, token) = common::create_user(&pool, "creator", ROLE_EDITOR, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({ "title": "Assembly guide" });
    let response = post_json_auth(app, "/api/v1/projects", body, &token).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Assembly guide");
    assert_eq!(json["status"], "draft");
    assert_eq!(json["created_by"], user.id);
}

/// A blank title is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_requires_title(pool: PgPool) {
    let (_user, token) = common::create_user(&pool, "creator", ROLE_EDITOR, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({ "title": "   " });
    let response = post_json_auth(app, "/api/v1/projects", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Referencing a nonexistent department is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_unknown_department(pool: PgPool) {
    let (_user, token) = common::create_user(&pool, "creator", ROLE_EDITOR, None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({ "title": "Guide", "department_id": 4242 });
    let response = post_json_auth(app, "/api/v1/projects", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// The detail payload carries media, elements, timeline, and joined names.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_project_detail(pool: PgPool) {
    let dept_id = create_department(&pool, "Maintenance").await;
    let (user, token) = common::create_user(&pool, "owner", ROLE_EDITOR, Some(dept_id)).await;
    let project = common::create_project(&pool, user.id, "Detail", "draft", Some(dept_id)).await;
    let (app, _uploads) = common::build_test_app(pool);

    let response = get_auth(app, &format!("/api/v1/projects/{}", project.id), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], project.id);
    assert_eq!(json["department_name"], "Maintenance");
    assert_eq!(json["creator_name"], "owner");
    assert!(json["media"].as_array().unwrap().is_empty());
    assert!(json["elements"].as_array().unwrap().is_empty());
    assert!(json["timeline"].as_array().unwrap().is_empty());
    assert!(json.get("share").is_none(), "share is only set on the anonymous path");
}

/// Updating applies only the provided fields.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_project_partial(pool: PgPool) {
    let (user, token) = common::create_user(&pool, "owner", ROLE_EDITOR, None).await;
    let project = common::create_project(&pool, user.id, "Before", "draft", None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({ "status": "published" });
    let response = put_json_auth(app, &format!("/api/v1/projects/{}", project.id), body, &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Before");
    assert_eq!(json["status"], "published");
}

/// An unknown status value is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_project_invalid_status(pool: PgPool) {
    let (user, token) = common::create_user(&pool, "owner", ROLE_EDITOR, None).await;
    let project = common::create_project(&pool, user.id, "Guide", "draft", None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let body = serde_json::json!({ "status": "live" });
    let response = put_json_auth(app, &format!("/api/v1/projects/{}", project.id), body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Deleting a project removes it and its dependents.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_project(pool: PgPool) {
    let (user, token) = common::create_user(&pool, "owner", ROLE_EDITOR, None).await;
    let project = common::create_project(&pool, user.id, "Doomed", "draft", None).await;
    let (app, _uploads) = common::build_test_app(pool.clone());

    let response = delete_auth(app, &format!("/api/v1/projects/{}", project.id), &token).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let gone = ProjectRepo::find_by_id(&pool, project.id)
        .await
        .expect("lookup should succeed");
    assert!(gone.is_none());
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

/// A viewer cannot read someone else's draft.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_viewer_denied_foreign_draft(pool: PgPool) {
    let (owner, _) = common::create_user(&pool, "owner", ROLE_EDITOR, None).await;
    let (_viewer, token) = common::create_user(&pool, "viewer", ROLE_VIEWER, None).await;
    let project = common::create_project(&pool, owner.id, "Draft", "draft", None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let response = get_auth(app, &format!("/api/v1/projects/{}", project.id), &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A viewer can read any published project.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_viewer_reads_published(pool: PgPool) {
    let (owner, _) = common::create_user(&pool, "owner", ROLE_EDITOR, None).await;
    let (_viewer, token) = common::create_user(&pool, "viewer", ROLE_VIEWER, None).await;
    let project = common::create_project(&pool, owner.id, "Public", "published", None).await;
    let (app, _uploads) = common::build_test_app(pool);

    let response = get_auth(app, &format!("/api/v1/projects/{}", project.id), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
}

/// An editor in the same department can read but not modify a colleague's
/// project.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_editor_reads_but_cannot_modify_department_project(pool: PgPool) {
    let dept_id = create_department(&pool, "Assembly").await;
    let (owner, _) = common::create_user(&pool, "owner", ROLE_EDITOR, Some(dept_id)).await;
    let (_peer, token) = common::create_user(&pool, "peer", ROLE_EDITOR, Some(dept_id)).await;
    let project = common::create_project(&pool, owner.id, "Shared", "draft", Some(dept_id)).await;
    let (app, _uploads) = common::build_test_app(pool);

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/projects/{}", project.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({ "title": "Hijacked" });
    let response = put_json_auth(app, &format!("/api/v1/projects/{}", project.id), body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Listing is role-scoped: admins see everything, editors their department,
/// viewers published plus their own.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_is_role_scoped(pool: PgPool) {
    let dept_id = create_department(&pool, "Ops").await;
    let (admin, admin_token) = common::create_user(&pool, "admin", ROLE_ADMIN, None).await;
    let (editor, editor_token) = common::create_user(&pool, "editor", ROLE_EDITOR, Some(dept_id)).await;
    let (_viewer, viewer_token) = common::create_user(&pool, "viewer", ROLE_VIEWER, None).await;

    common::create_project(&pool, admin.id, "Admin draft", "draft", None).await;
    common::create_project(&pool, editor.id, "Dept draft", "draft", Some(dept_id)).await;
    common::create_project(&pool, admin.id, "Published", "published", None).await;

    let (app, _uploads) = common::build_test_app(pool);

    let json = body_json(get_auth(app.clone(), "/api/v1/projects", &admin_token).await).await;
    assert_eq!(json.as_array().unwrap().len(), 3);

    let json = body_json(get_auth(app.clone(), "/api/v1/projects", &editor_token).await).await;
    let titles: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Dept draft"]);

    let json = body_json(get_auth(app, "/api/v1/projects", &viewer_token).await).await;
    let titles: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Published"]);
}

// ---------------------------------------------------------------------------
// Timeline layout
// ---------------------------------------------------------------------------

/// Overlapping elements are packed onto separate tracks; disjoint ones
/// share a track.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_timeline_layout_packs_tracks(pool: PgPool) {
    let (user, token) = common::create_user(&pool, "owner", ROLE_EDITOR, None).await;
    let project = common::create_project(&pool, user.id, "Layout", "draft", None).await;
    let (app, _uploads) = common::build_test_app(pool);

    // Three text elements: 0-5 and 3-8 overlap, 6-9 fits after the first.
    for (start, end) in [(0.0, 5.0), (3.0, 8.0), (6.0, 9.0)] {
        let body = serde_json::json!({
            "project_id": project.id,
            "element_type": "text",
            "start_time": start,
            "end_time": end
        });
        let response = post_json_auth(app.clone(), "/api/v1/elements", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(
        app,
        &format!("/api/v1/projects/{}/timeline", project.id),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["media_track"].as_array().unwrap().is_empty());
    let tracks = json["element_tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 2, "two tracks fit three elements with one overlap");
    assert_eq!(tracks[0].as_array().unwrap().len(), 2);
    assert_eq!(tracks[1].as_array().unwrap().len(), 1);
}
