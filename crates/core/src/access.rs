//! Role-based access-control decision functions.
//!
//! Every function here is a pure predicate over entity snapshots the caller
//! has already fetched. Decisions depend on live ownership and department
//! fields, so callers must load the target row (and, for media/elements, the
//! containing project) before asking.
//!
//! The matrix is most-permissive-wins: a request is denied only when no rule
//! grants it. An editor outside a project's department gets no edit rights on
//! that project unless they are also its creator.

use crate::roles::{ROLE_ADMIN, ROLE_EDITOR};
use crate::status::STATUS_PUBLISHED;
use crate::types::DbId;

/// The authenticated identity making a request.
///
/// Anonymous share-key access never constructs a `Principal`; the share path
/// is gated separately by key validation and is read-only.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: DbId,
    /// Role name: `"admin"`, `"editor"`, or `"viewer"`.
    pub role: String,
    pub department_id: Option<DbId>,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Editor-or-above. Mirrors the role lattice: admin > editor > viewer.
    pub fn can_edit(&self) -> bool {
        self.role == ROLE_ADMIN || self.role == ROLE_EDITOR
    }
}

/// Ownership/department snapshot of a project, the fields every project
/// decision depends on.
#[derive(Debug, Clone, Copy)]
pub struct ProjectRef<'a> {
    pub created_by: DbId,
    pub department_id: Option<DbId>,
    pub status: &'a str,
}

/// Whether the principal may read the project.
///
/// Admin: always. Editor: own department or own-created. Viewer: published
/// or own-created.
pub fn can_read_project(p: &Principal, project: ProjectRef<'_>) -> bool {
    if p.is_admin() || project.created_by == p.user_id {
        return true;
    }
    if p.role == ROLE_EDITOR {
        return match (p.department_id, project.department_id) {
            (Some(mine), Some(theirs)) => mine == theirs,
            _ => false,
        };
    }
    project.status == STATUS_PUBLISHED
}

/// Whether the principal may update or delete the project: owner or admin.
pub fn can_modify_project(p: &Principal, project: ProjectRef<'_>) -> bool {
    p.is_admin() || project.created_by == p.user_id
}

/// Whether the principal may add media or elements to the project:
/// project owner, or editor-or-above.
pub fn can_add_content(p: &Principal, project_created_by: DbId) -> bool {
    project_created_by == p.user_id || p.can_edit()
}

/// Whether the principal may update a media/element row: project owner,
/// entity creator, or editor-or-above.
pub fn can_update_content(p: &Principal, project_created_by: DbId, content_created_by: DbId) -> bool {
    project_created_by == p.user_id || content_created_by == p.user_id || p.can_edit()
}

/// Whether the principal may delete a media/element row: project owner,
/// entity creator, or admin. Stricter than update -- the editor role alone
/// does not grant deletion.
pub fn can_delete_content(p: &Principal, project_created_by: DbId, content_created_by: DbId) -> bool {
    project_created_by == p.user_id || content_created_by == p.user_id || p.is_admin()
}

/// Whether the principal may generate or revoke the project's share link:
/// project owner or admin.
pub fn can_manage_share(p: &Principal, project_created_by: DbId) -> bool {
    p.is_admin() || project_created_by == p.user_id
}
