use crate::types::DbId;

/// Domain error taxonomy shared by the repository and API layers.
///
/// Every variant maps to exactly one HTTP status in the API crate, so
/// handlers never pick status codes ad hoc.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A delete was blocked by dependent rows, or a referenced foreign
    /// entity does not exist.
    #[error("Referential constraint: {0}")]
    Referential(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A domain rule violation, e.g. deleting the last remaining admin.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
