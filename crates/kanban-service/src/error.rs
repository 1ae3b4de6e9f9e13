use kanban_core::KanbanError;
use kanban_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// A guarded operation was refused and nothing was changed.
    #[error("{0}")]
    Rejected(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<KanbanError> for ServiceError {
    fn from(e: KanbanError) -> Self {
        match e {
            KanbanError::NotFound(msg) => ServiceError::NotFound(msg),
            KanbanError::InvalidInput(msg) => ServiceError::InvalidInput(msg),
            KanbanError::AlreadyExists(msg) => ServiceError::AlreadyExists(msg),
            KanbanError::LastRemaining(noun) => {
                ServiceError::Rejected(format!("cannot remove the last {noun}"))
            }
        }
    }
}

/// Trim `value` and reject it when nothing is left.
pub(crate) fn required(field: &str, value: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
