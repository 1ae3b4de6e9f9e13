use thiserror::Error;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("cannot remove the last {0}")]
    LastRemaining(&'static str),
}
