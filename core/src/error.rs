use thiserror::Error;
use uuid::Uuid;

/// Rejections from the task list. None of them leave the list modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("task not found: {0}")]
    NotFound(Uuid),
    #[error("index {index} out of range for list of length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("task text is empty")]
    EmptyInput,
    #[error("task id already present: {0}")]
    DuplicateId(Uuid),
}
