use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Valid JSON that is neither `{"messages": [...]}` nor a bare array.
    #[error("Invalid archive format: {0}")]
    Format(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
