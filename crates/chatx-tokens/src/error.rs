use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Tokenizer not available: built without the `tiktoken` feature")]
    NotCompiled,

    #[error("Failed to load {encoding} encoding: {message}")]
    Load { encoding: String, message: String },
}

pub type Result<T> = std::result::Result<T, TokenError>;
