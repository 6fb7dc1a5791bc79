// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuizError>;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("No usable text found after normalization")]
    EmptyInput,

    #[error("Cannot read source {path}: {message}")]
    UnreadableSource { path: PathBuf, message: String },

    #[error("Unsupported source format (only .txt is accepted): {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Question generation failed: {0}")]
    Generation(String),

    #[error("Failed to persist {path}: {source}")]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Chunk {index} not found in book {book}")]
    ChunkNotFound { book: String, index: usize },

    #[error("Question slot {slot} not found for chunk {chunk}")]
    QuestionNotFound { chunk: usize, slot: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QuizError {
    pub fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }
}
