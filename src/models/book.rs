// file: src/models/book.rs
// description: library book handle and summary information
// reference: one folder per ingested source document

use serde::Serialize;
use std::path::PathBuf;

pub const CHUNKS_DIR: &str = "chunks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookHandle {
    /// Clean, collision-free folder name.
    pub name: String,
    pub path: PathBuf,
}

impl BookHandle {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn chunks_dir(&self) -> PathBuf {
        self.path.join(CHUNKS_DIR)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookInfo {
    pub name: String,
    pub path: PathBuf,
    pub original_files: Vec<String>,
    pub chunk_count: usize,
    pub question_count: usize,
}
