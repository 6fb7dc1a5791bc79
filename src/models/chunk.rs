// file: src/models/chunk.rs
// description: handle to one stored chunk of a book
// reference: chunk<N>/chunk<N>.txt layout

use crate::error::{QuizError, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkHandle {
    pub book: String,
    /// 1-based position in the book.
    pub index: usize,
    pub dir: PathBuf,
    pub text_path: PathBuf,
}

impl ChunkHandle {
    /// The stored chunk text, byte for byte. Viewers rely on this for quote
    /// offsets.
    pub fn read_text(&self) -> Result<String> {
        fs::read_to_string(&self.text_path).map_err(|e| QuizError::UnreadableSource {
            path: self.text_path.clone(),
            message: e.to_string(),
        })
    }

    pub fn label(&self) -> String {
        format!("chunk{}", self.index)
    }
}
