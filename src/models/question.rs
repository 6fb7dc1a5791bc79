// file: src/models/question.rs
// description: handle to one stored question slot of a chunk
// reference: chunk<N>_question.txt / chunk<N>_question<K>.txt layout

use crate::error::{QuizError, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionHandle {
    pub chunk_index: usize,
    /// 1-based slot; the bare `_question` file is slot 1.
    pub slot: usize,
    pub path: PathBuf,
}

impl QuestionHandle {
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| QuizError::UnreadableSource {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}
