// file: src/utils/validation.rs
// description: input validation utilities and helpers
// reference: input validation patterns

use crate::error::{QuizError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_source_file(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(QuizError::UnreadableSource {
                path: path.to_path_buf(),
                message: "file not found".to_string(),
            });
        }

        if !path.is_file() {
            return Err(QuizError::Validation(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        Self::validate_text_extension(path)
    }

    pub fn validate_text_extension(path: &Path) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("txt") => Ok(()),
            _ => Err(QuizError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Shortens `text` to at most `max_chars` characters, appending `...`.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            None => text.to_string(),
            Some((idx, _)) => format!("{}...", &text[..idx]),
        }
    }
}
