// file: src/generator/mod.rs
// description: question generator boundary and request type
// reference: https://docs.rs/async-trait

pub mod openai;
pub mod prompt;

use crate::error::Result;
use async_trait::async_trait;

pub use openai::OpenAiQuestionGenerator;
pub use prompt::{build_prompt, existing_question_label};

/// Everything a generator needs to write one new question for a chunk.
#[derive(Debug, Clone)]
pub struct QuestionRequest {
    pub chunk_label: String,
    pub chunk_text: String,
    /// Full text of every question already stored for the chunk, in slot order.
    pub existing: Vec<String>,
}

impl QuestionRequest {
    pub fn new(chunk_label: impl Into<String>, chunk_text: impl Into<String>) -> Self {
        Self {
            chunk_label: chunk_label.into(),
            chunk_text: chunk_text.into(),
            existing: Vec::new(),
        }
    }

    pub fn with_existing(mut self, existing: Vec<String>) -> Self {
        self.existing = existing;
        self
    }
}

/// Produces one question that covers a different aspect of the chunk than
/// every question in `request.existing`. Returning `Err` signals failure;
/// the returned text is stored as-is.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, request: &QuestionRequest) -> Result<String>;

    fn name(&self) -> &str {
        "generator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_ok, block_on};

    struct EchoGenerator;

    #[async_trait]
    impl QuestionGenerator for EchoGenerator {
        async fn generate(&self, request: &QuestionRequest) -> Result<String> {
            Ok(format!("{} / {}", request.chunk_label, request.existing.len()))
        }
    }

    #[test]
    fn test_generator_behind_trait_object() {
        let generator: Box<dyn QuestionGenerator> = Box::new(EchoGenerator);
        let request = QuestionRequest::new("chunk3", "text").with_existing(vec!["q".to_string()]);

        let output = assert_ok!(block_on(generator.generate(&request)));
        assert_eq!(output, "chunk3 / 1");
        assert_eq!(generator.name(), "generator");
    }
}
