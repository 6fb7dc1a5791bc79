// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod chunker;
pub mod config;
pub mod error;
pub mod exporter;
pub mod generator;
pub mod library;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod utils;

pub use chunker::{Chunker, ChunkerOptions, TextChunk, chunk_text};
pub use config::{ChunkingConfig, Config, GeneratorConfig, LibraryConfig};
pub use error::{QuizError, Result};
pub use exporter::{BookExporter, ExportManifest, ExportedBook};
pub use generator::{OpenAiQuestionGenerator, QuestionGenerator, QuestionRequest};
pub use library::{Library, list_questions, next_question_slot, write_question};
pub use models::{BookHandle, BookInfo, ChunkHandle, QuestionHandle, SourceDocument};
pub use parser::{ParsedQuestion, locate_quote};
pub use pipeline::{BatchReport, PipelineStats, ProgressTracker, QuestionService};
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        assert_eq!(config.chunking.options(), ChunkerOptions::default());
        let _chunker = Chunker::new(config.chunking.options()).unwrap();
    }
}
