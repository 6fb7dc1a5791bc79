// file: src/pipeline/service.rs
// description: question generation for single chunks and whole books
// reference: gathers existing questions, calls the generator, claims the next slot

use crate::error::{QuizError, Result};
use crate::generator::{QuestionGenerator, QuestionRequest};
use crate::library::{Library, list_questions, write_question};
use crate::models::{BookHandle, ChunkHandle, QuestionHandle};
use crate::pipeline::progress::{PipelineStats, ProgressTracker};
use tracing::{error, info, warn};

/// Outcome of a batch run. Failures are per chunk and never stop the batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub generated: Vec<QuestionHandle>,
    pub skipped: Vec<usize>,
    pub failed: Vec<(usize, String)>,
    pub stats: PipelineStats,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct QuestionService<'a> {
    library: &'a Library,
    generator: &'a dyn QuestionGenerator,
    show_progress: bool,
}

impl<'a> QuestionService<'a> {
    pub fn new(library: &'a Library, generator: &'a dyn QuestionGenerator) -> Self {
        Self {
            library,
            generator,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Full text of every stored question for `chunk`, in slot order.
    pub fn existing_questions(&self, chunk: &ChunkHandle) -> Result<Vec<String>> {
        list_questions(chunk)?
            .iter()
            .map(QuestionHandle::read)
            .collect()
    }

    pub async fn generate_for_chunk(&self, chunk: &ChunkHandle) -> Result<QuestionHandle> {
        let chunk_text = chunk.read_text()?;
        let existing = self.existing_questions(chunk)?;

        info!(
            "Generating question for {} of '{}' with {} ({} existing)",
            chunk.label(),
            chunk.book,
            self.generator.name(),
            existing.len()
        );

        let request = QuestionRequest::new(chunk.label(), chunk_text).with_existing(existing);
        let question = self.generator.generate(&request).await?;

        if question.trim().is_empty() {
            return Err(QuizError::Generation(format!(
                "generator returned no content for {}",
                chunk.label()
            )));
        }

        write_question(chunk, &question)
    }

    /// Generates one question per chunk, in chunk order. With `skip_existing`,
    /// chunks that already have a question are left alone.
    pub async fn generate_for_book(
        &self,
        book: &BookHandle,
        skip_existing: bool,
    ) -> Result<BatchReport> {
        let chunks = self.library.list_chunks(book)?;
        let tracker = ProgressTracker::with_visibility(chunks.len(), self.show_progress);
        let mut report = BatchReport::default();

        for chunk in &chunks {
            tracker.set_message(format!("{} / {}", book.name, chunk.label()));

            if skip_existing {
                match list_questions(chunk) {
                    Ok(questions) if !questions.is_empty() => {
                        report.skipped.push(chunk.index);
                        tracker.inc_skipped();
                        continue;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("Failed to scan questions for {}: {}", chunk.label(), e);
                        tracker.inc_failed();
                        report.failed.push((chunk.index, e.to_string()));
                        continue;
                    }
                }
            }

            match self.generate_for_chunk(chunk).await {
                Ok(question) => {
                    tracker.inc_generated();
                    report.generated.push(question);
                }
                Err(e) => {
                    error!("Failed to generate question for {}: {}", chunk.label(), e);
                    tracker.inc_failed();
                    report.failed.push((chunk.index, e.to_string()));
                }
            }
        }

        tracker.finish();
        report.stats = tracker.get_stats();

        if report.is_clean() {
            info!(
                "Generated {} questions for '{}'",
                report.generated.len(),
                book.name
            );
        } else {
            warn!(
                "Generated {} questions for '{}', {} chunks failed",
                report.generated.len(),
                book.name,
                report.failed.len()
            );
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::ChunkerOptions;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records every request and answers with a numbered question.
    #[derive(Default)]
    struct RecordingGenerator {
        requests: Mutex<Vec<QuestionRequest>>,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl QuestionGenerator for RecordingGenerator {
        async fn generate(&self, request: &QuestionRequest) -> Result<String> {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());

            if self.fail_on.as_deref() == Some(request.chunk_label.as_str()) {
                return Err(QuizError::Generation("simulated outage".to_string()));
            }

            Ok(format!(
                "Question {} about {}?\nA) a\nB) b\nC) c\nD) d\nAnswer: A",
                requests.len(),
                request.chunk_label
            ))
        }
    }

    struct BlankGenerator;

    #[async_trait]
    impl QuestionGenerator for BlankGenerator {
        async fn generate(&self, _request: &QuestionRequest) -> Result<String> {
            Ok("  \n".to_string())
        }
    }

    /// Deletes `remove_dir` on its first call, after the batch has listed chunks.
    struct RemovingGenerator {
        remove_dir: PathBuf,
    }

    #[async_trait]
    impl QuestionGenerator for RemovingGenerator {
        async fn generate(&self, request: &QuestionRequest) -> Result<String> {
            if self.remove_dir.exists() {
                std::fs::remove_dir_all(&self.remove_dir).unwrap();
            }
            Ok(format!("About {}?\nA) a\nB) b\nC) c\nD) d\nAnswer: A", request.chunk_label))
        }
    }

    fn book_with_chunks(count: usize) -> (TempDir, Library, BookHandle) {
        let temp = TempDir::new().unwrap();
        let library = Library::open(temp.path().join("lib")).unwrap();
        let text = (0..count)
            .map(|i| format!("Paragraph {} has exactly six words.", i))
            .collect::<Vec<_>>()
            .join("\n\n");
        let book = library
            .ingest(&text, "book.txt", &ChunkerOptions::new(6, 0))
            .unwrap();
        (temp, library, book)
    }

    #[tokio::test]
    async fn test_second_question_gets_new_slot_and_sees_first() {
        let (_temp, library, book) = book_with_chunks(1);
        let generator = RecordingGenerator::default();
        let service = QuestionService::new(&library, &generator);
        let chunk = library.chunk(&book, 1).unwrap();

        let first = service.generate_for_chunk(&chunk).await.unwrap();
        let second = service.generate_for_chunk(&chunk).await.unwrap();

        assert_eq!(first.slot, 1);
        assert_eq!(second.slot, 2);
        assert_eq!(second.path.file_name().unwrap(), "chunk1_question2.txt");

        let requests = generator.requests.lock().unwrap();
        assert!(requests[0].existing.is_empty());
        assert_eq!(requests[1].existing, vec![first.read().unwrap()]);
        assert_eq!(requests[1].chunk_text, chunk.read_text().unwrap());
    }

    #[tokio::test]
    async fn test_blank_output_is_generation_failure() {
        let (_temp, library, book) = book_with_chunks(1);
        let service = QuestionService::new(&library, &BlankGenerator);
        let chunk = library.chunk(&book, 1).unwrap();

        let err = service.generate_for_chunk(&chunk).await.unwrap_err();
        assert!(matches!(err, QuizError::Generation(_)));
        assert!(list_questions(&chunk).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_continues_past_failures() {
        let (_temp, library, book) = book_with_chunks(3);
        let generator = RecordingGenerator {
            fail_on: Some("chunk2".to_string()),
            ..Default::default()
        };
        let service = QuestionService::new(&library, &generator);

        let report = service.generate_for_book(&book, false).await.unwrap();

        assert_eq!(
            report.generated.iter().map(|q| q.chunk_index).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, 2);
        assert_eq!(report.stats.questions_generated, 2);
        assert_eq!(report.stats.chunks_failed, 1);
    }

    #[tokio::test]
    async fn test_batch_continues_when_chunk_folder_vanishes() {
        let (_temp, library, book) = book_with_chunks(3);
        let generator = RemovingGenerator {
            remove_dir: library.chunk(&book, 2).unwrap().dir,
        };
        let service = QuestionService::new(&library, &generator);

        let report = service.generate_for_book(&book, true).await.unwrap();

        assert_eq!(
            report.generated.iter().map(|q| q.chunk_index).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, 2);
        assert!(report.skipped.is_empty());
        assert_eq!(report.stats.chunks_failed, 1);
    }

    #[tokio::test]
    async fn test_batch_skip_existing() {
        let (_temp, library, book) = book_with_chunks(2);
        let generator = RecordingGenerator::default();
        let service = QuestionService::new(&library, &generator);

        service
            .generate_for_chunk(&library.chunk(&book, 1).unwrap())
            .await
            .unwrap();
        let report = service.generate_for_book(&book, true).await.unwrap();

        assert_eq!(report.skipped, vec![1]);
        assert_eq!(report.generated.len(), 1);
        assert_eq!(report.generated[0].chunk_index, 2);
        assert!(report.is_clean());
    }
}
