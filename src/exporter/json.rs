// file: src/exporter/json.rs
// description: json export of a book's chunks and their questions

use crate::chunker::paragraph::word_count;
use crate::error::Result;
use crate::library::{Library, list_questions};
use crate::models::BookHandle;
use crate::parser::ParsedQuestion;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct BookExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportedQuestion {
    pub slot: usize,
    pub content: String,
    pub answer: Option<char>,
    pub quote: Option<String>,
    pub well_formed: bool,
}

#[derive(Debug, Serialize)]
pub struct ExportedChunk {
    pub index: usize,
    pub word_count: usize,
    pub text: String,
    pub questions: Vec<ExportedQuestion>,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub book: String,
    pub total_chunks: usize,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct ExportedBook {
    pub manifest: ExportManifest,
    pub chunks: Vec<ExportedChunk>,
}

impl BookExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn collect(&self, library: &Library, book: &BookHandle) -> Result<ExportedBook> {
        let mut chunks = Vec::new();

        for chunk in library.list_chunks(book)? {
            let text = chunk.read_text()?;
            let mut questions = Vec::new();

            for handle in list_questions(&chunk)? {
                let content = handle.read()?;
                let parsed = ParsedQuestion::parse(&content);
                questions.push(ExportedQuestion {
                    slot: handle.slot,
                    answer: parsed.answer(),
                    quote: parsed.quote().map(str::to_string),
                    well_formed: parsed.is_well_formed(),
                    content,
                });
            }

            chunks.push(ExportedChunk {
                index: chunk.index,
                word_count: word_count(&text),
                text,
                questions,
            });
        }

        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            book: book.name.clone(),
            total_chunks: chunks.len(),
            total_questions: chunks.iter().map(|c| c.questions.len()).sum(),
        };

        Ok(ExportedBook { manifest, chunks })
    }

    pub fn export_book(&self, library: &Library, book: &BookHandle, pretty: bool) -> Result<PathBuf> {
        info!("Exporting '{}' to {:?}", book.name, self.output_dir);

        let exported = self.collect(library, book)?;
        let json = if pretty {
            serde_json::to_string_pretty(&exported)?
        } else {
            serde_json::to_string(&exported)?
        };

        let path = self.output_dir.join(format!("{}.json", book.name));
        fs::write(&path, json)?;

        info!(
            "Export complete: {} chunks, {} questions",
            exported.manifest.total_chunks, exported.manifest.total_questions
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::ChunkerOptions;
    use crate::library::write_question;
    use tempfile::tempdir;

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        let exporter = BookExporter::new(dir.path().join("exports"));
        assert!(exporter.is_ok());
    }

    #[test]
    fn test_export_book_writes_chunks_and_questions() {
        let dir = tempdir().unwrap();
        let library = Library::open(dir.path().join("lib")).unwrap();
        let book = library
            .ingest("One two three.\n\nFour five six.", "tiny.txt", &ChunkerOptions::new(3, 0))
            .unwrap();
        let chunk = library.chunk(&book, 2).unwrap();
        write_question(&chunk, "Q?\nA) a\nB) b\nC) c\nD) d\nAnswer: B\nQuote: Four five").unwrap();

        let exporter = BookExporter::new(dir.path().join("exports")).unwrap();
        let path = exporter.export_book(&library, &book, true).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["manifest"]["book"], "tiny");
        assert_eq!(value["manifest"]["total_chunks"], 2);
        assert_eq!(value["manifest"]["total_questions"], 1);
        assert_eq!(value["chunks"][1]["questions"][0]["answer"], "B");
        assert_eq!(value["chunks"][1]["questions"][0]["quote"], "Four five");
        assert_eq!(value["chunks"][0]["text"], "\tOne two three.");
    }
}
