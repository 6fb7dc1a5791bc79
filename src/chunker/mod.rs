// file: src/chunker/mod.rs
// description: word-budgeted, paragraph-aligned text chunking with overlap seeding
// reference: greedy paragraph packing with sentence fallback for oversized paragraphs

pub mod paragraph;

use crate::config::{DEFAULT_CHUNK_SIZE, DEFAULT_LONG_PARAGRAPH_FACTOR, DEFAULT_OVERLAP};
use crate::error::{QuizError, Result};
use paragraph::{regroup_sentences, split_paragraphs, split_sentences, word_count};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkerOptions {
    /// Target upper bound of words per chunk.
    pub chunk_size: usize,
    /// Word budget of trailing paragraphs carried into the next chunk.
    pub overlap: usize,
    /// Paragraphs above `chunk_size * long_paragraph_factor` words are split
    /// into sentence sections before packing.
    pub long_paragraph_factor: f64,
}

impl Default for ChunkerOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
            long_paragraph_factor: DEFAULT_LONG_PARAGRAPH_FACTOR,
        }
    }
}

impl ChunkerOptions {
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(QuizError::Validation(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        if self.overlap.saturating_mul(2) > self.chunk_size {
            return Err(QuizError::Validation(format!(
                "overlap ({}) must be at most half of chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }

        if !(self.long_paragraph_factor >= 1.0) {
            return Err(QuizError::Validation(format!(
                "long_paragraph_factor must be at least 1.0, got {}",
                self.long_paragraph_factor
            )));
        }

        Ok(())
    }

    fn long_paragraph_limit(&self) -> f64 {
        self.chunk_size as f64 * self.long_paragraph_factor
    }
}

/// One chunk of a document. The first `overlap_paragraphs` entries of
/// `paragraphs` were carried over from the previous chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    pub index: usize,
    pub paragraphs: Vec<String>,
    pub overlap_paragraphs: usize,
    pub word_count: usize,
}

impl TextChunk {
    /// Tab-indented paragraphs separated by a blank line.
    pub fn render(&self) -> String {
        self.paragraphs
            .iter()
            .map(|para| format!("\t{}", para))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn fresh_paragraphs(&self) -> &[String] {
        &self.paragraphs[self.overlap_paragraphs..]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Chunker {
    options: ChunkerOptions,
}

impl Chunker {
    pub fn new(options: ChunkerOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn split(&self, text: &str) -> Result<Vec<TextChunk>> {
        if text.trim().is_empty() {
            return Err(QuizError::EmptyInput);
        }

        let paragraphs = self.prepare_paragraphs(text);
        if paragraphs.is_empty() {
            return Err(QuizError::EmptyInput);
        }

        let chunks = self.pack(paragraphs);
        debug!(
            "Split text into {} chunks (chunk_size={}, overlap={})",
            chunks.len(),
            self.options.chunk_size,
            self.options.overlap
        );
        Ok(chunks)
    }

    fn prepare_paragraphs(&self, text: &str) -> Vec<String> {
        let limit = self.options.long_paragraph_limit();
        let mut prepared = Vec::new();

        for para in split_paragraphs(text) {
            let words = word_count(&para);
            if words as f64 > limit {
                let sections = regroup_sentences(&split_sentences(&para), self.options.chunk_size);
                debug!(
                    "Paragraph of {} words split into {} sentence sections",
                    words,
                    sections.len()
                );
                prepared.extend(sections);
            } else {
                prepared.push(para);
            }
        }

        prepared
    }

    fn pack(&self, paragraphs: Vec<String>) -> Vec<TextChunk> {
        let chunk_size = self.options.chunk_size;
        let mut chunks = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut current_words = 0;
        let mut seeded = 0;

        for para in paragraphs {
            let para_words = word_count(&para);

            if current_words + para_words > chunk_size && !current.is_empty() {
                let (carry, carry_words) = self.overlap_tail(&current);
                let closed = std::mem::replace(&mut current, carry);
                chunks.push(TextChunk {
                    index: chunks.len() + 1,
                    paragraphs: closed,
                    overlap_paragraphs: seeded,
                    word_count: current_words,
                });
                seeded = current.len();
                current_words = carry_words;
            }

            current.push(para);
            current_words += para_words;
        }

        if !current.is_empty() {
            chunks.push(TextChunk {
                index: chunks.len() + 1,
                paragraphs: current,
                overlap_paragraphs: seeded,
                word_count: current_words,
            });
        }

        chunks
    }

    /// Longest run of trailing paragraphs whose combined word count fits the
    /// overlap budget. Single-paragraph chunks never seed an overlap.
    fn overlap_tail(&self, closed: &[String]) -> (Vec<String>, usize) {
        if self.options.overlap == 0 || closed.len() < 2 {
            return (Vec::new(), 0);
        }

        let mut words = 0;
        let mut start = closed.len();
        for (idx, para) in closed.iter().enumerate().rev() {
            let para_words = word_count(para);
            if words + para_words > self.options.overlap {
                break;
            }
            words += para_words;
            start = idx;
        }

        (closed[start..].to_vec(), words)
    }
}

/// Chunks `text` and renders each chunk for storage.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Result<Vec<String>> {
    let chunker = Chunker::new(ChunkerOptions::new(chunk_size, overlap))?;
    Ok(chunker
        .split(text)?
        .iter()
        .map(TextChunk::render)
        .collect())
}
