// file: src/models/document.rs
// description: source document model with content hashing
// reference: internal data structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A plain-text source as read from disk. `raw` keeps the original bytes so
/// the library can store an exact copy next to the chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub file_name: String,
    #[serde(skip)]
    pub raw: Vec<u8>,
    pub content: String,
    pub encoding: String,
    pub content_hash: String,
}

impl SourceDocument {
    pub fn new(file_name: String, raw: Vec<u8>, content: String, encoding: &str) -> Self {
        let content_hash = Self::compute_hash(&content);

        Self {
            file_name,
            raw,
            content,
            encoding: encoding.to_string(),
            content_hash,
        }
    }

    /// In-memory text destined for the library, stored as UTF-8.
    pub fn from_text(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let raw = content.as_bytes().to_vec();
        Self::new(file_name.into(), raw, content, "utf-8")
    }

    fn compute_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_from_text() {
        let doc = SourceDocument::from_text("book.txt", "Some test content");

        assert_eq!(doc.file_name, "book.txt");
        assert_eq!(doc.raw, b"Some test content");
        assert_eq!(doc.encoding, "utf-8");
        assert_eq!(doc.content_hash.len(), 64);
        assert_eq!(doc.word_count(), 3);
    }

    #[test]
    fn test_hash_consistency() {
        let content = "Test content";
        let hash1 = SourceDocument::compute_hash(content);
        let hash2 = SourceDocument::compute_hash(content);
        assert_eq!(hash1, hash2);
    }
}
