// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod book;
pub mod chunk;
pub mod document;
pub mod question;

pub use book::{BookHandle, BookInfo};
pub use chunk::ChunkHandle;
pub use document::SourceDocument;
pub use question::QuestionHandle;
