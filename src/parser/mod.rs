// file: src/parser/mod.rs
// description: question text parsing module exports
// reference: internal module structure

pub mod question;
pub mod quote;

pub use question::{ParsedQuestion, QuestionOption, ANSWER_MARKER, QUOTE_MARKER};
pub use quote::{clean_quote, locate_quote};
