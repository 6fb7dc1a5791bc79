// file: src/library/mod.rs
// description: on-disk library module exports
// reference: internal module structure

pub mod naming;
pub mod slots;
pub mod source;
mod store;

pub use slots::{list_questions, next_question_slot, read_question, write_question};
pub use source::read_source;
pub use store::Library;
