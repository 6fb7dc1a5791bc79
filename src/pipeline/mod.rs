// file: src/pipeline/mod.rs
// description: question generation pipeline module exports
// reference: pipeline orchestration

mod progress;
mod service;

pub use progress::{PipelineStats, ProgressTracker};
pub use service::{BatchReport, QuestionService};
