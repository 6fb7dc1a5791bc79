// file: src/pipeline/progress.rs
// description: progress tracking and statistics reporting for batch question generation
// reference: uses indicatif for progress bars and tracks generation metrics

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub questions_generated: usize,
    pub chunks_skipped: usize,
    pub chunks_failed: usize,
    pub duration_secs: u64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunks_attempted(&self) -> usize {
        self.questions_generated + self.chunks_failed
    }

    pub fn questions_per_minute(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        self.questions_generated as f64 * 60.0 / self.duration_secs as f64
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.chunks_attempted();
        if total == 0 {
            return 0.0;
        }
        (self.questions_generated as f64 / total as f64) * 100.0
    }

    pub fn summary(&self) -> String {
        let failed = if self.chunks_failed > 0 {
            format!("{} failed", self.chunks_failed).red().to_string()
        } else {
            "0 failed".to_string()
        };

        format!(
            "{} generated, {} skipped, {} in {}s ({:.0}% success)",
            self.questions_generated.to_string().green(),
            self.chunks_skipped,
            failed,
            self.duration_secs,
            self.success_rate()
        )
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    generated: Arc<AtomicUsize>,
    skipped: Arc<AtomicUsize>,
    failed: Arc<AtomicUsize>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_chunks: usize) -> Self {
        Self::with_visibility(total_chunks, true)
    }

    pub fn with_visibility(total_chunks: usize, visible: bool) -> Self {
        let multi_progress = if visible {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };

        let main_bar = create_progress_bar(&multi_progress, total_chunks as u64);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            generated: Arc::new(AtomicUsize::new(0)),
            skipped: Arc::new(AtomicUsize::new(0)),
            failed: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_generated(&self) {
        self.generated.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn set_message(&self, message: String) {
        self.main_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Generation complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> PipelineStats {
        PipelineStats {
            questions_generated: self.generated.load(Ordering::SeqCst),
            chunks_skipped: self.skipped.load(Ordering::SeqCst),
            chunks_failed: self.failed.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }

    fn update_detail_bar(&self) {
        let message = format!(
            "Generated: {} | Skipped: {} | Failed: {}",
            self.generated.load(Ordering::SeqCst),
            self.skipped.load(Ordering::SeqCst),
            self.failed.load(Ordering::SeqCst)
        );

        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        if !self.main_bar.is_finished() {
            self.finish();
        }
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
    ) {
        bar.set_style(style.progress_chars("█▓▒░"));
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stats_calculations() {
        let mut stats = PipelineStats::new();
        stats.questions_generated = 9;
        stats.chunks_failed = 1;
        stats.duration_secs = 30;

        assert_eq!(stats.chunks_attempted(), 10);
        assert_eq!(stats.questions_per_minute(), 18.0);
        assert!((stats.success_rate() - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_pipeline_stats_zero_duration() {
        let stats = PipelineStats::new();
        assert_eq!(stats.questions_per_minute(), 0.0);
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_progress_tracker_counts() {
        let tracker = ProgressTracker::with_visibility(4, false);

        tracker.inc_generated();
        tracker.inc_generated();
        tracker.inc_skipped();
        tracker.inc_failed();

        let stats = tracker.get_stats();
        assert_eq!(stats.questions_generated, 2);
        assert_eq!(stats.chunks_skipped, 1);
        assert_eq!(stats.chunks_failed, 1);
    }
}
