// file: src/utils/logging.rs
// description: Tracing subscriber initialization and colored terminal output helpers

use colored::*;
use std::ops::Range;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
/// overrides the verbosity flag when set.
pub fn init_logger(colored_output: bool, verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact()
        .with_ansi(colored_output);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    if !colored_output {
        colored::control::set_override(false);
    }
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}

pub fn format_info(msg: &str) -> String {
    format!("{} {}", "ℹ".blue().bold(), msg)
}

pub fn format_step(step: usize, total: usize, msg: &str) -> String {
    format!("{} {}", format!("[{}/{}]", step, total).cyan().bold(), msg)
}

/// Renders `text` with the byte `range` highlighted. Out-of-bounds or
/// non-boundary ranges leave the text unchanged.
pub fn format_highlight(text: &str, range: Range<usize>) -> String {
    match (
        text.get(..range.start),
        text.get(range.clone()),
        text.get(range.end..),
    ) {
        (Some(before), Some(quote), Some(after)) => {
            format!("{}{}{}", before, quote.black().on_yellow(), after)
        }
        _ => text.to_string(),
    }
}
