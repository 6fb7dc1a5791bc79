// file: src/library/naming.rs
// description: folder and file naming rules for books, chunks and question slots
// reference: numeric-aware names, never lexicographic ordering

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

pub const MAX_FOLDER_NAME_CHARS: usize = 50;
pub const PLACEHOLDER_BOOK_NAME: &str = "UnknownBook";

lazy_static! {
    static ref UNSAFE_CHARS: Regex =
        Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).expect("UNSAFE_CHARS regex is valid");

    static ref UNDERSCORE_RUNS: Regex =
        Regex::new(r"[_\s]+").expect("UNDERSCORE_RUNS regex is valid");

    static ref CHUNK_DIR: Regex =
        Regex::new(r"^chunk(\d+)$").expect("CHUNK_DIR regex is valid");

    static ref QUESTION_FILE: Regex =
        Regex::new(r"^chunk(\d+)_question(\d*)\.txt$").expect("QUESTION_FILE regex is valid");

    static ref TRAILING_DIGITS: Regex =
        Regex::new(r"^(.*?)(\d+)$").expect("TRAILING_DIGITS regex is valid");
}

/// Filesystem-safe book folder name derived from a source file name. Does not
/// account for collisions; the store appends `_1`, `_2`, ... as needed.
pub fn clean_folder_name(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let replaced = UNSAFE_CHARS.replace_all(&stem, "_");
    let collapsed = UNDERSCORE_RUNS.replace_all(&replaced, "_");
    let mut name = collapsed.trim_matches('_').to_string();

    if name.chars().count() > MAX_FOLDER_NAME_CHARS {
        name = name
            .chars()
            .take(MAX_FOLDER_NAME_CHARS)
            .collect::<String>()
            .trim_end_matches('_')
            .to_string();
    }

    if name.is_empty() {
        name = PLACEHOLDER_BOOK_NAME.to_string();
    }

    name
}

pub fn suffixed_name(base: &str, counter: usize) -> String {
    if counter == 0 {
        base.to_string()
    } else {
        format!("{}_{}", base, counter)
    }
}

pub fn chunk_dir_name(index: usize) -> String {
    format!("chunk{}", index)
}

pub fn chunk_file_name(index: usize) -> String {
    format!("chunk{}.txt", index)
}

/// Slot 1 is the bare `_question` name; later slots carry their number.
pub fn question_file_name(chunk_index: usize, slot: usize) -> String {
    if slot <= 1 {
        format!("chunk{}_question.txt", chunk_index)
    } else {
        format!("chunk{}_question{}.txt", chunk_index, slot)
    }
}

/// Positive number written the way this module writes it: no leading zeros.
fn canonical_number(digits: &str) -> Option<usize> {
    if digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

pub fn parse_chunk_dir(name: &str) -> Option<usize> {
    CHUNK_DIR
        .captures(name)
        .and_then(|caps| canonical_number(&caps[1]))
}

/// Returns `(chunk_index, slot)` for a question file name. Only names that
/// `question_file_name` produces are accepted, so every slot has one file.
pub fn parse_question_file(name: &str) -> Option<(usize, usize)> {
    let caps = QUESTION_FILE.captures(name)?;
    let chunk_index = canonical_number(&caps[1])?;
    let slot = match &caps[2] {
        "" => 1,
        "1" => return None,
        digits => canonical_number(digits)?,
    };
    Some((chunk_index, slot))
}

/// Sort key splitting a trailing number off a name, so `chunk10` orders after
/// `chunk9`.
pub fn numeric_sort_key(name: &str) -> (String, u64) {
    match TRAILING_DIGITS.captures(name) {
        Some(caps) => (
            caps[1].to_string(),
            caps[2].parse().unwrap_or(u64::MAX),
        ),
        None => (name.to_string(), 0),
    }
}
