// file: src/library/source.rs
// description: source text loading with ordered encoding fallback
// reference: utf-8 first, then single-byte western encodings

use crate::error::{QuizError, Result};
use crate::models::SourceDocument;
use crate::utils::Validator;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decoders tried in order until one accepts the bytes.
const ENCODINGS: &[(&str, fn(&[u8]) -> Option<String>)] = &[
    ("utf-8", decode_utf8),
    ("windows-1252", decode_windows_1252),
    ("iso-8859-1", decode_latin1),
];

// Windows-1252 code points for 0x80..=0x9F; `None` marks undefined bytes.
const CP1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// Reads a `.txt` source from disk. Nothing is written anywhere, so a failure
/// here never leaves a partial book behind.
pub fn read_source(path: &Path) -> Result<SourceDocument> {
    if !path.is_file() {
        return Err(QuizError::UnreadableSource {
            path: path.to_path_buf(),
            message: "file not found".to_string(),
        });
    }

    Validator::validate_text_extension(path)?;

    let raw = fs::read(path).map_err(|e| QuizError::UnreadableSource {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let (content, encoding) = decode(&raw).ok_or_else(|| QuizError::UnreadableSource {
        path: path.to_path_buf(),
        message: "could not decode with any supported encoding".to_string(),
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!("Read {} ({} bytes, {})", path.display(), raw.len(), encoding);
    Ok(SourceDocument::new(file_name, raw, content, encoding))
}

pub fn decode(bytes: &[u8]) -> Option<(String, &'static str)> {
    for (index, (name, decoder)) in ENCODINGS.iter().enumerate() {
        if let Some(text) = decoder(bytes) {
            if index > 0 {
                warn!("Source is not valid UTF-8, decoded as {}", name);
            }
            return Some((text, *name));
        }
    }
    None
}

fn decode_utf8(bytes: &[u8]) -> Option<String> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes).ok().map(str::to_string)
}

fn decode_windows_1252(bytes: &[u8]) -> Option<String> {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => CP1252_HIGH[(b - 0x80) as usize],
            _ => Some(char::from(b)),
        })
        .collect()
}

fn decode_latin1(bytes: &[u8]) -> Option<String> {
    Some(bytes.iter().map(|&b| char::from(b)).collect())
}
