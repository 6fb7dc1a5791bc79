// file: src/library/slots.rs
// description: per-chunk question slot numbering and append-only question writes
// reference: first unused slot, create-exclusive file open

use crate::error::{QuizError, Result};
use crate::library::naming::{parse_question_file, question_file_name};
use crate::models::{ChunkHandle, QuestionHandle};
use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use tracing::{debug, info, warn};

const MAX_SLOT_ATTEMPTS: usize = 64;

/// Questions stored for a chunk, ordered by slot.
pub fn list_questions(chunk: &ChunkHandle) -> Result<Vec<QuestionHandle>> {
    if !chunk.dir.is_dir() {
        return Err(QuizError::ChunkNotFound {
            book: chunk.book.clone(),
            index: chunk.index,
        });
    }

    let mut questions = Vec::new();
    for entry in fs::read_dir(&chunk.dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some((chunk_index, slot)) = parse_question_file(&name)
            && chunk_index == chunk.index
        {
            questions.push(QuestionHandle {
                chunk_index,
                slot,
                path: entry.path(),
            });
        }
    }

    questions.sort_by(|a, b| a.slot.cmp(&b.slot).then_with(|| a.path.cmp(&b.path)));
    Ok(questions)
}

/// First slot number >= 1 with no question file. A gap left by a deleted
/// question is filled before the highest slot is extended.
pub fn next_question_slot(chunk: &ChunkHandle) -> Result<usize> {
    let taken: BTreeSet<usize> = list_questions(chunk)?.iter().map(|q| q.slot).collect();
    Ok((1..).find(|slot| !taken.contains(slot)).unwrap_or(1))
}

/// Stores `content` in the next free slot. The file is opened with
/// `create_new`, so a slot claimed by another writer between the scan and the
/// open is detected and the scan is repeated; an existing question is never
/// overwritten.
pub fn write_question(chunk: &ChunkHandle, content: &str) -> Result<QuestionHandle> {
    for _ in 0..MAX_SLOT_ATTEMPTS {
        let slot = next_question_slot(chunk)?;
        let path = chunk.dir.join(question_file_name(chunk.index, slot));

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("Slot {} of chunk {} taken concurrently, rescanning", slot, chunk.index);
                continue;
            }
            Err(e) => return Err(QuizError::persistence(path, e)),
        };

        if let Err(e) = file.write_all(content.as_bytes()).and_then(|_| file.sync_all()) {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&path) {
                warn!("Could not remove partial question {}: {}", path.display(), cleanup);
            }
            return Err(QuizError::persistence(path, e));
        }

        info!("Saved question slot {} for chunk {}", slot, chunk.index);
        return Ok(QuestionHandle {
            chunk_index: chunk.index,
            slot,
            path,
        });
    }

    Err(QuizError::persistence(
        chunk.dir.clone(),
        std::io::Error::new(
            ErrorKind::AlreadyExists,
            "no free question slot after repeated attempts",
        ),
    ))
}

pub fn read_question(chunk: &ChunkHandle, slot: usize) -> Result<String> {
    list_questions(chunk)?
        .into_iter()
        .find(|q| q.slot == slot)
        .ok_or(QuizError::QuestionNotFound {
            chunk: chunk.index,
            slot,
        })?
        .read()
}
