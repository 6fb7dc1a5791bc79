// file: src/library/store.rs
// description: file-based library of books, chunk folders and their layout
// reference: <root>/<Book>/{<source>.txt, chunks/chunk<N>/chunk<N>.txt}

use crate::chunker::{Chunker, ChunkerOptions, TextChunk};
use crate::config::LibraryConfig;
use crate::error::{QuizError, Result};
use crate::library::naming::{
    chunk_dir_name, chunk_file_name, clean_folder_name, numeric_sort_key, parse_chunk_dir,
    parse_question_file, suffixed_name,
};
use crate::library::source::read_source;
use crate::models::{BookHandle, BookInfo, ChunkHandle, SourceDocument};
use crate::utils::Validator;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    pub fn new(config: &LibraryConfig) -> Result<Self> {
        Self::open(&config.root)
    }

    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| QuizError::persistence(&root, e))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads a `.txt` file from disk and ingests it.
    pub fn add_file(&self, source_path: &Path, options: &ChunkerOptions) -> Result<BookHandle> {
        let document = read_source(source_path)?;
        self.ingest_document(&document, options)
    }

    /// Ingests in-memory text under `source_filename`.
    pub fn ingest(
        &self,
        source_text: &str,
        source_filename: &str,
        options: &ChunkerOptions,
    ) -> Result<BookHandle> {
        ensure_bare_file_name(source_filename)?;
        Validator::validate_text_extension(Path::new(source_filename))?;
        let document = SourceDocument::from_text(source_filename, source_text);
        self.ingest_document(&document, options)
    }

    /// Chunking runs before anything is written, so empty input leaves no
    /// folder behind. Write failures after the folder exists are not rolled
    /// back.
    pub fn ingest_document(
        &self,
        document: &SourceDocument,
        options: &ChunkerOptions,
    ) -> Result<BookHandle> {
        ensure_bare_file_name(&document.file_name)?;
        let chunks = Chunker::new(*options)?.split(&document.content)?;

        let book = self.reserve_book_folder(&clean_folder_name(&document.file_name))?;

        let original = book.path.join(&document.file_name);
        fs::write(&original, &document.raw).map_err(|e| QuizError::persistence(&original, e))?;

        let chunks_dir = book.chunks_dir();
        fs::create_dir_all(&chunks_dir).map_err(|e| QuizError::persistence(&chunks_dir, e))?;

        for chunk in &chunks {
            self.write_chunk(&book, chunk)?;
        }

        info!(
            "Added '{}' to library: {} chunks from {} ({} words, sha256 {})",
            book.name,
            chunks.len(),
            document.file_name,
            document.word_count(),
            &document.content_hash[..12]
        );

        Ok(book)
    }

    /// Creates `<base>`, or `<base>_1`, `<base>_2`, ... when taken. Creation is
    /// the existence check, so two concurrent ingests never share a folder.
    fn reserve_book_folder(&self, base: &str) -> Result<BookHandle> {
        let mut counter = 0;
        loop {
            let name = suffixed_name(base, counter);
            let path = self.root.join(&name);

            match fs::create_dir(&path) {
                Ok(()) => {
                    debug!("Reserved book folder {}", path.display());
                    return Ok(BookHandle::new(name, path));
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => counter += 1,
                Err(e) => return Err(QuizError::persistence(path, e)),
            }
        }
    }

    fn write_chunk(&self, book: &BookHandle, chunk: &TextChunk) -> Result<()> {
        let dir = book.chunks_dir().join(chunk_dir_name(chunk.index));
        fs::create_dir_all(&dir).map_err(|e| QuizError::persistence(&dir, e))?;

        let path = dir.join(chunk_file_name(chunk.index));
        fs::write(&path, chunk.render()).map_err(|e| QuizError::persistence(&path, e))?;

        debug!(
            "Wrote chunk {} ({} words, {} carried paragraphs)",
            chunk.index, chunk.word_count, chunk.overlap_paragraphs
        );
        Ok(())
    }

    /// Book folder names, hidden entries skipped, numeric-aware order.
    pub fn list_books(&self) -> Result<Vec<String>> {
        let mut books = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_dir() && !name.starts_with('.') {
                books.push(name);
            }
        }

        books.sort_by_key(|name| numeric_sort_key(name));
        Ok(books)
    }

    pub fn open_book(&self, name: &str) -> Result<BookHandle> {
        let is_plain_name = !name.is_empty()
            && !name.starts_with('.')
            && Path::new(name).file_name().map(|n| n == name).unwrap_or(false);

        let path = self.root.join(name);
        if !is_plain_name || !path.is_dir() {
            return Err(QuizError::BookNotFound(name.to_string()));
        }

        Ok(BookHandle::new(name, path))
    }

    pub fn book_info(&self, name: &str) -> Result<BookInfo> {
        let book = self.open_book(name)?;

        let mut original_files = Vec::new();
        for entry in fs::read_dir(&book.path)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("txt"))
                    .unwrap_or(false)
            {
                original_files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        original_files.sort();

        let chunk_count = self.list_chunks(&book)?.len();

        let question_count = WalkDir::new(book.chunks_dir())
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| parse_question_file(&e.file_name().to_string_lossy()).is_some())
            .count();

        Ok(BookInfo {
            name: book.name,
            path: book.path,
            original_files,
            chunk_count,
            question_count,
        })
    }

    /// Chunks ordered by numeric index, so `chunk10` follows `chunk9`.
    pub fn list_chunks(&self, book: &BookHandle) -> Result<Vec<ChunkHandle>> {
        let chunks_dir = book.chunks_dir();
        if !chunks_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut chunks = Vec::new();
        for entry in fs::read_dir(&chunks_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            match parse_chunk_dir(&name) {
                Some(index) => chunks.push(ChunkHandle {
                    book: book.name.clone(),
                    index,
                    dir: entry.path(),
                    text_path: entry.path().join(chunk_file_name(index)),
                }),
                None => debug!("Ignoring non-chunk folder {}", name),
            }
        }

        chunks.sort_by_key(|chunk| chunk.index);
        Ok(chunks)
    }

    pub fn chunk(&self, book: &BookHandle, index: usize) -> Result<ChunkHandle> {
        let dir = book.chunks_dir().join(chunk_dir_name(index));
        let text_path = dir.join(chunk_file_name(index));

        if index == 0 || !text_path.is_file() {
            return Err(QuizError::ChunkNotFound {
                book: book.name.clone(),
                index,
            });
        }

        Ok(ChunkHandle {
            book: book.name.clone(),
            index,
            dir,
            text_path,
        })
    }
}

/// The original is copied into the book folder under this name, so it must
/// not carry any path components.
fn ensure_bare_file_name(file_name: &str) -> Result<()> {
    let is_bare = Path::new(file_name)
        .file_name()
        .map(|name| name == file_name)
        .unwrap_or(false);

    if !is_bare {
        return Err(QuizError::Validation(format!(
            "source filename must not contain a path: {}",
            file_name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::paragraph::word_count;
    use crate::library::slots::write_question;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn paragraphs(count: usize, words_each: usize) -> String {
        (0..count)
            .map(|p| {
                (0..words_each)
                    .map(|w| format!("p{}w{}", p, w))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn library() -> (TempDir, Library) {
        let temp = TempDir::new().unwrap();
        let library = Library::open(temp.path().join("myLibrary")).unwrap();
        (temp, library)
    }

    #[test]
    fn test_ingest_creates_layout() {
        let (_temp, library) = library();
        let book = library
            .ingest(&paragraphs(6, 40), "My Book.txt", &ChunkerOptions::new(100, 20))
            .unwrap();

        assert_eq!(book.name, "My_Book");
        assert!(book.path.join("My Book.txt").is_file());
        assert!(book.path.join("chunks/chunk1/chunk1.txt").is_file());

        let chunks = library.list_chunks(&book).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].text_path, book.path.join("chunks/chunk3/chunk3.txt"));

        let first = chunks[0].read_text().unwrap();
        assert!(first.starts_with("\tp0w0"));
        assert_eq!(word_count(&first), 80);
    }

    #[test]
    fn test_add_file_copies_original_bytes() {
        let (temp, library) = library();
        let source = temp.path().join("legacy.txt");
        fs::write(&source, b"caf\xE9 au lait.\n\nSecond paragraph.").unwrap();

        let book = library.add_file(&source, &ChunkerOptions::default()).unwrap();
        assert_eq!(fs::read(book.path.join("legacy.txt")).unwrap(), fs::read(&source).unwrap());

        let chunk = library.chunk(&book, 1).unwrap();
        assert_eq!(chunk.read_text().unwrap(), "\tcafé au lait.\n\n\tSecond paragraph.");
    }

    #[test]
    fn test_name_collision_gets_numeric_suffix() {
        let (_temp, library) = library();
        let options = ChunkerOptions::default();

        let first = library.ingest("Text one.", "Dreams.txt", &options).unwrap();
        let second = library.ingest("Text two.", "Dreams.txt", &options).unwrap();
        let third = library.ingest("Text three.", "Dreams?.txt", &options).unwrap();

        assert_eq!(first.name, "Dreams");
        assert_eq!(second.name, "Dreams_1");
        assert_eq!(third.name, "Dreams_2");
        assert_eq!(
            library.list_books().unwrap(),
            vec!["Dreams", "Dreams_1", "Dreams_2"]
        );
    }

    #[test]
    fn test_empty_input_leaves_no_folder() {
        let (_temp, library) = library();
        let err = library
            .ingest("  \n\n \t ", "blank.txt", &ChunkerOptions::default())
            .unwrap_err();

        assert!(matches!(err, QuizError::EmptyInput));
        assert!(library.list_books().unwrap().is_empty());
    }

    #[test]
    fn test_missing_source_leaves_no_folder() {
        let (temp, library) = library();
        let err = library
            .add_file(&temp.path().join("missing.txt"), &ChunkerOptions::default())
            .unwrap_err();

        assert!(matches!(err, QuizError::UnreadableSource { .. }));
        assert!(library.list_books().unwrap().is_empty());
    }

    #[test]
    fn test_ingest_rejects_non_text_filename() {
        let (_temp, library) = library();
        let err = library
            .ingest("Some text.", "book.epub", &ChunkerOptions::default())
            .unwrap_err();
        assert!(matches!(err, QuizError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_ingest_rejects_filenames_with_paths() {
        let (temp, library) = library();
        let options = ChunkerOptions::default();

        for name in ["../../escaped.txt", "sub/dir/nested.txt", "/tmp/absolute.txt", ".."] {
            let err = library.ingest("Hello there.", name, &options).unwrap_err();
            assert!(matches!(err, QuizError::Validation(_)), "{} accepted", name);
        }

        assert!(library.list_books().unwrap().is_empty());
        assert!(!temp.path().join("escaped.txt").exists());
    }

    #[test]
    fn test_list_chunks_is_numeric() {
        let (_temp, library) = library();
        let book = library
            .ingest(&paragraphs(12, 10), "many.txt", &ChunkerOptions::new(10, 0))
            .unwrap();
        fs::create_dir(book.chunks_dir().join("scratch")).unwrap();

        let indices: Vec<usize> = library
            .list_chunks(&book)
            .unwrap()
            .iter()
            .map(|c| c.index)
            .collect();
        assert_eq!(indices, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_book_info_counts() {
        let (_temp, library) = library();
        let book = library
            .ingest(&paragraphs(4, 10), "info.txt", &ChunkerOptions::new(20, 0))
            .unwrap();
        let chunk = library.chunk(&book, 2).unwrap();
        write_question(&chunk, "Q1").unwrap();
        write_question(&chunk, "Q2").unwrap();

        let info = library.book_info("info").unwrap();
        assert_eq!(info.original_files, vec!["info.txt"]);
        assert_eq!(info.chunk_count, 2);
        assert_eq!(info.question_count, 2);
    }

    #[test]
    fn test_open_book_rejects_unknown_and_traversal() {
        let (_temp, library) = library();
        assert!(matches!(
            library.open_book("nope"),
            Err(QuizError::BookNotFound(_))
        ));
        assert!(library.open_book("../myLibrary").is_err());
        assert!(library.open_book("").is_err());
    }

    #[test]
    fn test_chunk_lookup_out_of_range() {
        let (_temp, library) = library();
        let book = library
            .ingest("Only one.", "one.txt", &ChunkerOptions::default())
            .unwrap();
        assert!(library.chunk(&book, 1).is_ok());
        assert!(matches!(
            library.chunk(&book, 2),
            Err(QuizError::ChunkNotFound { index: 2, .. })
        ));
        assert!(library.chunk(&book, 0).is_err());
    }
}
