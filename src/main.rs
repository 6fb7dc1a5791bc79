// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use chunk_quiz::chunker::paragraph::word_count;
use chunk_quiz::utils::logging::{
    format_error, format_highlight, format_info, format_step, format_success, format_warning,
    init_logger,
};
use chunk_quiz::{
    BookExporter, Config, Library, OpenAiQuestionGenerator, ParsedQuestion, QuestionService,
    Validator, list_questions, locate_quote,
};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "chunk_quiz")]
#[command(version = "0.1.0")]
#[command(about = "Chunk plain-text books and generate comprehension questions per chunk", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// Library root, overriding the configured one
    #[arg(short, long, value_name = "DIR", env = "CHUNK_QUIZ_LIBRARY")]
    library: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a .txt file to the library and chunk it
    Add {
        file: PathBuf,

        /// Words per chunk
        #[arg(long, value_name = "WORDS")]
        chunk_size: Option<usize>,

        /// Words carried over between chunks (at most half the chunk size)
        #[arg(long, value_name = "WORDS")]
        overlap: Option<usize>,
    },

    /// List books in the library
    Books,

    /// Show details about a book
    Info { book: String },

    /// List a book's chunks with word and question counts
    Chunks { book: String },

    /// Generate one new question for a chunk
    Generate { book: String, chunk: usize },

    /// Generate one new question for every chunk of a book
    GenerateAll {
        book: String,

        /// Leave chunks that already have a question alone
        #[arg(long)]
        skip_existing: bool,
    },

    /// Display a chunk with one of its questions
    Show {
        book: String,
        chunk: usize,

        /// Question slot to display (defaults to the first)
        #[arg(short, long, value_name = "SLOT")]
        question: Option<usize>,

        /// Show the answer and highlight the supporting quote
        #[arg(short, long)]
        reveal: bool,
    },

    /// Export a book's chunks and questions as JSON
    Export {
        book: String,

        #[arg(short, long, default_value = "./exports")]
        output: PathBuf,

        #[arg(short, long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.color, cli.verbose);

    let mut config = if cli.config.exists() {
        info!("Loading configuration from: {}", cli.config.display());
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    if let Some(root) = cli.library {
        config.library.root = root;
    }

    let library = Library::new(&config.library).context("Failed to open library")?;

    match cli.command {
        Commands::Add {
            file,
            chunk_size,
            overlap,
        } => cmd_add(&config, &library, file, chunk_size, overlap)?,
        Commands::Books => cmd_books(&library)?,
        Commands::Info { book } => cmd_info(&library, &book)?,
        Commands::Chunks { book } => cmd_chunks(&library, &book)?,
        Commands::Generate { book, chunk } => cmd_generate(&config, &library, &book, chunk).await?,
        Commands::GenerateAll {
            book,
            skip_existing,
        } => cmd_generate_all(&config, &library, &book, skip_existing).await?,
        Commands::Show {
            book,
            chunk,
            question,
            reveal,
        } => cmd_show(&library, &book, chunk, question, reveal)?,
        Commands::Export {
            book,
            output,
            pretty,
        } => cmd_export(&library, &book, output, pretty)?,
    }

    Ok(())
}

fn cmd_add(
    config: &Config,
    library: &Library,
    file: PathBuf,
    chunk_size: Option<usize>,
    overlap: Option<usize>,
) -> Result<()> {
    let mut options = config.chunking.options();
    options.chunk_size = chunk_size.unwrap_or(options.chunk_size);
    options.overlap = overlap.unwrap_or(options.overlap);
    options.validate().context("Invalid chunking parameters")?;

    Validator::validate_source_file(&file)?;

    let start_time = Instant::now();
    let book = library
        .add_file(&file, &options)
        .with_context(|| format!("Failed to add {} to the library", file.display()))?;
    let chunk_count = library.list_chunks(&book)?.len();

    println!(
        "{}",
        format_success(&format!("Added '{}' to the library", book.name))
    );
    println!("  Location: {}", book.path.display());
    println!(
        "  Chunks:   {} ({} words each, {} overlap)",
        chunk_count, options.chunk_size, options.overlap
    );
    info!("Ingestion complete in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(())
}

fn cmd_books(library: &Library) -> Result<()> {
    let books = library.list_books()?;

    if books.is_empty() {
        println!("{}", format_info("No books found in library."));
        println!("  Library location: {}", library.root().display());
        return Ok(());
    }

    for name in books {
        let info = library.book_info(&name)?;
        println!(
            "{}  {} chunks, {} questions",
            name, info.chunk_count, info.question_count
        );
    }

    Ok(())
}

fn cmd_info(library: &Library, book: &str) -> Result<()> {
    let info = library.book_info(book)?;

    println!("{}", info.name);
    println!("  Path:           {}", info.path.display());
    println!("  Original files: {}", info.original_files.join(", "));
    println!("  Chunks:         {}", info.chunk_count);
    println!("  Questions:      {}", info.question_count);

    Ok(())
}

fn cmd_chunks(library: &Library, book: &str) -> Result<()> {
    let book = library.open_book(book)?;
    let chunks = library.list_chunks(&book)?;

    for chunk in &chunks {
        let text = chunk.read_text()?;
        let questions = list_questions(chunk)?.len();
        let preview = Validator::truncate_text(text.trim(), 60);
        println!(
            "{:>4}  {:>5} words  {:>2} questions  {}",
            chunk.index,
            word_count(&text),
            questions,
            preview
        );
    }

    Ok(())
}

async fn cmd_generate(config: &Config, library: &Library, book: &str, index: usize) -> Result<()> {
    let book = library.open_book(book)?;
    let chunk = library.chunk(&book, index)?;

    let generator = OpenAiQuestionGenerator::new(config.generator.clone())
        .context("Failed to create question generator")?;
    let service = QuestionService::new(library, &generator);

    let question = service
        .generate_for_chunk(&chunk)
        .await
        .with_context(|| format!("Failed to generate a question for chunk {}", index))?;

    println!(
        "{}",
        format_success(&format!(
            "Saved question slot {} to {}",
            question.slot,
            question.path.display()
        ))
    );
    println!("\n{}", ParsedQuestion::parse(&question.read()?).question_only());

    Ok(())
}

async fn cmd_generate_all(
    config: &Config,
    library: &Library,
    book: &str,
    skip_existing: bool,
) -> Result<()> {
    let book = library.open_book(book)?;

    let generator = OpenAiQuestionGenerator::new(config.generator.clone())
        .context("Failed to create question generator")?;
    let service = QuestionService::new(library, &generator).with_progress(true);

    let report = service.generate_for_book(&book, skip_existing).await?;

    println!("{}", report.stats.summary());
    for (index, message) in &report.failed {
        println!("{}", format_error(&format!("chunk{}: {}", index, message)));
    }

    Ok(())
}

fn cmd_show(
    library: &Library,
    book: &str,
    index: usize,
    slot: Option<usize>,
    reveal: bool,
) -> Result<()> {
    let book = library.open_book(book)?;
    let total = library.list_chunks(&book)?.len();
    let chunk = library.chunk(&book, index)?;
    let text = chunk.read_text()?;
    let questions = list_questions(&chunk)?;

    println!(
        "{}\n",
        format_step(index, total, &format!("{} / {}", book.name, chunk.label()))
    );

    let selected = match slot {
        Some(slot) => questions.iter().find(|q| q.slot == slot),
        None => questions.first(),
    };

    let Some(handle) = selected else {
        println!("{}\n", text);
        match slot {
            Some(slot) => println!("{}", format_warning(&format!("No question in slot {}", slot))),
            None => println!("{}", format_info("No questions yet for this chunk")),
        }
        return Ok(());
    };

    let parsed = ParsedQuestion::parse(&handle.read()?);

    if reveal {
        let located = parsed.quote().and_then(|quote| locate_quote(&text, quote));
        match located {
            Some(range) => println!("{}\n", format_highlight(&text, range)),
            None => {
                println!("{}\n", text);
                if parsed.quote().is_some() {
                    println!("{}", format_warning("Supporting quote not found in chunk text"));
                }
            }
        }
        println!("{}", parsed.full());
    } else {
        println!("{}\n", text);
        println!("{}", parsed.question_only());
    }

    println!(
        "\n{}",
        format_info(&format!(
            "Question slot {} of {} (slots: {})",
            handle.slot,
            questions.len(),
            questions
                .iter()
                .map(|q| q.slot.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    );

    Ok(())
}

fn cmd_export(library: &Library, book: &str, output: PathBuf, pretty: bool) -> Result<()> {
    let book = library.open_book(book)?;
    let exporter = BookExporter::new(output)?;
    let path = exporter.export_book(library, &book, pretty)?;

    println!(
        "{}",
        format_success(&format!("Exported '{}' to {}", book.name, path.display()))
    );

    Ok(())
}
