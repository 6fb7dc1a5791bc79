// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::chunker::ChunkerOptions;
use crate::error::{QuizError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_OVERLAP: usize = 100;
pub const DEFAULT_LONG_PARAGRAPH_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub library: LibraryConfig,
    pub chunking: ChunkingConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    pub root: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub overlap: usize,
    #[serde(default = "default_long_paragraph_factor")]
    pub long_paragraph_factor: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_long_paragraph_factor() -> f64 {
    DEFAULT_LONG_PARAGRAPH_FACTOR
}

fn default_system_prompt() -> String {
    "You are a helpful assistant that writes clear multiple-choice comprehension questions."
        .to_string()
}

impl ChunkingConfig {
    pub fn options(&self) -> ChunkerOptions {
        ChunkerOptions {
            chunk_size: self.chunk_size,
            overlap: self.overlap,
            long_paragraph_factor: self.long_paragraph_factor,
        }
    }
}

impl GeneratorConfig {
    /// Resolves the API key, falling back to `OPENAI_API_KEY`.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = Self::default_config();
        let mut builder = config::Config::builder()
            .set_default("library.root", defaults.library.root.display().to_string())
            .and_then(|b| b.set_default("chunking.chunk_size", DEFAULT_CHUNK_SIZE as u64))
            .and_then(|b| b.set_default("chunking.overlap", DEFAULT_OVERLAP as u64))
            .and_then(|b| b.set_default("generator.base_url", defaults.generator.base_url))
            .and_then(|b| b.set_default("generator.model", defaults.generator.model))
            .and_then(|b| {
                b.set_default(
                    "generator.temperature",
                    f64::from(defaults.generator.temperature),
                )
            })
            .and_then(|b| {
                b.set_default(
                    "generator.max_tokens",
                    u64::from(defaults.generator.max_tokens),
                )
            })
            .and_then(|b| b.set_default("generator.timeout_secs", defaults.generator.timeout_secs))
            .map_err(|e| QuizError::Config(e.to_string()))?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(
                config::File::from(Path::new("config/default.toml")).required(false),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CHUNK_QUIZ")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| QuizError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| QuizError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            library: LibraryConfig {
                root: PathBuf::from("myLibrary"),
            },
            chunking: ChunkingConfig {
                chunk_size: DEFAULT_CHUNK_SIZE,
                overlap: DEFAULT_OVERLAP,
                long_paragraph_factor: DEFAULT_LONG_PARAGRAPH_FACTOR,
            },
            generator: GeneratorConfig {
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                api_key: None,
                temperature: 0.7,
                max_tokens: 800,
                timeout_secs: 60,
                system_prompt: default_system_prompt(),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.chunking
            .options()
            .validate()
            .map_err(|e| QuizError::Config(e.to_string()))?;

        if self.generator.timeout_secs == 0 {
            return Err(QuizError::Config(
                "generator.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !self.generator.base_url.starts_with("http://")
            && !self.generator.base_url.starts_with("https://")
        {
            return Err(QuizError::Config(format!(
                "generator.base_url must be an http(s) URL: {}",
                self.generator.base_url
            )));
        }

        Ok(())
    }
}
