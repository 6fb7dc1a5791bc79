// file: src/generator/openai.rs
// description: OpenAI-compatible chat completions client for question generation
// reference: https://platform.openai.com/docs/api-reference/chat

use crate::config::GeneratorConfig;
use crate::error::{QuizError, Result};
use crate::generator::{QuestionGenerator, QuestionRequest, build_prompt};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

pub struct OpenAiQuestionGenerator {
    client: Client,
    api_key: String,
    endpoint: String,
    config: GeneratorConfig,
}

impl OpenAiQuestionGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            QuizError::Config(
                "no API key configured (set generator.api_key or OPENAI_API_KEY)".to_string(),
            )
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| QuizError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));

        Ok(Self {
            client,
            api_key,
            endpoint,
            config,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }
}

fn extract_content(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| QuizError::Generation("response contained no question text".to_string()))
}

#[async_trait]
impl QuestionGenerator for OpenAiQuestionGenerator {
    async fn generate(&self, request: &QuestionRequest) -> Result<String> {
        let prompt = build_prompt(request);
        let body = self.request_body(&prompt);

        debug!(
            "Requesting question for {} from {} ({} existing, {} prompt chars)",
            request.chunk_label,
            self.config.model,
            request.existing.len(),
            prompt.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| QuizError::Generation(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(QuizError::Generation(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| QuizError::Generation(format!("Failed to parse API response: {}", e)))?;

        extract_content(parsed)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}
