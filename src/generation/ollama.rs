//! Ollama API generation client
//!
//! Single request/response calls against POST /api/generate. Token
//! streaming is deliberately not used; answers are returned whole.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::errors::{RagError, Result};
use crate::generation::generator::AnswerGenerator;

/// Default Ollama API endpoint
pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default generation model
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Low temperature keeps answers anchored to the retrieved context
const TEMPERATURE: f64 = 0.1;

/// Request timeout; generation on CPU-bound hosts can be slow
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Ollama generation client
#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    /// Create a client with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_OLLAMA_URL, DEFAULT_MODEL)
    }

    /// Create a client with custom endpoint and model
    pub fn with_config(base_url: &str, model: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(RagError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            model: model.to_string(),
        })
    }

    /// Check if the Ollama server is reachable
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/api/version", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Get the configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl AnswerGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str, context: &[String]) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let input = render_input(prompt, context);

        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: input,
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
            },
        };

        debug!(
            model = %self.model,
            context_chunks = context.len(),
            prompt_chars = request.prompt.len(),
            "sending generate request"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RagError::Generation(format!("failed to reach Ollama: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(RagError::Generation(format!("HTTP {}: {}", status, body)));
        }

        let completion: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RagError::Generation(format!("failed to parse response: {}", e)))?;

        Ok(completion.response)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Render the model input: numbered context sources above the prompt
fn render_input(prompt: &str, context: &[String]) -> String {
    if context.is_empty() {
        return prompt.to_string();
    }

    let sections: Vec<String> = context
        .iter()
        .enumerate()
        .map(|(i, text)| format!("[Source {}]\n{}", i + 1, text.trim()))
        .collect();

    format!("Context:\n\n{}\n\n{}", sections.join("\n\n"), prompt)
}

/// Ollama generate request body
#[derive(Debug, Clone, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Clone, Serialize)]
struct GenerateOptions {
    temperature: f64,
}

/// Ollama generate response body (non-streaming)
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}
