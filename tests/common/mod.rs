//! Shared test doubles for integration tests
//!
//! Deterministic stand-ins for the embedding and generation capabilities so
//! the full pipeline can be exercised without model downloads or a running
//! Ollama server.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use pdfqa::embedding::EmbeddingProvider;
use pdfqa::errors::{RagError, Result};
use pdfqa::generation::AnswerGenerator;

/// Deterministic embedder: hashed bag-of-words features
pub struct StubEmbedder;

impl EmbeddingProvider for StubEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; 32];
        for word in text.to_lowercase().split_whitespace() {
            let bucket = word
                .bytes()
                .fold(0usize, |acc, b| (acc * 31 + b as usize) % 32);
            vector[bucket] += 1.0;
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        32
    }

    fn model_id(&self) -> &str {
        "stub-embedder"
    }
}

/// Generator that always returns the same reply, counting invocations
pub struct ScriptedGenerator {
    reply: String,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnswerGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str, _context: &[String]) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }

    fn model_id(&self) -> &str {
        "scripted-generator"
    }
}

/// Generator that always fails, counting invocations
pub struct FailingGenerator {
    calls: AtomicUsize,
}

impl FailingGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnswerGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _context: &[String]) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RagError::Generation("service unavailable".to_string()))
    }

    fn model_id(&self) -> &str {
        "failing-generator"
    }
}
