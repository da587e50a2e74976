//! Retrieval-augmented QA orchestrator
//!
//! `RagAgent` owns the currently loaded document and its vector index, and
//! drives the full pipeline: page extraction, chunking, embedding and
//! indexing on load; retrieval, prompt construction, generation, confidence
//! scoring and cleanup on each question.
//!
//! The agent is caller-owned with an explicit lifecycle; callers needing
//! concurrent access serialize it themselves. Loading is all-or-nothing: a
//! failed load leaves the previously indexed document untouched.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::document::chunker::{ChunkerConfig, TextChunker};
use crate::document::loader::{extract_pages, PageText};
use crate::embedding::EmbeddingProvider;
use crate::errors::{RagError, Result};
use crate::generation::AnswerGenerator;
use crate::index::{EmbeddedChunk, VectorIndex};
use crate::qa::{confidence, normalize, prompt};

/// Number of chunks retrieved per question
pub const DEFAULT_TOP_K: usize = 3;

/// Length of each source excerpt returned with an answer
const SOURCE_EXCERPT_CHARS: usize = 200;

/// At most this many source excerpts accompany an answer
const MAX_SOURCES: usize = 2;

/// Orchestrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Chunking parameters used at load time
    pub chunker: ChunkerConfig,
    /// Number of chunks retrieved per question
    pub top_k: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            chunker: ChunkerConfig::default(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Lifecycle state of the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Unloaded,
    Loaded,
}

/// Answer to a single question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Cleaned generated text
    pub answer: String,
    /// Lexical-overlap confidence in [0, 1]
    pub confidence: f64,
    /// Number of chunks retrieved for this answer
    pub source_count: usize,
    /// Truncated excerpts of the top source chunks
    pub sources: Vec<String>,
}

/// Summary of a successful document load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSummary {
    pub source: String,
    pub pages: usize,
    pub chunks: usize,
}

/// Metadata about the agent and its index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_overlap: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_model: Option<String>,
}

struct LoadedDocument {
    source: String,
    index: VectorIndex,
}

/// Retrieval-augmented QA orchestrator over a single document
pub struct RagAgent {
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn AnswerGenerator>,
    chunker: TextChunker,
    top_k: usize,
    loaded: Option<LoadedDocument>,
}

impl RagAgent {
    /// Create an agent with default configuration
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, generator: Arc<dyn AnswerGenerator>) -> Self {
        Self::with_config(embedder, generator, AgentConfig::default())
    }

    /// Create an agent with custom configuration
    pub fn with_config(
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn AnswerGenerator>,
        config: AgentConfig,
    ) -> Self {
        Self {
            embedder,
            generator,
            chunker: TextChunker::with_config(config.chunker),
            top_k: config.top_k,
            loaded: None,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> AgentState {
        if self.loaded.is_some() {
            AgentState::Loaded
        } else {
            AgentState::Unloaded
        }
    }

    /// Source identity of the loaded document, if any
    pub fn source(&self) -> Option<&str> {
        self.loaded.as_ref().map(|doc| doc.source.as_str())
    }

    /// Load a PDF document, replacing any previously loaded one
    pub fn load_document(&mut self, path: &Path) -> Result<LoadSummary> {
        let pages = extract_pages(path)?;
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.load_pages(&source, &pages)
    }

    /// Load a document from already-extracted page text
    ///
    /// This is the ingestion boundary proper: any readable source that
    /// yields ordered page text can be indexed through it.
    pub fn load_pages(&mut self, source: &str, pages: &[PageText]) -> Result<LoadSummary> {
        let chunks = self.chunker.split(pages).map_err(|e| match e {
            RagError::EmptyInput => {
                RagError::DocumentRead(format!("no extractable text in document: {}", source))
            }
            other => other,
        })?;
        info!(source, pages = pages.len(), chunks = chunks.len(), "document split");

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts)?;
        if embeddings.len() != chunks.len() {
            return Err(RagError::Embedding(format!(
                "provider returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        // The new index is built completely before the old one is replaced,
        // so a failure above never leaves a partial index installed.
        let entries: Vec<EmbeddedChunk> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| EmbeddedChunk { chunk, embedding })
            .collect();
        let index = VectorIndex::new(entries);

        let summary = LoadSummary {
            source: source.to_string(),
            pages: pages.len(),
            chunks: index.len(),
        };
        self.loaded = Some(LoadedDocument {
            source: source.to_string(),
            index,
        });
        info!(source, chunks = summary.chunks, "vector index ready");

        Ok(summary)
    }

    /// Answer a question from the loaded document
    ///
    /// Errors only for lifecycle misuse (`NoDocumentLoaded`) or a blank
    /// question (`InvalidQuestion`). Embedding or generation failures while
    /// answering degrade to a zero-confidence answer instead of erroring,
    /// so one bad question can never abort a batch.
    pub async fn answer_question(&self, question: &str) -> Result<Answer> {
        let loaded = self.loaded.as_ref().ok_or(RagError::NoDocumentLoaded)?;

        let question = question.trim();
        if question.is_empty() {
            return Err(RagError::InvalidQuestion);
        }

        info!(chars = question.len(), "answering question");

        let query = match self.embedder.embed(question) {
            Ok(vector) => vector,
            Err(e) => {
                warn!(error = %e, "query embedding failed");
                return Ok(degraded_answer(&e));
            }
        };

        let hits = loaded.index.search(&query, self.top_k);
        let context: Vec<String> = hits.iter().map(|hit| hit.chunk.text.clone()).collect();
        let prompt_text = prompt::build_prompt(question);

        let raw = match self.generator.generate(&prompt_text, &context).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "generation failed, returning degraded answer");
                return Ok(degraded_answer(&e));
            }
        };

        let confidence = confidence::estimate(question, &hits);
        let sources = hits
            .iter()
            .take(MAX_SOURCES)
            .map(|hit| excerpt(&hit.chunk.text))
            .collect();

        Ok(Answer {
            answer: normalize::clean_answer(&raw),
            confidence,
            source_count: hits.len(),
            sources,
        })
    }

    /// Metadata about the current state and index
    pub fn info(&self) -> AgentInfo {
        match &self.loaded {
            Some(_) => AgentInfo {
                status: "Document loaded".to_string(),
                embedding_model: Some(self.embedder.model_id().to_string()),
                chunk_size: Some(self.chunker.config().chunk_size),
                chunk_overlap: Some(self.chunker.config().chunk_overlap),
                index_type: Some("in-memory cosine".to_string()),
                generation_model: Some(self.generator.model_id().to_string()),
            },
            None => AgentInfo {
                status: "No document loaded".to_string(),
                embedding_model: None,
                chunk_size: None,
                chunk_overlap: None,
                index_type: None,
                generation_model: None,
            },
        }
    }

    /// Discard the loaded document and its index
    pub fn unload(&mut self) {
        if self.loaded.take().is_some() {
            info!("document unloaded");
        }
    }
}

fn degraded_answer(reason: &RagError) -> Answer {
    Answer {
        answer: format!(
            "I encountered an error while processing your question: {}",
            reason
        ),
        confidence: 0.0,
        source_count: 0,
        sources: Vec::new(),
    }
}

fn excerpt(text: &str) -> String {
    let head: String = text.chars().take(SOURCE_EXCERPT_CHARS).collect();
    format!("{}...", head)
}
