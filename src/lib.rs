//! pdfqa - Document question answering over local Ollama models
//!
//! Ingests a PDF into an in-memory vector index and answers natural-language
//! questions from its content. A batch mode scores generated answers against
//! expected reference answers.
//!
//! # Architecture
//!
//! - `document`: PDF page extraction and overlapping chunking
//! - `embedding` / `generation`: pluggable model capabilities (MiniLM via
//!   Candle, Ollama over HTTP) behind trait seams
//! - `index`: in-memory cosine-similarity vector index
//! - `qa`: the retrieval-augmented orchestrator plus confidence estimation
//!   and answer cleanup
//! - `scoring`: answer-quality scoring and the batch workflow

pub mod config;
pub mod errors;

pub mod document;
pub mod embedding;
pub mod generation;
pub mod index;
pub mod qa;
pub mod scoring;

pub mod cli;

// Re-export commonly used types
pub use errors::{RagError, Result};
pub use qa::{Answer, RagAgent};
