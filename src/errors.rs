//! Error types for the pdfqa core
//!
//! Structural failures (document read, schema validation, missing document
//! state) are fatal and surface to the caller; generation failures are
//! isolated at the generator boundary and degraded instead of propagated.

use thiserror::Error;

/// Main error type for the RAG question-answering core
#[derive(Error, Debug)]
pub enum RagError {
    /// Document source missing, unreadable, or with no extractable text
    #[error("Failed to read document: {0}")]
    DocumentRead(String),

    /// Chunker received no text to split
    #[error("No text to split into chunks")]
    EmptyInput,

    /// A question arrived before any document was loaded
    #[error("No document loaded. Please load a document first.")]
    NoDocumentLoaded,

    /// Blank or whitespace-only question
    #[error("Question must not be empty")]
    InvalidQuestion,

    /// Answer generator call failed (timeout, quota, service error)
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Embedding provider failure
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// Batch question/answer files failed schema validation
    #[error("Malformed batch input: {0}")]
    MalformedBatchInput(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, RagError>;

impl From<candle_core::Error> for RagError {
    fn from(err: candle_core::Error) -> Self {
        RagError::Embedding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_read_display() {
        let err = RagError::DocumentRead("missing.pdf".to_string());
        assert!(err.to_string().contains("missing.pdf"));
    }

    #[test]
    fn test_no_document_loaded_display() {
        let err = RagError::NoDocumentLoaded;
        assert!(err.to_string().contains("No document loaded"));
    }

    #[test]
    fn test_malformed_batch_input_display() {
        let err = RagError::MalformedBatchInput("missing 'question' key".to_string());
        assert!(err.to_string().contains("question"));
    }
}
