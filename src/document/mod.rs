//! Document ingestion: PDF text extraction and chunking

pub mod chunker;
pub mod loader;

pub use chunker::{Chunk, ChunkerConfig, TextChunker};
pub use loader::{extract_pages, PageText};
