//! Text embedding: capability trait plus the local MiniLM implementation

pub mod minilm;
pub mod provider;

pub use minilm::MiniLmEmbedder;
pub use provider::EmbeddingProvider;
