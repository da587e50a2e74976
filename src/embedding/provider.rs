//! Embedding capability contract
//!
//! The core consumes embeddings through this trait so retrieval can be
//! exercised with deterministic stub providers in tests, independent of any
//! model backend. Implementations must be deterministic for identical text
//! and produce vectors of a fixed dimensionality.

use crate::errors::Result;

/// Maps text to fixed-dimensionality vectors
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed multiple texts
    ///
    /// The default maps `embed` over the slice; backends with real batch
    /// support should override this.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    /// Vector dimensionality of this provider
    fn dimension(&self) -> usize;

    /// Identifier of the underlying model
    fn model_id(&self) -> &str;
}
