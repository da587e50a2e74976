//! In-memory vector index with cosine similarity search

pub mod vector;

pub use vector::{EmbeddedChunk, SearchHit, VectorIndex};
