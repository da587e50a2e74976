//! Retrieval-augmented question answering

pub mod agent;
pub mod confidence;
pub mod normalize;
pub mod prompt;

pub use agent::{AgentConfig, AgentInfo, AgentState, Answer, LoadSummary, RagAgent};
