//! Answer generation: capability trait plus the Ollama implementation

pub mod generator;
pub mod ollama;

pub use generator::AnswerGenerator;
pub use ollama::OllamaGenerator;
