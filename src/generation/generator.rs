//! Generation capability contract
//!
//! The orchestrator consumes the generative model through this trait. A
//! failing `generate` call is converted into a degraded answer at the
//! orchestrator boundary; it must never abort a question or a batch run.

use async_trait::async_trait;

use crate::errors::Result;

/// Produces free text from a prompt and retrieved context
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Generate a completion for the prompt, conditioned on the context
    /// chunks
    ///
    /// How the context is rendered into the model input is up to the
    /// implementation.
    async fn generate(&self, prompt: &str, context: &[String]) -> Result<String>;

    /// Identifier of the underlying model
    fn model_id(&self) -> &str;
}
