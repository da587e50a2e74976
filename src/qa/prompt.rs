//! Generation prompt construction
//!
//! Wraps the question in an instruction that pins the model to the supplied
//! document context and requires it to say so when the context lacks the
//! answer.

/// Build the generation prompt for a question
pub fn build_prompt(question: &str) -> String {
    format!(
        "Based on the provided document context, please answer the following question \
         accurately and concisely.\n\
         If the information is not available in the context, please state that clearly.\n\n\
         Question: {}\n\n\
         Please provide a clear, factual answer based only on the information available \
         in the document.",
        question
    )
}
