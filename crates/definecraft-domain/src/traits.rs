//! Trait definitions for external interactions
//!
//! These traits define the boundary between the parsing core and the
//! text-completion service. Implementations live in other crates.

/// Trait for text-completion providers
///
/// One prompt in, one text blob out. Implemented by the infrastructure layer
/// (definecraft-llm).
pub trait CompletionProvider {
    /// Error type for completion calls
    type Error;

    /// Generate a completion for the prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Name of the model behind this provider, for logging
    fn model_name(&self) -> &str {
        "llm"
    }
}
