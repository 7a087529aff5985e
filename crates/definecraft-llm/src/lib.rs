//! DefineCraft Completion Provider Layer
//!
//! Provider implementations of the `CompletionProvider` trait from
//! `definecraft-domain`, plus the error taxonomy for upstream failures.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//!
//! The network client for the hosted model is supplied by the embedding
//! application; it only has to implement `CompletionProvider`.
//!
//! # Examples
//!
//! ```
//! use definecraft_llm::MockProvider;
//! use definecraft_domain::traits::CompletionProvider;
//!
//! let provider = MockProvider::new("happy | adjective");
//! let result = provider.generate("Define these words: happy").unwrap();
//! assert_eq!(result, "happy | adjective");
//! ```

#![warn(missing_docs)]

use definecraft_domain::traits::CompletionProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Errors that can occur during completion calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// The credential was rejected by the service
    #[error("Invalid API key: {0}")]
    InvalidCredential(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Classify a raw error message from a provider SDK
    ///
    /// # Examples
    ///
    /// ```
    /// use definecraft_llm::LlmError;
    ///
    /// let err = LlmError::classify("[400] API_KEY_INVALID: key expired");
    /// assert!(matches!(err, LlmError::InvalidCredential(_)));
    /// ```
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();

        if message.contains("API_KEY_INVALID") || lower.contains("api key not valid") {
            LlmError::InvalidCredential(message)
        } else if lower.contains("429") || lower.contains("rate limit") || lower.contains("quota") {
            LlmError::RateLimitExceeded
        } else if lower.contains("model") && lower.contains("not found") {
            LlmError::ModelNotAvailable(message)
        } else if lower.contains("network") || lower.contains("fetch") || lower.contains("timed out") {
            LlmError::Communication(message)
        } else {
            LlmError::Other(message)
        }
    }
}

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
///
/// # Examples
///
/// ```
/// use definecraft_llm::MockProvider;
/// use definecraft_domain::traits::CompletionProvider;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("any prompt").unwrap(), "Fixed response");
///
/// // Prompt-specific responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_response("prompt2", "response2");
/// assert_eq!(provider.generate("prompt1").unwrap(), "response1");
/// assert_eq!(provider.generate("prompt2").unwrap(), "response2");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Result<String, LlmError>,
    responses: Arc<Mutex<HashMap<String, Result<String, LlmError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    model_name: String,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Ok(response.into()),
            responses: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            model_name: "mock".to_string(),
        }
    }

    /// Create a MockProvider that fails every call with the given error
    pub fn failing(error: LlmError) -> Self {
        Self {
            default_response: Err(error),
            ..Self::new("")
        }
    }

    /// Set the model name reported to the caller
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(prompt.into(), Ok(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>, error: LlmError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(prompt.into(), Err(error));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Reset the recorded prompts
    pub fn reset_call_count(&self) {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl CompletionProvider for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        let responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        match responses.get(prompt) {
            Some(response) => response.clone(),
            None => self.default_response.clone(),
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
