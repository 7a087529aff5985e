//! Error types for the Extractor

use definecraft_domain::RequestId;
use definecraft_llm::LlmError;
use thiserror::Error;

/// Errors that abort a whole operation
///
/// Field- and record-level problems never surface here; they degrade to
/// placeholders or to an [`ExtractionWarning`](crate::ExtractionWarning).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// Too few (or too many) input terms for the tool
    #[error("Validation error: {0}")]
    Validation(String),

    /// Raw input exceeds the configured maximum length
    #[error("Input too long: {0} chars (max: {1})")]
    InputTooLong(usize, usize),

    /// The completion service call failed; message passed through verbatim
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The completion service answered with nothing
    #[error("Received an empty response from the completion service")]
    EmptyResponse,

    /// Completion call timeout
    #[error("Completion timeout")]
    Timeout,

    /// Import file failed the header check or held no usable entries
    #[error("Invalid file format: {0}")]
    Format(String),

    /// Response belongs to a request that is no longer the latest
    #[error("Stale response for {0}")]
    StaleResponse(RequestId),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

impl From<LlmError> for ExtractorError {
    fn from(e: LlmError) -> Self {
        ExtractorError::Upstream(e.to_string())
    }
}
