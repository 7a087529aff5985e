//! Parse etymology responses
//!
//! The model is asked for one JSON object. It sometimes wraps it in a markdown
//! code block or adds a sentence around it, so the object is located first.

use crate::error::ExtractorError;
use crate::types::{EtymologyCandidate, ExtractionWarning, ParseOutcome};
use definecraft_domain::EtymologyRecord;
use tracing::warn;

/// Parse an etymology response, failing on malformed JSON
pub fn parse_etymology_json(response: &str) -> Result<EtymologyRecord, ExtractorError> {
    let json_str = extract_json(response)?;
    let candidate: EtymologyCandidate = serde_json::from_str(json_str)?;
    Ok(candidate.into())
}

/// Parse an etymology response, degrading to a warning
///
/// An empty `word` in the object is replaced by `expected_word`.
pub fn parse_etymology(response: &str, expected_word: &str) -> ParseOutcome<Option<EtymologyRecord>> {
    match parse_etymology_json(response) {
        Ok(mut record) => {
            if record.word.is_empty() {
                record.word = expected_word.to_string();
            }
            ParseOutcome::clean(Some(record))
        }
        Err(e) => {
            warn!("Etymology response was not in the expected format: {}", e);
            ParseOutcome::clean(None).with_warning(ExtractionWarning::UnexpectedFormat(e.to_string()))
        }
    }
}

/// Extract the JSON object from a response, handling markdown code blocks
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();

    let body = if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::JsonParse("Empty code block".to_string()));
        }
        // Skip the opening fence line, keep everything up to the closing fence
        let start = trimmed.find('\n').map_or(trimmed.len(), |i| i + 1);
        let end = trimmed.rfind("```").filter(|&i| i >= start).unwrap_or(trimmed.len());
        trimmed[start..end].trim()
    } else {
        trimmed
    };

    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&body[start..=end]),
        _ => Err(ExtractorError::JsonParse("No JSON object found".to_string())),
    }
}
