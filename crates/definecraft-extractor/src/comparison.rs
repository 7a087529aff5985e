//! Field extraction for word comparisons

use crate::types::{ExtractionWarning, ParseOutcome};
use definecraft_domain::ComparisonRecord;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Literal line the model puts between the summary and the details
pub const DETAILS_SEPARATOR: &str = "---DETAILS---";

static SUMMARY_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[*\s]*key\s+difference\s*:?[*\s]*").unwrap());

/// Split a comparison response into summary and details
///
/// Exactly one separator is expected. Anything else keeps the whole response
/// as details behind the fixed notice and raises `UnexpectedFormat`.
pub fn parse_comparison(response: &str) -> ParseOutcome<ComparisonRecord> {
    let parts: Vec<&str> = response.split(DETAILS_SEPARATOR).collect();

    if let [summary, details] = parts.as_slice() {
        let summary = SUMMARY_LABEL.replace(summary.trim(), "");
        let summary = summary.trim();
        if !summary.is_empty() {
            debug!("Comparison summary: {} chars", summary.len());
            return ParseOutcome::clean(ComparisonRecord::new(summary, details.trim()));
        }
    }

    let found = parts.len() - 1;
    warn!("Expected one {} separator, found {}", DETAILS_SEPARATOR, found);
    ParseOutcome::clean(ComparisonRecord::unsummarized(response.trim())).with_warning(
        ExtractionWarning::UnexpectedFormat(format!(
            "expected one {} separator with a summary before it, found {}",
            DETAILS_SEPARATOR, found
        )),
    )
}
