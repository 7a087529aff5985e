//! Result types shared by the tools

use crate::align::Alignment;
use definecraft_domain::{DefinitionRecord, EtymologyRecord, RequestId, TimelineEntry};
use serde::Deserialize;
use std::fmt;

/// A definition record together with how its block was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDefinition {
    /// The extracted record
    pub record: DefinitionRecord,

    /// Term the block was aligned to (may differ from `record.word`)
    pub term: String,

    /// How the block was picked for `term`
    pub alignment: Alignment,
}

/// Soft failure attached to a successful result
///
/// The raw response is always kept alongside so the user can inspect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionWarning {
    /// The response had text but nothing could be extracted from it
    NoRecordsExtracted,

    /// The response did not follow the requested layout; a fallback was used
    UnexpectedFormat(String),

    /// Blocks were matched to these terms without a content match
    AmbiguousAlignment {
        /// Affected terms, in request order
        terms: Vec<String>,
    },
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionWarning::NoRecordsExtracted => {
                f.write_str("Parsing failed, but a response was received")
            }
            ExtractionWarning::UnexpectedFormat(what) => {
                write!(f, "Unexpected response format: {}", what)
            }
            ExtractionWarning::AmbiguousAlignment { terms } => {
                write!(f, "Matched by position, may be misassigned: {}", terms.join(", "))
            }
        }
    }
}

/// Output of a tool's parser plus any warnings it raised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome<O> {
    /// Parsed output
    pub output: O,

    /// Soft failures raised while parsing
    pub warnings: Vec<ExtractionWarning>,
}

impl<O> ParseOutcome<O> {
    /// An outcome without warnings
    pub fn clean(output: O) -> Self {
        Self {
            output,
            warnings: Vec::new(),
        }
    }

    /// Attach a warning
    pub fn with_warning(mut self, warning: ExtractionWarning) -> Self {
        self.warnings.push(warning);
        self
    }
}

/// Result of one completed request or import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult<O> {
    /// Request that produced this result; `None` for imports
    pub request_id: Option<RequestId>,

    /// Parsed output
    pub output: O,

    /// Number of records in `output`
    pub record_count: usize,

    /// Soft failures
    pub warnings: Vec<ExtractionWarning>,

    /// Response text as received; empty for imports
    pub raw_response: String,
}

impl<O> ToolResult<O> {
    /// Whether any warning was raised
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether the result carries the zero-records warning
    pub fn is_empty_extraction(&self) -> bool {
        self.warnings.contains(&ExtractionWarning::NoRecordsExtracted)
    }
}

/// Etymology object as the model returns it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EtymologyCandidate {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub language_of_origin: String,
    #[serde(default)]
    pub root_word: String,
    #[serde(default)]
    pub first_known_use: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub timeline: Vec<TimelineCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TimelineCandidate {
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub change: String,
}

impl From<EtymologyCandidate> for EtymologyRecord {
    fn from(candidate: EtymologyCandidate) -> Self {
        EtymologyRecord {
            word: candidate.word.trim().to_string(),
            language_of_origin: candidate.language_of_origin,
            root_word: candidate.root_word,
            first_known_use: candidate.first_known_use,
            explanation: candidate.explanation,
            timeline: candidate
                .timeline
                .into_iter()
                .map(|entry| TimelineEntry {
                    period: entry.period,
                    change: entry.change,
                })
                .collect(),
        }
    }
}
