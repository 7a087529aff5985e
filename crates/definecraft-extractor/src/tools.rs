//! The four word tools behind one trait

use crate::align::Alignment;
use crate::comparison::parse_comparison;
use crate::config::EnglishLevel;
use crate::definition::extract_definitions;
use crate::error::ExtractorError;
use crate::etymology::parse_etymology;
use crate::export::{export_comparison, export_definitions, export_synonyms};
use crate::import::{import_comparison, import_definitions, import_synonyms};
use crate::prompt::PromptBuilder;
use crate::synonym::parse_synonyms;
use crate::types::{ExtractionWarning, ParseOutcome};
use chrono::{DateTime, Utc};
use definecraft_domain::{ComparisonRecord, DefinitionRecord, EtymologyRecord, SynonymSection};
use std::fmt;
use tracing::{debug, warn};

/// Which tool a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Word definitions
    Define,
    /// Comparison of two or more words
    Compare,
    /// Synonym analysis per word
    Synonyms,
    /// History of a single word
    Etymology,
}

impl ToolKind {
    /// Short name used in logs and messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Define => "define",
            ToolKind::Compare => "compare",
            ToolKind::Synonyms => "synonyms",
            ToolKind::Etymology => "etymology",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tool turns a term list into a prompt and a response into records
///
/// `parse` never fails: malformed responses degrade to fallbacks and
/// warnings.
pub trait Tool {
    /// What one response parses into
    type Output: Clone + fmt::Debug;

    /// Which tool this is
    fn kind(&self) -> ToolKind;

    /// Fewest terms a request needs
    fn min_terms(&self) -> usize {
        1
    }

    /// Most terms a request may carry, if limited
    fn max_terms(&self) -> Option<usize> {
        None
    }

    /// Build the completion prompt
    fn build_prompt(&self, terms: &[String], level: EnglishLevel) -> String;

    /// Parse a non-empty response
    fn parse(&self, response: &str, terms: &[String]) -> ParseOutcome<Self::Output>;

    /// Number of records in an output
    fn record_count(&self, output: &Self::Output) -> usize;
}

/// A tool whose output can be written to a file and read back
pub trait RoundTrip: Tool {
    /// Render the output as export text
    fn export(&self, output: &Self::Output, generated_at: &DateTime<Utc>) -> String;

    /// Read export text back into an output
    fn import(&self, text: &str) -> Result<Self::Output, ExtractorError>;
}

/// Definitions for a list of words
#[derive(Debug, Clone, Copy, Default)]
pub struct DefineTool;

impl Tool for DefineTool {
    type Output = Vec<DefinitionRecord>;

    fn kind(&self) -> ToolKind {
        ToolKind::Define
    }

    fn build_prompt(&self, terms: &[String], level: EnglishLevel) -> String {
        PromptBuilder::new(terms).with_level(level).definitions()
    }

    fn parse(&self, response: &str, terms: &[String]) -> ParseOutcome<Self::Output> {
        let extracted = extract_definitions(response, terms);

        let ambiguous: Vec<String> = extracted
            .iter()
            .filter(|e| !e.alignment.is_confident())
            .map(|e| e.term.clone())
            .collect();
        let unmatched = terms.len().saturating_sub(extracted.len());
        if unmatched > 0 {
            warn!("{} of {} terms got no block", unmatched, terms.len());
        }
        debug!(
            "Extracted {} definitions ({} content-matched)",
            extracted.len(),
            extracted
                .iter()
                .filter(|e| e.alignment == Alignment::Content)
                .count()
        );

        let outcome = ParseOutcome::clean(extracted.into_iter().map(|e| e.record).collect());
        if ambiguous.is_empty() {
            outcome
        } else {
            outcome.with_warning(ExtractionWarning::AmbiguousAlignment { terms: ambiguous })
        }
    }

    fn record_count(&self, output: &Self::Output) -> usize {
        output.len()
    }
}

impl RoundTrip for DefineTool {
    fn export(&self, output: &Self::Output, generated_at: &DateTime<Utc>) -> String {
        export_definitions(output, generated_at)
    }

    fn import(&self, text: &str) -> Result<Self::Output, ExtractorError> {
        import_definitions(text)
    }
}

/// Comparison of two or more words
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareTool;

impl Tool for CompareTool {
    type Output = ComparisonRecord;

    fn kind(&self) -> ToolKind {
        ToolKind::Compare
    }

    fn min_terms(&self) -> usize {
        2
    }

    fn build_prompt(&self, terms: &[String], level: EnglishLevel) -> String {
        PromptBuilder::new(terms).with_level(level).comparison()
    }

    fn parse(&self, response: &str, _terms: &[String]) -> ParseOutcome<Self::Output> {
        parse_comparison(response)
    }

    fn record_count(&self, output: &Self::Output) -> usize {
        usize::from(!(output.is_unsummarized() && output.details.trim().is_empty()))
    }
}

impl RoundTrip for CompareTool {
    fn export(&self, output: &Self::Output, _generated_at: &DateTime<Utc>) -> String {
        export_comparison(output)
    }

    fn import(&self, text: &str) -> Result<Self::Output, ExtractorError> {
        import_comparison(text)
    }
}

/// Synonym analysis, one markdown section per word
#[derive(Debug, Clone, Copy, Default)]
pub struct SynonymTool;

impl Tool for SynonymTool {
    type Output = Vec<SynonymSection>;

    fn kind(&self) -> ToolKind {
        ToolKind::Synonyms
    }

    fn build_prompt(&self, terms: &[String], level: EnglishLevel) -> String {
        PromptBuilder::new(terms).with_level(level).synonyms()
    }

    fn parse(&self, response: &str, terms: &[String]) -> ParseOutcome<Self::Output> {
        let outcome = parse_synonyms(response);
        if outcome.output.len() != terms.len() {
            debug!(
                "Got {} synonym sections for {} terms",
                outcome.output.len(),
                terms.len()
            );
        }
        outcome
    }

    fn record_count(&self, output: &Self::Output) -> usize {
        output.len()
    }
}

impl RoundTrip for SynonymTool {
    fn export(&self, output: &Self::Output, _generated_at: &DateTime<Utc>) -> String {
        export_synonyms(output)
    }

    fn import(&self, text: &str) -> Result<Self::Output, ExtractorError> {
        import_synonyms(text)
    }
}

/// History of a single word
#[derive(Debug, Clone, Copy, Default)]
pub struct EtymologyTool;

impl Tool for EtymologyTool {
    type Output = Option<EtymologyRecord>;

    fn kind(&self) -> ToolKind {
        ToolKind::Etymology
    }

    fn max_terms(&self) -> Option<usize> {
        Some(1)
    }

    fn build_prompt(&self, terms: &[String], _level: EnglishLevel) -> String {
        PromptBuilder::new(terms).etymology()
    }

    fn parse(&self, response: &str, terms: &[String]) -> ParseOutcome<Self::Output> {
        let expected = terms.first().map(String::as_str).unwrap_or_default();
        parse_etymology(response, expected)
    }

    fn record_count(&self, output: &Self::Output) -> usize {
        usize::from(output.is_some())
    }
}
