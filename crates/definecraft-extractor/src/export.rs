//! Rendering records into their export text
//!
//! Definitions use a line-oriented `Label: value` grammar with one repeating
//! entry delimiter and a fenced example list. Comparisons and synonyms are
//! exported as a fixed preamble followed by their markdown.

use crate::lines::{EXAMPLES_CLOSE, EXAMPLES_OPEN};
use chrono::{DateTime, SecondsFormat, Utc};
use definecraft_domain::{ComparisonRecord, DefinitionRecord, SynonymSection};

/// First line of a definitions export
pub const DEFINITIONS_HEADER: &str = "Word Definitions";

/// Line that starts every definition entry
pub const ENTRY_DELIMITER: &str = "---ENTRY---";

/// Version written into definitions exports
pub const FORMAT_VERSION: u32 = 2;

/// First line of a comparison export
pub const COMPARISON_HEADER: &str = "Word Comparison Analysis";

/// First line of a synonym export
pub const SYNONYM_HEADER: &str = "Word Synonym Analysis";

/// Label introducing the comparison summary
pub(crate) const SUMMARY_LABEL: &str = "Key Difference:";

/// Rule line between exported sections
pub(crate) const SECTION_RULE: &str = "---";

/// ISO-8601 timestamp as written into exports
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render definitions in the canonical export format
///
/// Empty optional fields are omitted; the example list is always written,
/// even when empty.
pub fn export_definitions(records: &[DefinitionRecord], generated_at: &DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str(DEFINITIONS_HEADER);
    out.push('\n');
    out.push_str(&format!("GeneratedAt: {}\n", format_timestamp(generated_at)));
    out.push_str(&format!("Version: {}\n", FORMAT_VERSION));

    for record in records {
        out.push('\n');
        out.push_str(ENTRY_DELIMITER);
        out.push('\n');
        push_entry(&mut out, record);
    }

    out
}

fn push_entry(out: &mut String, record: &DefinitionRecord) {
    out.push_str(&format!("Word: {}\n", record.word));
    push_optional(out, "PartOfSpeech", record.part_of_speech.as_deref(), false);
    push_optional(out, "Level", record.level.as_deref(), false);
    push_optional(out, "UK", record.uk_phonetic.as_deref(), true);
    push_optional(out, "US", record.us_phonetic.as_deref(), true);
    out.push_str(&format!("Definition: {}\n", record.definition));
    out.push_str("Examples:\n");
    out.push_str(EXAMPLES_OPEN);
    out.push('\n');
    for example in &record.examples {
        out.push_str(&format!("- {}\n", example));
    }
    out.push_str(EXAMPLES_CLOSE);
    out.push('\n');
}

fn push_optional(out: &mut String, label: &str, value: Option<&str>, slashed: bool) {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return;
    };
    if slashed {
        out.push_str(&format!("{}: /{}/\n", label, value));
    } else {
        out.push_str(&format!("{}: {}\n", label, value));
    }
}

/// Render a comparison: preamble, summary, rule, details
pub fn export_comparison(record: &ComparisonRecord) -> String {
    format!(
        "{}\n\n{}\n{}\n\n{}\n\n{}",
        COMPARISON_HEADER,
        SUMMARY_LABEL,
        record.summary.trim(),
        SECTION_RULE,
        record.details.trim()
    )
}

/// Render synonym sections separated by rule lines
pub fn export_synonyms(sections: &[SynonymSection]) -> String {
    let body: Vec<&str> = sections.iter().map(|s| s.markdown.trim()).collect();
    format!(
        "{}\n\n{}",
        SYNONYM_HEADER,
        body.join(&format!("\n\n{}\n\n", SECTION_RULE))
    )
}
