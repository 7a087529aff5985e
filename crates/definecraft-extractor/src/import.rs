//! Reading export files back into records
//!
//! Only structural problems fail an import: a missing file header, or no
//! usable entry at all. A malformed entry is dropped and the rest are kept.

use crate::error::ExtractorError;
use crate::export::{
    COMPARISON_HEADER, DEFINITIONS_HEADER, ENTRY_DELIMITER, FORMAT_VERSION, SECTION_RULE,
    SUMMARY_LABEL, SYNONYM_HEADER,
};
use crate::lines::{
    classify, collapse_whitespace, content_lines, non_empty, uk_inline, uk_prefixed, us_inline,
    us_prefixed, Label, LineKind,
};
use crate::synonym::{heading_sections, strip_trailing_rules};
use chrono::{DateTime, Utc};
use definecraft_domain::{ComparisonRecord, DefinitionRecord, SynonymSection};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Definition given to imported entries that have none
pub const IMPORT_PLACEHOLDER: &str = "(imported definition)";

/// Summary given to imported comparisons without a `Key Difference:` label
pub const NO_SUMMARY: &str = "No summary found.";

static GENERATED_AT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*generatedat\s*:\s*(\S+)\s*$").unwrap());

static VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*version\s*:\s*(\d+)\s*$").unwrap());

static NUMBERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s").unwrap());

static NUMBERING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s*").unwrap());

/// Header fields of a definitions export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportMetadata {
    /// When the file was written
    pub generated_at: Option<DateTime<Utc>>,

    /// Format version
    pub version: Option<u32>,
}

/// Text following the header line, or a format error
///
/// With `first_line_only` the header must be the very first line; otherwise
/// leading blank lines are skipped.
fn body_after_header<'a>(
    text: &'a str,
    header: &str,
    first_line_only: bool,
) -> Result<&'a str, ExtractorError> {
    let text = text.trim_start_matches('\u{feff}');
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() && !first_line_only {
            offset += line.len();
            continue;
        }
        if trimmed.eq_ignore_ascii_case(header) {
            return Ok(&text[offset + line.len()..]);
        }
        break;
    }

    Err(ExtractorError::Format(format!(
        "expected the first line to be '{}'",
        header
    )))
}

/// Read the `GeneratedAt` and `Version` header lines of a definitions export
pub fn read_metadata(text: &str) -> Result<ExportMetadata, ExtractorError> {
    let body = body_after_header(text, DEFINITIONS_HEADER, true)?;
    let head = body.split(ENTRY_DELIMITER).next().unwrap_or_default();

    let generated_at = GENERATED_AT
        .captures(head)
        .and_then(|caps| caps.get(1))
        .and_then(|m| DateTime::parse_from_rfc3339(m.as_str()).ok())
        .map(|dt| dt.with_timezone(&Utc));
    let version = VERSION
        .captures(head)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    Ok(ExportMetadata {
        generated_at,
        version,
    })
}

/// Import a definitions export
///
/// Files with `---ENTRY---` delimiters are read as the canonical format,
/// anything else as the older numbered format.
pub fn import_definitions(text: &str) -> Result<Vec<DefinitionRecord>, ExtractorError> {
    let body = body_after_header(text, DEFINITIONS_HEADER, true)?;

    let records = if body.contains(ENTRY_DELIMITER) {
        let metadata = read_metadata(text)?;
        if metadata.version.is_some_and(|v| v > FORMAT_VERSION) {
            warn!(
                "Export version {:?} is newer than {}, reading it anyway",
                metadata.version, FORMAT_VERSION
            );
        }
        debug!("Importing canonical export generated at {:?}", metadata.generated_at);
        import_entries(body)
    } else {
        debug!("No entry delimiters, trying the numbered format");
        import_numbered(body)
    };

    if records.is_empty() {
        return Err(ExtractorError::Format(
            "No valid definitions found in the file".to_string(),
        ));
    }

    info!("Imported {} definitions", records.len());
    Ok(records)
}

fn import_entries(body: &str) -> Vec<DefinitionRecord> {
    body.split(ENTRY_DELIMITER)
        .skip(1)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .enumerate()
        .filter_map(|(i, fragment)| {
            let record = parse_entry(fragment);
            if record.is_none() {
                warn!("Dropping entry {} without a Word line", i + 1);
            }
            record
        })
        .collect()
}

/// Strip the surrounding slashes from a phonetic value
fn phonetic_value(value: &str) -> Option<String> {
    non_empty(value.trim().trim_start_matches('/').trim_end_matches('/'))
}

fn parse_entry(fragment: &str) -> Option<DefinitionRecord> {
    let mut word = None;
    let mut record = DefinitionRecord::default();
    let mut definition: Vec<&str> = Vec::new();
    let mut in_definition = false;
    let mut in_fence = false;

    for line in content_lines(fragment) {
        let kind = classify(line);

        if in_fence {
            match kind {
                LineKind::FenceClose => in_fence = false,
                LineKind::Bullet(text) if !text.is_empty() => record.examples.push(text.to_string()),
                LineKind::Bullet(_) => {}
                _ => record.examples.push(line.to_string()),
            }
            continue;
        }

        if in_definition && !kind.ends_definition() {
            definition.push(line);
            continue;
        }
        in_definition = false;

        match kind {
            LineKind::Label(Label::Word, value) => word = non_empty(value),
            LineKind::Label(Label::PartOfSpeech, value) => record.part_of_speech = non_empty(value),
            LineKind::Label(Label::Level, value) => record.level = non_empty(value),
            LineKind::Label(Label::Uk, value) => record.uk_phonetic = phonetic_value(value),
            LineKind::Label(Label::Us, value) => record.us_phonetic = phonetic_value(value),
            LineKind::Label(Label::Definition, value) => {
                definition.push(value);
                in_definition = true;
            }
            LineKind::FenceOpen => in_fence = true,
            LineKind::Bullet(text) if !text.is_empty() => record.examples.push(text.to_string()),
            _ => {}
        }
    }

    record.word = word?.to_lowercase();
    record.definition = non_empty(&collapse_whitespace(&definition.join(" ")))
        .unwrap_or_else(|| IMPORT_PLACEHOLDER.to_string());
    Some(record)
}

/// Split the older export at lines that start with `N. `
fn numbered_sections(body: &str) -> Vec<Vec<&str>> {
    let mut sections: Vec<Vec<&str>> = Vec::new();
    for line in content_lines(body) {
        if NUMBERED.is_match(line) {
            sections.push(vec![line]);
        } else if let Some(section) = sections.last_mut() {
            section.push(line);
        }
    }
    sections
}

fn import_numbered(body: &str) -> Vec<DefinitionRecord> {
    numbered_sections(body)
        .into_iter()
        .filter_map(|lines| {
            let record = parse_numbered(&lines);
            if record.is_none() {
                warn!("Dropping numbered section without a word: {:?}", lines.first());
            }
            record
        })
        .collect()
}

fn parse_numbered(lines: &[&str]) -> Option<DefinitionRecord> {
    let (first, rest) = lines.split_first()?;
    let header = NUMBERING.replace(first, "");
    let mut parts = header.split('|').map(str::trim);
    let word = non_empty(parts.next()?)?.to_lowercase();
    let part_of_speech = parts.next().and_then(non_empty);

    let kinds: Vec<LineKind<'_>> = rest.iter().copied().map(classify).collect();

    let mut definition = Vec::new();
    if let Some(start) = kinds
        .iter()
        .position(|k| matches!(k, LineKind::Label(Label::Definition, _)))
    {
        if let LineKind::Label(_, value) = kinds[start] {
            definition.push(value);
        }
        definition.extend(
            kinds[start + 1..]
                .iter()
                .zip(&rest[start + 1..])
                .take_while(|(kind, _)| !kind.ends_definition())
                .map(|(_, line)| *line),
        );
    }

    let level = kinds.iter().find_map(|kind| match kind {
        LineKind::Label(Label::Level, value) => non_empty(value),
        _ => None,
    });
    let examples = kinds
        .iter()
        .filter_map(|kind| match kind {
            LineKind::Bullet(text) => non_empty(text),
            _ => None,
        })
        .collect();

    Some(DefinitionRecord {
        word,
        part_of_speech,
        level,
        uk_phonetic: rest.iter().find_map(|l| uk_inline(l).or_else(|| uk_prefixed(l))),
        us_phonetic: rest.iter().find_map(|l| us_inline(l).or_else(|| us_prefixed(l))),
        definition: non_empty(&collapse_whitespace(&definition.join(" ")))
            .unwrap_or_else(|| IMPORT_PLACEHOLDER.to_string()),
        examples,
    })
}

/// Import a comparison export
pub fn import_comparison(text: &str) -> Result<ComparisonRecord, ExtractorError> {
    let body = body_after_header(text, COMPARISON_HEADER, false)?;

    let mut offset = 0;
    let mut rule = None;
    for line in body.split_inclusive('\n') {
        if line.trim() == SECTION_RULE {
            rule = Some((offset, offset + line.len()));
            break;
        }
        offset += line.len();
    }

    let Some((rule_start, rule_end)) = rule else {
        debug!("Comparison export has no '{}' rule, keeping the body as details", SECTION_RULE);
        return Ok(ComparisonRecord::unsummarized(body.trim()));
    };

    let head = &body[..rule_start];
    let summary = head
        .to_ascii_lowercase()
        .find(&SUMMARY_LABEL.to_ascii_lowercase())
        .map(|i| head[i + SUMMARY_LABEL.len()..].trim())
        .filter(|summary| !summary.is_empty())
        .unwrap_or(NO_SUMMARY);

    Ok(ComparisonRecord::new(summary, body[rule_end..].trim()))
}

/// Import a synonym export
///
/// A body with no heading at all is read back as one untitled section, the
/// same way the response it was exported from was parsed.
pub fn import_synonyms(text: &str) -> Result<Vec<SynonymSection>, ExtractorError> {
    let body = body_after_header(text, SYNONYM_HEADER, false)?;
    let (mut sections, dropped) = heading_sections(body);
    if sections.is_empty() {
        let untitled = strip_trailing_rules(body).trim();
        if !untitled.is_empty() {
            sections.push(SynonymSection::new(untitled));
        }
    } else if dropped > 0 {
        debug!("Ignored {} fragment(s) before the first heading", dropped);
    }

    if sections.is_empty() {
        return Err(ExtractorError::Format(
            "No synonym sections found in the file".to_string(),
        ));
    }
    info!("Imported {} synonym sections", sections.len());
    Ok(sections)
}
