//! Splitting synonym analyses into per-word markdown sections

use crate::types::{ExtractionWarning, ParseOutcome};
use definecraft_domain::SynonymSection;
use tracing::{debug, warn};

/// Prefix of the heading line that starts every section
pub const SECTION_HEADING: &str = "## ";

/// Split text before every line that starts with `## `
///
/// Fragments are trimmed and empty ones dropped. Only the first fragment can
/// lack a heading.
pub(crate) fn split_at_headings(text: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.starts_with(SECTION_HEADING) && !current.trim().is_empty() {
            fragments.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.trim().is_empty() {
        fragments.push(current);
    }

    fragments.into_iter().map(|f| f.trim().to_string()).collect()
}

/// Remove `---` rule lines from the end of a section
pub(crate) fn strip_trailing_rules(section: &str) -> &str {
    let mut text = section.trim_end();
    while let Some(rest) = text.strip_suffix("---") {
        if rest.is_empty() || rest.ends_with('\n') {
            text = rest.trim_end();
        } else {
            break;
        }
    }
    text
}

/// Sections that start with a heading, with separator rules removed
pub(crate) fn heading_sections(text: &str) -> (Vec<SynonymSection>, usize) {
    let mut dropped = 0;
    let sections = split_at_headings(text)
        .into_iter()
        .filter(|fragment| {
            let keep = fragment.starts_with(SECTION_HEADING);
            if !keep {
                dropped += 1;
            }
            keep
        })
        .map(|fragment| SynonymSection::new(strip_trailing_rules(&fragment)))
        .collect();
    (sections, dropped)
}

/// Split a synonym response into sections
///
/// A preamble before the first heading is dropped. A response with no heading
/// at all is kept whole as one untitled section with an `UnexpectedFormat`
/// warning.
pub fn parse_synonyms(response: &str) -> ParseOutcome<Vec<SynonymSection>> {
    let (sections, dropped) = heading_sections(response);
    if dropped > 0 {
        debug!("Dropped {} fragment(s) before the first heading", dropped);
    }

    if sections.is_empty() && !response.trim().is_empty() {
        warn!("Synonym response has no '{}' headings", SECTION_HEADING.trim());
        return ParseOutcome::clean(vec![SynonymSection::new(response.trim())]).with_warning(
            ExtractionWarning::UnexpectedFormat("no '## ' headings".to_string()),
        );
    }

    ParseOutcome::clean(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = "Here is your analysis.\n\n## Happy\n**Synonyms:** glad, cheerful\n\n## Sad\n**Synonyms:** unhappy and blue\n---";

    #[test]
    fn test_splits_before_headings() {
        let outcome = parse_synonyms(RESPONSE);
        let sections = outcome.output;

        assert!(outcome.warnings.is_empty());
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title(), "Happy");
        assert_eq!(sections[1].markdown, "## Sad\n**Synonyms:** unhappy and blue");
        assert_eq!(sections[1].synonyms(), vec!["unhappy", "blue"]);
    }

    #[test]
    fn test_subheadings_do_not_split() {
        let sections = parse_synonyms("## Happy\n### Notes\ntext").output;
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_no_headings_kept_whole() {
        let outcome = parse_synonyms("glad, cheerful, merry");
        assert_eq!(outcome.output.len(), 1);
        assert_eq!(outcome.output[0].title(), SynonymSection::UNTITLED);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn test_strip_trailing_rules() {
        assert_eq!(strip_trailing_rules("## A\ntext\n\n---\n---\n"), "## A\ntext");
        assert_eq!(strip_trailing_rules("## A\nmid---"), "## A\nmid---");
    }

    #[test]
    fn test_empty_response() {
        let outcome = parse_synonyms("   ");
        assert!(outcome.output.is_empty());
        assert!(outcome.warnings.is_empty());
    }
}
