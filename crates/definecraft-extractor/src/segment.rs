//! Segmentation of a completion into candidate record blocks

use crate::lines::{is_merged_header, uk_inline};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

static PIPE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9'’\-]+[*\s]*\|").unwrap());

static DEFINITION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)definition\s*:").unwrap());

/// A block that looks like a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateBlock {
    /// Position of the block among the raw blocks
    pub raw_index: usize,

    /// Block text, cut at a second header if two words were merged
    pub text: String,
}

/// Blocks of one completion, before and after noise filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Every non-empty blank-line separated block, trimmed
    pub raw_blocks: Vec<String>,

    /// Blocks that look like records, in source order
    pub candidates: Vec<CandidateBlock>,
}

/// Split a completion into raw blocks and record candidates
///
/// A block is a candidate when it has a `word |` header, an inline UK
/// pronunciation, or a `Definition:` label. Anything else (preambles, closing
/// remarks) is kept only in `raw_blocks`.
pub fn segment(response: &str) -> Segmentation {
    let raw_blocks: Vec<String> = BLANK_LINES
        .split(response)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect();

    let candidates: Vec<CandidateBlock> = raw_blocks
        .iter()
        .enumerate()
        .filter(|(_, block)| is_potential_record(block))
        .map(|(raw_index, block)| CandidateBlock {
            raw_index,
            text: truncate_merged(block).to_string(),
        })
        .collect();

    debug!(
        "Segmented response into {} raw blocks, {} candidates",
        raw_blocks.len(),
        candidates.len()
    );

    Segmentation {
        raw_blocks,
        candidates,
    }
}

/// Whether a block has any record marker
pub fn is_potential_record(block: &str) -> bool {
    PIPE_HEADER.is_match(block) || uk_inline(block).is_some() || DEFINITION_LABEL.is_match(block)
}

/// Cut a block at its second `word |` header line
///
/// Two headers in one block mean the model left out the blank line between
/// two words. Only the first word is kept; the rest is dropped.
pub fn truncate_merged(block: &str) -> &str {
    let mut headers_seen = 0;
    let mut offset = 0;

    for line in block.split_inclusive('\n') {
        if is_merged_header(line) {
            headers_seen += 1;
            if headers_seen == 2 {
                debug!("Dropping merged content after second header: {:?}", line.trim());
                return block[..offset].trim();
            }
        }
        offset += line.len();
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_blank_line_runs() {
        let seg = segment("a | noun\nDefinition: x\n\n\n\nb | verb\nDefinition: y");
        assert_eq!(seg.raw_blocks.len(), 2);
        assert_eq!(seg.candidates.len(), 2);
        assert_eq!(seg.candidates[1].raw_index, 1);
    }

    #[test]
    fn test_whitespace_only_lines_separate_blocks() {
        let seg = segment("a | noun\n   \nb | verb");
        assert_eq!(seg.raw_blocks, vec!["a | noun", "b | verb"]);
    }

    #[test]
    fn test_drops_noise_blocks() {
        let seg = segment(
            "Sure! Here are your definitions.\n\nhappy | adjective\nDefinition: glad.\n\nHope this helps!",
        );
        assert_eq!(seg.raw_blocks.len(), 3);
        assert_eq!(seg.candidates.len(), 1);
        assert_eq!(seg.candidates[0].raw_index, 1);
    }

    #[test]
    fn test_candidate_markers() {
        assert!(is_potential_record("happy | adjective"));
        assert!(is_potential_record("uk /ˈhæpi/"));
        assert!(is_potential_record("DEFINITION: glad"));
        assert!(is_potential_record("**happy** | adjective"));
        assert!(!is_potential_record("Here you go"));
    }

    #[test]
    fn test_truncates_merged_words() {
        let block = "happy | adjective\nDefinition: glad.\njoyful | adjective\nDefinition: full of joy.";
        assert_eq!(truncate_merged(block), "happy | adjective\nDefinition: glad.");
    }

    #[test]
    fn test_truncates_merged_bold_headers() {
        let block = "**happy** | adjective\nDefinition: glad.\n- I am happy.\n**joyful** | adjective\nuk /dʒɔɪ/ us /dʒɔɪ/\n- She felt joyful.";
        assert_eq!(
            truncate_merged(block),
            "**happy** | adjective\nDefinition: glad.\n- I am happy."
        );
    }

    #[test]
    fn test_single_header_untouched() {
        let block = "happy | adjective\nDefinition: a | b";
        assert_eq!(truncate_merged(block), block);
    }

    #[test]
    fn test_empty_response() {
        let seg = segment("");
        assert!(seg.raw_blocks.is_empty());
        assert!(seg.candidates.is_empty());
    }
}
