//! Alignment of segmented blocks to the requested terms

use crate::segment::{truncate_merged, Segmentation};
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, warn};

/// How a block was picked for a term
///
/// Anything other than `Content` means the block may belong to another word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// The block mentions the term as a whole word
    Content,
    /// Next unused candidate block, by position
    Positional,
    /// Raw block at the term's index, taken after candidates ran out
    RawFallback,
    /// Nothing left to assign
    Unmatched,
}

impl Alignment {
    /// Whether the pairing rests on the block's content
    pub fn is_confident(&self) -> bool {
        matches!(self, Alignment::Content)
    }
}

/// The block assigned to one requested term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedBlock {
    /// Requested term, lowercase
    pub term: String,

    /// Block text; empty when `alignment` is `Unmatched`
    pub text: String,

    /// How the block was chosen
    pub alignment: Alignment,
}

/// Assign one block to each term, in term order
///
/// Candidate blocks are used at most once. A term first takes the earliest
/// unused candidate that mentions it, then the next unused candidate, then
/// the raw block at its own index if that block was never a candidate.
pub fn align(segmentation: &Segmentation, terms: &[String]) -> Vec<AlignedBlock> {
    let candidates = &segmentation.candidates;
    let candidate_raw: HashSet<usize> = candidates.iter().map(|c| c.raw_index).collect();
    let mut used = vec![false; candidates.len()];

    terms
        .iter()
        .enumerate()
        .map(|(term_index, term)| {
            let term = term.to_lowercase();
            let matcher = whole_word(&term);

            let by_content = matcher.as_ref().and_then(|re| {
                candidates
                    .iter()
                    .enumerate()
                    .find(|(i, c)| !used[*i] && re.is_match(&c.text))
                    .map(|(i, _)| i)
            });

            if let Some(i) = by_content {
                used[i] = true;
                return AlignedBlock {
                    term,
                    text: candidates[i].text.clone(),
                    alignment: Alignment::Content,
                };
            }

            if let Some(i) = used.iter().position(|u| !u) {
                used[i] = true;
                debug!("No block mentions '{}', taking block {} by position", term, i);
                return AlignedBlock {
                    term,
                    text: candidates[i].text.clone(),
                    alignment: Alignment::Positional,
                };
            }

            match segmentation.raw_blocks.get(term_index) {
                Some(raw) if !candidate_raw.contains(&term_index) => {
                    warn!("Candidates exhausted, using raw block {} for '{}'", term_index, term);
                    AlignedBlock {
                        term,
                        text: truncate_merged(raw).to_string(),
                        alignment: Alignment::RawFallback,
                    }
                }
                _ => {
                    warn!("No block left for '{}'", term);
                    AlignedBlock {
                        term,
                        text: String::new(),
                        alignment: Alignment::Unmatched,
                    }
                }
            }
        })
        .collect()
}

/// Case-insensitive whole-word matcher for a term
fn whole_word(term: &str) -> Option<Regex> {
    if term.trim().is_empty() {
        return None;
    }
    let term = term.trim();
    let edge = |c: Option<char>| match c {
        Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
        _ => "",
    };
    let pattern = format!(
        "(?i){}{}{}",
        edge(term.chars().next()),
        regex::escape(term),
        edge(term.chars().last())
    );
    Regex::new(&pattern).ok()
}
