//! Field extraction for word definitions
//!
//! Each field has its own ordered list of named strategies. The first strategy
//! that yields a value wins; when none does the field falls back to the
//! requested term, `None`, an empty list, or the placeholder definition.

use crate::align::{align, Alignment};
use crate::lines::{
    classify, collapse_whitespace, content_lines, lone_word, non_empty, uk_inline, uk_prefixed,
    us_inline, us_prefixed, Label, LineKind,
};
use crate::segment::segment;
use crate::types::ExtractedDefinition;
use definecraft_domain::{DefinitionRecord, DEFINITION_PLACEHOLDER};
use tracing::{debug, trace};

/// A block split into classified lines
struct Block<'a> {
    lines: Vec<&'a str>,
    kinds: Vec<LineKind<'a>>,
}

impl<'a> Block<'a> {
    fn new(text: &'a str) -> Self {
        let lines = content_lines(text);
        let kinds = lines.iter().copied().map(classify).collect();
        Self { lines, kinds }
    }

    fn header_index(&self) -> Option<usize> {
        self.kinds.iter().position(|kind| *kind == LineKind::Header)
    }

    fn label(&self, wanted: Label) -> Option<(usize, &'a str)> {
        self.kinds.iter().enumerate().find_map(|(i, kind)| match kind {
            LineKind::Label(label, value) if *label == wanted => Some((i, *value)),
            _ => None,
        })
    }
}

type Strategy<T> = (&'static str, fn(&Block<'_>) -> Option<T>);

/// Run strategies in order, returning the first hit
fn first_hit<T>(field: &str, block: &Block<'_>, strategies: &[Strategy<T>]) -> Option<T> {
    strategies.iter().find_map(|(name, strategy)| {
        let hit = strategy(block);
        if hit.is_some() {
            trace!("{} resolved by '{}'", field, name);
        }
        hit
    })
}

#[derive(Debug, Default)]
struct Header {
    word: Option<String>,
    part_of_speech: Option<String>,
}

fn clean_header_part(part: &str) -> Option<String> {
    non_empty(part.trim_matches(|c: char| c == '*' || c == '#' || c.is_whitespace()))
}

fn pipe_header(block: &Block<'_>) -> Option<Header> {
    let line = block.lines[block.header_index()?];
    let mut parts = line.split('|');
    let word = parts.next().and_then(clean_header_part).map(|w| w.to_lowercase());
    let part_of_speech = parts.next().and_then(clean_header_part);
    Some(Header { word, part_of_speech })
}

fn labeled_word(block: &Block<'_>) -> Option<Header> {
    let (_, word) = block.label(Label::Word)?;
    Some(Header {
        word: Some(non_empty(word)?.to_lowercase()),
        part_of_speech: block.label(Label::PartOfSpeech).and_then(|(_, pos)| non_empty(pos)),
    })
}

fn lone_word_line(block: &Block<'_>) -> Option<Header> {
    let word = lone_word(block.lines.first()?)?;
    Some(Header {
        word: Some(word.to_lowercase()),
        part_of_speech: None,
    })
}

const HEADER_STRATEGIES: &[Strategy<Header>] = &[
    ("pipe-header", pipe_header),
    ("word-label", labeled_word),
    ("lone-word", lone_word_line),
];

#[derive(Debug, Default)]
struct Phonetics {
    uk: Option<String>,
    us: Option<String>,
}

fn inline_pair(block: &Block<'_>) -> Option<Phonetics> {
    block.lines.iter().find_map(|line| {
        let uk = uk_inline(line)?;
        let us = us_inline(line)?;
        Some(Phonetics { uk: Some(uk), us: Some(us) })
    })
}

fn prefixed_lines(block: &Block<'_>) -> Option<Phonetics> {
    let uk = block.lines.iter().find_map(|line| uk_prefixed(line));
    let us = block.lines.iter().find_map(|line| us_prefixed(line));
    if uk.is_none() && us.is_none() {
        return None;
    }
    Some(Phonetics { uk, us })
}

fn inline_any(block: &Block<'_>) -> Option<Phonetics> {
    let uk = block.lines.iter().find_map(|line| uk_inline(line));
    let us = block.lines.iter().find_map(|line| us_inline(line));
    if uk.is_none() && us.is_none() {
        return None;
    }
    Some(Phonetics { uk, us })
}

const PHONETIC_STRATEGIES: &[Strategy<Phonetics>] = &[
    ("inline-pair", inline_pair),
    ("prefixed-lines", prefixed_lines),
    ("inline-any", inline_any),
];

fn level_label(block: &Block<'_>) -> Option<String> {
    block.label(Label::Level).and_then(|(_, value)| non_empty(value))
}

const LEVEL_STRATEGIES: &[Strategy<String>] = &[("level-label", level_label)];

fn fenced_examples(block: &Block<'_>) -> Option<Vec<String>> {
    let open = block.kinds.iter().position(|k| *k == LineKind::FenceOpen)?;
    let close = block.kinds[open + 1..]
        .iter()
        .position(|k| *k == LineKind::FenceClose)?
        + open
        + 1;

    let examples = (open + 1..close)
        .map(|i| match block.kinds[i] {
            LineKind::Bullet(text) => text.to_string(),
            _ => block.lines[i].to_string(),
        })
        .filter(|example| !example.is_empty())
        .collect();
    Some(examples)
}

fn bullet_examples(block: &Block<'_>) -> Option<Vec<String>> {
    let examples: Vec<String> = block
        .kinds
        .iter()
        .filter_map(|kind| match kind {
            LineKind::Bullet(text) if !text.is_empty() => Some(text.to_string()),
            _ => None,
        })
        .collect();
    if examples.is_empty() {
        None
    } else {
        Some(examples)
    }
}

const EXAMPLE_STRATEGIES: &[Strategy<Vec<String>>] = &[
    ("fenced", fenced_examples),
    ("bullets", bullet_examples),
];

fn labeled_definition(block: &Block<'_>) -> Option<String> {
    let (start, first) = block.label(Label::Definition)?;
    let mut parts = vec![first];
    parts.extend(
        block.kinds[start + 1..]
            .iter()
            .zip(&block.lines[start + 1..])
            .take_while(|(kind, _)| !kind.ends_definition())
            .map(|(_, line)| *line),
    );
    non_empty(&collapse_whitespace(&parts.join(" ")))
}

fn unlabeled_definition(block: &Block<'_>) -> Option<String> {
    let skip_first = lone_word_line(block).is_some() && block.header_index().is_none();
    let mut in_fence = false;
    let mut parts = Vec::new();

    for (i, (kind, line)) in block.kinds.iter().zip(&block.lines).enumerate() {
        match kind {
            LineKind::FenceOpen => in_fence = true,
            LineKind::FenceClose => in_fence = false,
            LineKind::Text if !in_fence && !(skip_first && i == 0) => parts.push(*line),
            _ => {}
        }
    }
    non_empty(&collapse_whitespace(&parts.join(" ")))
}

const DEFINITION_STRATEGIES: &[Strategy<String>] = &[
    ("definition-label", labeled_definition),
    ("unlabeled-lines", unlabeled_definition),
];

/// Extract a definition record from one block
///
/// Never fails: `word` falls back to `expected_word`, missing optional fields
/// stay `None`, and an empty definition becomes the placeholder.
pub fn extract_definition(block: &str, expected_word: &str) -> DefinitionRecord {
    let block = Block::new(block);

    let header = first_hit("header", &block, HEADER_STRATEGIES).unwrap_or_default();
    let phonetics = first_hit("phonetics", &block, PHONETIC_STRATEGIES).unwrap_or_default();
    let level = first_hit("level", &block, LEVEL_STRATEGIES);
    let examples = first_hit("examples", &block, EXAMPLE_STRATEGIES).unwrap_or_default();
    let definition = first_hit("definition", &block, DEFINITION_STRATEGIES)
        .unwrap_or_else(|| DEFINITION_PLACEHOLDER.to_string());

    let part_of_speech = header
        .part_of_speech
        .or_else(|| block.label(Label::PartOfSpeech).and_then(|(_, pos)| non_empty(pos)));

    DefinitionRecord {
        word: header
            .word
            .unwrap_or_else(|| expected_word.trim().to_lowercase()),
        part_of_speech,
        level,
        uk_phonetic: phonetics.uk,
        us_phonetic: phonetics.us,
        definition,
        examples,
    }
}

/// Segment, align and extract definitions for the requested terms
///
/// Terms whose alignment found no block produce no record.
pub fn extract_definitions(response: &str, terms: &[String]) -> Vec<ExtractedDefinition> {
    if response.trim().is_empty() {
        return Vec::new();
    }

    let segmentation = segment(response);
    let extracted: Vec<ExtractedDefinition> = align(&segmentation, terms)
        .into_iter()
        .filter(|aligned| aligned.alignment != Alignment::Unmatched)
        .map(|aligned| ExtractedDefinition {
            record: extract_definition(&aligned.text, &aligned.term),
            term: aligned.term,
            alignment: aligned.alignment,
        })
        .collect();

    debug!(
        "Extracted {} definitions for {} terms",
        extracted.len(),
        terms.len()
    );
    extracted
}
