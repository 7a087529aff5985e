//! Line classification shared by the extractors and importers
//!
//! Every recognizer works on one trimmed line. Labels are matched
//! case-insensitively and tolerate whitespace before the colon.

use regex::Regex;
use std::sync::LazyLock;

static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(word|part\s*of\s*speech|level|uk|us|definition|examples)\s*:\s*(.*)$")
        .unwrap()
});

static UK_INLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\buk\s*/([^/]+)/").unwrap());

static US_INLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bus\s*/([^/]+)/").unwrap());

static UK_PREFIXED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^uk\s*[:/]\s*/?([^/]+)/?").unwrap());

static US_PREFIXED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^us\s*[:/]\s*/?([^/]+)/?").unwrap());

static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^<<EXAMPLES>>$").unwrap());

static FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^<<?/EXAMPLES>>$").unwrap());

static MERGED_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*#\s]*[A-Za-z'’\-][A-Za-z'’\- \t]{0,39}[*\s]*\|").unwrap());

static LONE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z'’\-]+)$").unwrap());

/// Start tag of the fenced example list
pub(crate) const EXAMPLES_OPEN: &str = "<<EXAMPLES>>";

/// End tag of the fenced example list
pub(crate) const EXAMPLES_CLOSE: &str = "<</EXAMPLES>>";

/// Labeled fields recognized in blocks and export files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Label {
    Word,
    PartOfSpeech,
    Level,
    Uk,
    Us,
    Definition,
    Examples,
}

impl Label {
    fn from_key(key: &str) -> Option<Self> {
        let key: String = key
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "word" => Some(Label::Word),
            "partofspeech" => Some(Label::PartOfSpeech),
            "level" => Some(Label::Level),
            "uk" => Some(Label::Uk),
            "us" => Some(Label::Us),
            "definition" => Some(Label::Definition),
            "examples" => Some(Label::Examples),
            _ => None,
        }
    }
}

/// What a single trimmed line is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    FenceOpen,
    FenceClose,
    Bullet(&'a str),
    Label(Label, &'a str),
    Phonetic,
    Header,
    Text,
}

impl LineKind<'_> {
    /// Lines that end a running definition
    pub(crate) fn ends_definition(&self) -> bool {
        !matches!(self, LineKind::Text)
    }
}

/// Classify one line
pub(crate) fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim();

    if FENCE_OPEN.is_match(line) {
        return LineKind::FenceOpen;
    }
    if FENCE_CLOSE.is_match(line) {
        return LineKind::FenceClose;
    }
    if let Some(rest) = line.strip_prefix("- ") {
        return LineKind::Bullet(rest.trim());
    }
    if let Some(caps) = LABEL.captures(line) {
        let label = caps.get(1).and_then(|m| Label::from_key(m.as_str()));
        let value = caps.get(2).map_or("", |m| m.as_str().trim());
        if let Some(label) = label {
            return LineKind::Label(label, value);
        }
    }
    // A header may carry pronunciations after the part of speech
    if MERGED_HEADER.is_match(line) {
        return LineKind::Header;
    }
    if UK_INLINE.is_match(line) || US_INLINE.is_match(line) {
        return LineKind::Phonetic;
    }
    if line.contains('|') {
        return LineKind::Header;
    }
    LineKind::Text
}

/// Non-blank trimmed lines of a block
pub(crate) fn content_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Whether a line starts a `word | part of speech` header
pub(crate) fn is_merged_header(line: &str) -> bool {
    MERGED_HEADER.is_match(line.trim())
}

/// A line holding nothing but one word
pub(crate) fn lone_word(line: &str) -> Option<&str> {
    LONE_WORD
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Inline `uk /…/` pronunciation anywhere in the text
pub(crate) fn uk_inline(text: &str) -> Option<String> {
    capture(&UK_INLINE, text)
}

/// Inline `us /…/` pronunciation anywhere in the text
pub(crate) fn us_inline(text: &str) -> Option<String> {
    capture(&US_INLINE, text)
}

/// Pronunciation on a line that starts with `UK:` or `UK /`
pub(crate) fn uk_prefixed(line: &str) -> Option<String> {
    capture(&UK_PREFIXED, line.trim())
}

/// Pronunciation on a line that starts with `US:` or `US /`
pub(crate) fn us_prefixed(line: &str) -> Option<String> {
    capture(&US_PREFIXED, line.trim())
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Collapse whitespace runs to single spaces
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `Some` for non-blank text, trimmed
pub(crate) fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
