//! Record types produced by the DefineCraft tools

/// Definition text used when nothing could be extracted for a word
pub const DEFINITION_PLACEHOLDER: &str = "Definition not available.";

/// A defined word
///
/// `word` is the canonical lowercase key. Optional fields are `None` rather than
/// empty strings; `definition` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DefinitionRecord {
    /// Lowercase headword
    pub word: String,

    /// Part of speech as written by the model ("adjective", "phrasal verb")
    pub part_of_speech: Option<String>,

    /// Free-text proficiency label (B1, C1, ...), passed through unvalidated
    pub level: Option<String>,

    /// British pronunciation without the surrounding slashes
    pub uk_phonetic: Option<String>,

    /// American pronunciation without the surrounding slashes
    pub us_phonetic: Option<String>,

    /// Definition text, or [`DEFINITION_PLACEHOLDER`]
    pub definition: String,

    /// Example sentences in source order
    pub examples: Vec<String>,
}

impl DefinitionRecord {
    /// Create a record with only a word and a definition
    ///
    /// The word is lowercased and an empty definition is replaced with the
    /// placeholder.
    ///
    /// # Examples
    ///
    /// ```
    /// use definecraft_domain::{DefinitionRecord, DEFINITION_PLACEHOLDER};
    ///
    /// let record = DefinitionRecord::new("Happy", "");
    /// assert_eq!(record.word, "happy");
    /// assert_eq!(record.definition, DEFINITION_PLACEHOLDER);
    /// ```
    pub fn new(word: impl Into<String>, definition: impl Into<String>) -> Self {
        let definition = definition.into();
        Self {
            word: word.into().trim().to_lowercase(),
            definition: if definition.trim().is_empty() {
                DEFINITION_PLACEHOLDER.to_string()
            } else {
                definition
            },
            ..Default::default()
        }
    }

    /// Whether the record carries any pronunciation
    pub fn has_phonetics(&self) -> bool {
        self.uk_phonetic.is_some() || self.us_phonetic.is_some()
    }

    /// Whether the definition is the fallback placeholder
    pub fn is_placeholder(&self) -> bool {
        self.definition == DEFINITION_PLACEHOLDER
    }
}

/// Result of comparing two or more words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRecord {
    /// One-sentence key difference
    pub summary: String,

    /// Markdown analysis
    pub details: String,
}

impl ComparisonRecord {
    /// Summary used when the response could not be split
    pub const NOT_SUMMARIZED: &'static str =
        "Could not automatically summarize the key difference.";

    /// Create a comparison record
    pub fn new(summary: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            details: details.into(),
        }
    }

    /// Keep the whole text as details behind the fixed notice
    pub fn unsummarized(details: impl Into<String>) -> Self {
        Self::new(Self::NOT_SUMMARIZED, details)
    }

    /// Whether the summary is the fixed notice
    pub fn is_unsummarized(&self) -> bool {
        self.summary == Self::NOT_SUMMARIZED
    }
}

/// One markdown section of a synonym analysis
///
/// The markdown is the persisted form. The accessors below pull out pieces
/// for display on demand and are not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymSection {
    /// Raw markdown, starting with a `## ` heading
    pub markdown: String,
}

const SYNONYMS_LABEL: &str = "**synonyms:**";
const USAGE_LABEL: &str = "**usage notes:**";
const EXAMPLES_LABEL: &str = "**examples:**";

impl SynonymSection {
    /// Title used when the section has no heading
    pub const UNTITLED: &'static str = "Synonym Analysis";

    /// Wrap a markdown section
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
        }
    }

    /// Heading text of the section
    ///
    /// # Examples
    ///
    /// ```
    /// use definecraft_domain::SynonymSection;
    ///
    /// let section = SynonymSection::new("## Happy\n**Synonyms:** glad, cheerful");
    /// assert_eq!(section.title(), "Happy");
    /// ```
    pub fn title(&self) -> &str {
        self.markdown
            .lines()
            .next()
            .and_then(|line| line.strip_prefix("##"))
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(Self::UNTITLED)
    }

    /// Synonyms listed under the `**Synonyms:**` label
    pub fn synonyms(&self) -> Vec<String> {
        let text = self.between(SYNONYMS_LABEL, Some(USAGE_LABEL));
        text.split(", ")
            .flat_map(|part| part.split(" and "))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Text under the `**Usage Notes:**` label
    pub fn usage_notes(&self) -> &str {
        self.between(USAGE_LABEL, Some(EXAMPLES_LABEL))
    }

    /// Text under the `**Examples:**` label, to the end of the section
    pub fn examples(&self) -> &str {
        self.between(EXAMPLES_LABEL, None)
    }

    /// Slice between a case-insensitive start label and an optional end label
    fn between(&self, start: &str, end: Option<&str>) -> &str {
        // ASCII lowercasing keeps byte offsets aligned with the original text
        let lower = self.markdown.to_ascii_lowercase();
        let Some(start_idx) = lower.find(start) else {
            return "";
        };
        let from = start_idx + start.len();
        let to = end
            .and_then(|end| lower[from..].find(end))
            .map(|offset| from + offset)
            .unwrap_or(self.markdown.len());
        self.markdown[from..to].trim()
    }
}

/// One step in a word's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    /// Period label ("12th Century")
    pub period: String,

    /// What happened to the word in that period
    pub change: String,
}

/// The traced history of a single word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtymologyRecord {
    /// Word that was traced
    pub word: String,

    /// Language(s) of origin
    pub language_of_origin: String,

    /// Root word and its meaning
    pub root_word: String,

    /// First known use ("14th Century")
    pub first_known_use: String,

    /// Short narrative of the word's journey
    pub explanation: String,

    /// Ordered history
    pub timeline: Vec<TimelineEntry>,
}
