//! Prompt construction for each tool
//!
//! Every prompt spells out the exact layout its parser expects.

use crate::comparison::DETAILS_SEPARATOR;
use crate::config::EnglishLevel;

/// Builds the completion prompt for a list of terms
pub struct PromptBuilder<'a> {
    terms: &'a [String],
    level: EnglishLevel,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(terms: &'a [String]) -> Self {
        Self {
            terms,
            level: EnglishLevel::default(),
        }
    }

    /// Write explanations for a different level
    pub fn with_level(mut self, level: EnglishLevel) -> Self {
        self.level = level;
        self
    }

    fn word_list(&self) -> String {
        self.terms.join(", ")
    }

    /// Prompt for the definitions tool
    pub fn definitions(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(&format!("Define these words: {}\n\n", self.word_list()));
        prompt.push_str(match self.level {
            EnglishLevel::Simple => "Use very simple words that a 5-year-old would understand.",
            EnglishLevel::Average => {
                "Use clear, standard explanations suitable for intermediate English learners."
            }
            EnglishLevel::Proficient => {
                "Use sophisticated vocabulary and provide detailed, nuanced explanations."
            }
        });
        prompt.push_str("\n\n");
        prompt.push_str(DEFINITION_FORMAT);
        prompt.push_str(&format!(
            "\nCRITICAL:\n- Return {} separate definition blocks\n",
            self.terms.len()
        ));
        prompt.push_str(DEFINITION_REMINDER);
        prompt
    }

    /// Prompt for the comparison tool
    pub fn comparison(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(&format!(
            "**Task: Compare and contrast these words:** {}.\n\n",
            self.word_list()
        ));
        prompt.push_str(&COMPARISON_FORMAT.replace("{separator}", DETAILS_SEPARATOR));
        prompt.push_str("\n\n");
        prompt.push_str(match self.level {
            EnglishLevel::Simple => "Keep explanations simple and clear, using short sentences.",
            EnglishLevel::Average => {
                "Use moderate depth, providing both meaning and subtle differences."
            }
            EnglishLevel::Proficient => {
                "Include detailed linguistic nuances, idiomatic usage, and tone differences."
            }
        });
        prompt.push('\n');
        prompt
    }

    /// Prompt for the synonym tool
    pub fn synonyms(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(&format!(
            "For each word in this list: \"{}\", provide a detailed synonym analysis.\n\n",
            self.word_list()
        ));
        prompt.push_str(SYNONYM_FORMAT);
        prompt.push_str("\n\n");
        prompt.push_str(match self.level {
            EnglishLevel::Simple => "Use simple vocabulary and avoid complex sentence structures.",
            EnglishLevel::Average => {
                "Use moderately challenging vocabulary suitable for intermediate learners."
            }
            EnglishLevel::Proficient => {
                "Use rich and nuanced language appropriate for advanced learners."
            }
        });
        prompt.push('\n');
        prompt
    }

    /// Prompt for the etymology tool; only the first term is used
    pub fn etymology(&self) -> String {
        let word = self.terms.first().map(String::as_str).unwrap_or_default();
        let mut prompt = String::new();
        prompt.push_str(&format!("Analyze the etymology of the word \"{}\".\n\n", word));
        prompt.push_str(ETYMOLOGY_FORMAT.replace("{word}", word).as_str());
        prompt
    }
}

const DEFINITION_FORMAT: &str = r#"For EACH word, return EXACTLY this format (separate each word with TWO blank lines):

word | part of speech
Level: <B1/B2/C1>   # OPTIONAL - include if you can estimate CEFR level
uk /phonetic/ us /phonetic/
Definition: clear definition in plain text
- Example sentence 1
- Example sentence 2
"#;

const DEFINITION_REMINDER: &str = "- Each word must have its own complete block
- Use exactly TWO blank lines between each word definition.";

const COMPARISON_FORMAT: &str = r#"**Response Format (Strict):**
1.  **Key Difference:** Start with a single, concise sentence that summarizes the absolute main difference. (No Markdown in this section)
2.  **Separator:** After that sentence, insert the exact separator: "{separator}" on its own line.
3.  **Detailed Analysis:** After the separator, provide a full, detailed analysis formatted in Markdown. In this section:
    - Use a Level 2 Heading (e.g., '## Word') for each word.
    - Use Markdown bold ('**Usage:**') for subheadings.
    - **CRITICAL: Throughout your explanations, wrap the most important keywords and concepts in HTML <mark> tags to highlight them.**
    - Conclude with a final '## Comparison Table'."#;

const SYNONYM_FORMAT: &str = r#"**Formatting Rules:**
- **USE MARKDOWN** for the entire response.
- For each word, create a Level 2 Heading (e.g., '## Happy').
- Under each heading, provide the following sections with bolded labels:
  - '**Synonyms:**' A comma-separated list of 5-7 relevant synonyms.
  - '**Usage Notes:**' A brief paragraph explaining the nuances.
  - '**Examples:**' A bulleted list with two sentences.
- **CRITICAL: Throughout "Usage Notes" and "Examples", wrap important keywords in HTML <mark> tags to highlight them.**"#;

const ETYMOLOGY_FORMAT: &str = r#"You MUST return your response as a single, minified JSON object.
Do NOT include any text, notes, or markdown formatting outside of the JSON object.

The JSON object must match this exact structure:
{
  "word": "{word}",
  "languageOfOrigin": "e.g., Latin, Old French",
  "rootWord": "The original root word and its meaning",
  "firstKnownUse": "e.g., 14th Century",
  "explanation": "A concise, engaging story about the word's journey.",
  "timeline": [
    { "period": "e.g., 12th Century", "change": "Description of the word's form and meaning during this period." },
    { "period": "e.g., 14th Century", "change": "Description of its entry into English and any changes." }
  ]
}
"#;
