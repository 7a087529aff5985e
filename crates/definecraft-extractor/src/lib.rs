//! DefineCraft Extractor
//!
//! Turns free-text completion output into word records and back.
//!
//! # Overview
//!
//! The completion model is asked for a loose, human-readable layout and does
//! not always follow it. This crate recovers structured records from whatever
//! comes back, degrading field by field instead of rejecting the response, and
//! renders records into an export format that reads back to the same records.
//!
//! # Architecture
//!
//! ```text
//! raw input → normalize → terms → prompt → (completion service)
//!   response → segment → align (terms) → extract fields → records
//!   records  → export → text → import → records
//! ```
//!
//! # Key Features
//!
//! - **Normalization**: comma/newline word lists to ordered unique lowercase terms
//! - **Segmentation**: blank-line blocks, noise filtered, merged words truncated
//! - **Alignment**: one block per term, content match first, each match flagged
//! - **Field extraction**: named fallback strategies per field, never failing
//! - **Round trip**: canonical `---ENTRY---` export, legacy numbered import
//! - **Request flow**: per-tool state machine discarding stale responses
//!
//! # Example Usage
//!
//! ```no_run
//! use definecraft_extractor::{DefineTool, ExtractorConfig, ToolSession};
//! use definecraft_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = MockProvider::new("happy | adjective\nDefinition: feeling pleasure.");
//! let mut session = ToolSession::new(DefineTool, provider, ExtractorConfig::default())?;
//!
//! let result = session.submit(" Happy ").await?;
//! println!("Defined {} word(s)", result.record_count);
//!
//! let export = session.export(&chrono::Utc::now())?;
//! println!("{}", export);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod align;
mod comparison;
mod config;
mod definition;
mod error;
mod etymology;
mod export;
mod import;
mod lines;
mod normalize;
mod prompt;
mod segment;
mod session;
mod synonym;
mod tools;
mod types;

#[cfg(test)]
mod tests;

pub use align::{align, AlignedBlock, Alignment};
pub use comparison::{parse_comparison, DETAILS_SEPARATOR};
pub use config::{EnglishLevel, ExtractorConfig};
pub use definition::{extract_definition, extract_definitions};
pub use error::ExtractorError;
pub use etymology::{parse_etymology, parse_etymology_json};
pub use export::{
    export_comparison, export_definitions, export_synonyms, format_timestamp, COMPARISON_HEADER,
    DEFINITIONS_HEADER, ENTRY_DELIMITER, FORMAT_VERSION, SYNONYM_HEADER,
};
pub use import::{
    import_comparison, import_definitions, import_synonyms, read_metadata, ExportMetadata,
    IMPORT_PLACEHOLDER, NO_SUMMARY,
};
pub use normalize::{normalize_terms, parse_terms};
pub use prompt::PromptBuilder;
pub use segment::{is_potential_record, segment, truncate_merged, CandidateBlock, Segmentation};
pub use session::{FlowState, RequestTicket, ToolSession};
pub use synonym::{parse_synonyms, SECTION_HEADING};
pub use tools::{CompareTool, DefineTool, EtymologyTool, RoundTrip, SynonymTool, Tool, ToolKind};
pub use types::{ExtractedDefinition, ExtractionWarning, ParseOutcome, ToolResult};
