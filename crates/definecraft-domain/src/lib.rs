//! DefineCraft Domain Layer
//!
//! This crate contains the record types produced by the DefineCraft tools and the
//! trait boundary to the text-completion service. It has ZERO external dependencies;
//! parsing, serialization and the completion client live in other crates.
//!
//! ## Key Concepts
//!
//! - **DefinitionRecord**: one defined word, keyed by its lowercase `word`
//! - **ComparisonRecord**: a one-line summary plus a markdown body
//! - **SynonymSection**: one markdown section per requested word, kept semi-structured
//! - **EtymologyRecord**: the history of a single word
//! - **RequestId**: monotonic identifier used to discard out-of-date responses
//!
//! ## Architecture
//!
//! Records are transient: created per request or per import, held in session
//! state, and replaced on the next request unless exported.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod record;
pub mod request;
pub mod traits;

// Re-exports for convenience
pub use record::{
    ComparisonRecord, DefinitionRecord, EtymologyRecord, SynonymSection, TimelineEntry,
    DEFINITION_PLACEHOLDER,
};
pub use request::RequestId;
