//! Export followed by import reproduces the records

use chrono::{TimeZone, Utc};
use definecraft_domain::{ComparisonRecord, DefinitionRecord, SynonymSection};
use definecraft_extractor::{
    export_comparison, export_definitions, export_synonyms, import_comparison,
    import_definitions, import_synonyms, read_metadata, ExtractorError, FORMAT_VERSION,
};
use proptest::prelude::*;

fn record_strategy() -> impl Strategy<Value = DefinitionRecord> {
    (
        "[a-z]{1,10}",
        proptest::option::of("[a-z]{3,10}( [a-z]{3,8})?"),
        proptest::option::of("[ABC][12]"),
        proptest::option::of("[a-zˈ.]{1,10}"),
        proptest::option::of("[a-zˈ.]{1,10}"),
        "[A-Za-z][a-z]{0,8}( [a-z]{1,8}){0,5}\\.",
        proptest::collection::vec("[A-Z][a-z]{1,8}( [a-z]{1,8}){0,4}\\.", 0..4),
    )
        .prop_map(
            |(word, part_of_speech, level, uk_phonetic, us_phonetic, definition, examples)| {
                DefinitionRecord {
                    word,
                    part_of_speech,
                    level,
                    uk_phonetic,
                    us_phonetic,
                    definition,
                    examples,
                }
            },
        )
}

proptest! {
    /// Property: import(export(records)) == records
    #[test]
    fn test_definitions_round_trip(records in proptest::collection::vec(record_strategy(), 1..6)) {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let text = export_definitions(&records, &at);
        let imported = import_definitions(&text).unwrap();
        prop_assert_eq!(imported, records);
    }

    /// Property: exporting an import gives the same text back
    #[test]
    fn test_export_is_stable(records in proptest::collection::vec(record_strategy(), 1..4)) {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let text = export_definitions(&records, &at);
        let again = export_definitions(&import_definitions(&text).unwrap(), &at);
        prop_assert_eq!(again, text);
    }
}

#[test]
fn test_metadata_survives() {
    let at = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
    let text = export_definitions(&[DefinitionRecord::new("a", "b")], &at);
    let metadata = read_metadata(&text).unwrap();

    assert_eq!(metadata.generated_at, Some(at));
    assert_eq!(metadata.version, Some(FORMAT_VERSION));
}

#[test]
fn test_placeholder_survives() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let records = vec![DefinitionRecord::new("quiet", "")];
    let imported = import_definitions(&export_definitions(&records, &at)).unwrap();
    assert!(imported[0].is_placeholder());
}

#[test]
fn test_wrong_header_fails_with_no_records() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let text = export_definitions(&[DefinitionRecord::new("a", "b")], &at);
    let tampered = text.replacen("Word Definitions", "Word Lists", 1);

    assert!(matches!(
        import_definitions(&tampered),
        Err(ExtractorError::Format(_))
    ));
}

#[test]
fn test_comparison_round_trip() {
    let record = ComparisonRecord::new(
        "Affect is usually a verb; effect is usually a noun.",
        "## Affect\n**Usage:** to influence.\n\n## Comparison Table\n| a | b |\n|---|---|",
    );
    assert_eq!(import_comparison(&export_comparison(&record)).unwrap(), record);

    let unsummarized = ComparisonRecord::unsummarized("Whole response.");
    assert_eq!(
        import_comparison(&export_comparison(&unsummarized)).unwrap(),
        unsummarized
    );
}

#[test]
fn test_synonym_round_trip() {
    let sections = vec![
        SynonymSection::new("## Happy\n**Synonyms:** glad, cheerful\n**Usage Notes:** general.\n**Examples:**\n- I am glad."),
        SynonymSection::new("## Sad\n**Synonyms:** unhappy and blue"),
    ];
    assert_eq!(import_synonyms(&export_synonyms(&sections)).unwrap(), sections);
}
