//! Extraction behavior on whole responses

use definecraft_domain::DEFINITION_PLACEHOLDER;
use definecraft_extractor::{
    extract_definitions, normalize_terms, parse_terms, Alignment, DefineTool, Tool,
};
use proptest::prelude::*;

fn block(word: &str, i: usize) -> String {
    format!("{} | noun\nDefinition: Meaning number {}.\n- Example {}.", word, i, i)
}

proptest! {
    /// Property: N well-formed blocks in order give N records in term order
    #[test]
    fn test_one_record_per_block(words in proptest::collection::hash_set("[a-z]{3,8}", 1..6)) {
        let terms: Vec<String> = words.into_iter().map(|w| format!("zq{}", w)).collect();
        let response = terms
            .iter()
            .enumerate()
            .map(|(i, w)| block(w, i))
            .collect::<Vec<_>>()
            .join("\n\n\n");

        let extracted = extract_definitions(&response, &terms);

        prop_assert_eq!(extracted.len(), terms.len());
        for (i, (e, term)) in extracted.iter().zip(&terms).enumerate() {
            prop_assert_eq!(&e.record.word, term);
            prop_assert_eq!(e.alignment, Alignment::Content);
            prop_assert_eq!(e.record.definition.clone(), format!("Meaning number {}.", i));
        }
    }

    /// Property: every extracted definition is non-empty
    #[test]
    fn test_definition_never_empty(response in "[a-z|:\n -]{0,80}") {
        let terms = vec!["alpha".to_string(), "beta".to_string()];
        for e in extract_definitions(&response, &terms) {
            prop_assert!(!e.record.definition.trim().is_empty());
            prop_assert!(!e.record.word.is_empty());
        }
    }
}

#[test]
fn test_scenario_end_to_end() {
    let terms = parse_terms(" Happy,\njoyful ");
    assert_eq!(normalize_terms(" Happy,\njoyful "), "happy, joyful");

    let response = "happy | adjective\nuk /ˈhæpi/ us /ˈhæpi/\nDefinition: feeling pleasure.\n- I am happy.\n\n\njoyful | adjective\nDefinition: full of joy.\n- She felt joyful.";
    let outcome = DefineTool.parse(response, &terms);

    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.output.len(), 2);
    assert_eq!(outcome.output[0].uk_phonetic.as_deref(), Some("ˈhæpi"));
    assert_eq!(outcome.output[1].examples, vec!["She felt joyful."]);
}

#[test]
fn test_missing_fields_never_drop_records() {
    let terms = parse_terms("calm, brave");
    let response = "calm | adjective\n\n\nbrave";

    let extracted = extract_definitions(response, &terms);

    // A lone word is not a record marker, so "brave" is reached by raw fallback
    assert_eq!(extracted.len(), 2);
    assert_eq!(extracted[0].record.word, "calm");
    assert_eq!(extracted[0].alignment, Alignment::Content);
    assert_eq!(extracted[1].record.word, "brave");
    assert_eq!(extracted[1].alignment, Alignment::RawFallback);
    assert!(extracted
        .iter()
        .all(|e| e.record.definition == DEFINITION_PLACEHOLDER && !e.record.has_phonetics()));
}

#[test]
fn test_preamble_is_ignored() {
    let terms = parse_terms("happy");
    let response = "Sure! Here are the definitions you asked for.\n\nhappy | adjective\nDefinition: glad.";

    let extracted = extract_definitions(response, &terms);
    assert_eq!(extracted.len(), 1);
    assert_eq!(extracted[0].record.definition, "glad.");
    assert_eq!(extracted[0].alignment, Alignment::Content);
}
