//! Integration tests for the tool sessions

#[cfg(test)]
mod tests {
    use crate::{
        CompareTool, DefineTool, EnglishLevel, EtymologyTool, ExtractionWarning, ExtractorConfig,
        ExtractorError, FlowState, SynonymTool, ToolSession,
    };
    use chrono::{TimeZone, Utc};
    use definecraft_domain::traits::CompletionProvider;
    use definecraft_domain::RequestId;
    use definecraft_llm::{LlmError, MockProvider};
    use std::time::Duration;

    const SCENARIO: &str = "happy | adjective\nuk /ˈhæpi/ us /ˈhæpi/\nDefinition: feeling pleasure.\n- I am happy.\n\n\njoyful | adjective\nDefinition: full of joy.\n- She felt joyful.";

    fn session<T: crate::Tool>(tool: T, llm: MockProvider) -> ToolSession<T, MockProvider> {
        ToolSession::new(tool, llm, ExtractorConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_full_definition_flow() {
        let llm = MockProvider::new(SCENARIO);
        let probe = llm.clone();
        let mut session = session(DefineTool, llm);
        assert_eq!(session.state(), FlowState::Idle);

        let result = session.submit(" Happy,\njoyful ").await.unwrap();

        assert_eq!(session.state(), FlowState::Ready);
        assert_eq!(result.record_count, 2);
        assert!(result.warnings.is_empty());
        assert_eq!(result.output[0].word, "happy");
        assert_eq!(result.output[1].word, "joyful");
        assert_eq!(result.raw_response, SCENARIO);
        assert_eq!(result.request_id, Some(RequestId::first()));

        assert_eq!(probe.call_count(), 1);
        assert!(probe.prompts()[0].starts_with("Define these words: happy, joyful"));
    }

    #[tokio::test]
    async fn test_level_reaches_prompt() {
        let llm = MockProvider::new(SCENARIO);
        let probe = llm.clone();
        let config = ExtractorConfig::default().with_level(EnglishLevel::Simple);
        let mut session = ToolSession::new(DefineTool, llm, config).unwrap();

        session.submit("happy").await.unwrap();
        assert!(probe.prompts()[0].contains("5-year-old"));
    }

    #[tokio::test]
    async fn test_empty_response_is_an_error() {
        let mut session = session(DefineTool, MockProvider::new("  \n"));

        let result = session.submit("happy").await;

        assert_eq!(result, Err(ExtractorError::EmptyResponse));
        assert_eq!(session.state(), FlowState::Error);
        assert!(session.result().is_none());
        assert_eq!(session.last_error(), Some(&ExtractorError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_noise_response_is_kept_with_warning() {
        let response = "Sorry, I cannot help with that.";
        let mut session = session(DefineTool, MockProvider::new(response));

        let result = session.submit("happy").await.unwrap();

        assert_eq!(session.state(), FlowState::Ready);
        assert_eq!(result.output[0].word, "happy");
        assert_eq!(result.output[0].definition, response);
        assert_eq!(
            result.warnings,
            vec![ExtractionWarning::AmbiguousAlignment {
                terms: vec!["happy".to_string()]
            }]
        );
    }

    #[tokio::test]
    async fn test_zero_records_is_a_warning() {
        let response = "The word salary comes from Latin.";
        let mut session = session(EtymologyTool, MockProvider::new(response));

        let result = session.submit("salary").await.unwrap();

        assert_eq!(session.state(), FlowState::Ready);
        assert_eq!(result.record_count, 0);
        assert!(result.is_empty_extraction());
        assert_eq!(result.raw_response, response);
    }

    #[tokio::test]
    async fn test_upstream_error_passes_message_through() {
        let llm = MockProvider::failing(LlmError::classify("API_KEY_INVALID: check your key"));
        let mut session = session(DefineTool, llm);

        let result = session.submit("happy").await;

        assert_eq!(
            result,
            Err(ExtractorError::Upstream(
                "Invalid API key: API_KEY_INVALID: check your key".to_string()
            ))
        );
        assert_eq!(session.state(), FlowState::Error);
    }

    #[tokio::test]
    async fn test_validation_happens_before_the_call() {
        let llm = MockProvider::new("unused");
        let probe = llm.clone();
        let mut session = session(CompareTool, llm);

        let result = session.submit(" happy, HAPPY ").await;

        assert!(matches!(result, Err(ExtractorError::Validation(_))));
        assert_eq!(session.state(), FlowState::Idle);
        assert_eq!(probe.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_validation_keeps_previous_result() {
        let mut session = session(EtymologyTool, MockProvider::new(r#"{"word":"salary"}"#));
        session.submit("salary").await.unwrap();

        let result = session.submit("salary, wage").await;

        assert!(matches!(result, Err(ExtractorError::Validation(_))));
        assert_eq!(session.state(), FlowState::Ready);
        assert!(session.result().is_some());
    }

    #[test]
    fn test_input_too_long() {
        let config = ExtractorConfig {
            max_input_length: 5,
            ..ExtractorConfig::default()
        };
        let mut session = ToolSession::new(DefineTool, MockProvider::default(), config).unwrap();

        assert_eq!(
            session.begin("happy, glad"),
            Err(ExtractorError::InputTooLong(11, 5))
        );
        assert_eq!(session.state(), FlowState::Idle);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig {
            response_timeout_secs: 0,
            ..ExtractorConfig::default()
        };
        let result = ToolSession::new(DefineTool, MockProvider::default(), config);
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut session = session(DefineTool, MockProvider::default());

        let first = session.begin("happy").unwrap();
        let second = session.begin("joyful").unwrap();
        assert!(second.id > first.id);

        let stale = session.complete(first.id, Ok(SCENARIO.to_string()));
        assert_eq!(stale, Err(ExtractorError::StaleResponse(first.id)));
        assert_eq!(session.state(), FlowState::Requesting);
        assert_eq!(session.pending_request(), Some(second.id));

        let result = session
            .complete(second.id, Ok(SCENARIO.to_string()))
            .unwrap();
        assert_eq!(result.request_id, Some(second.id));
        assert_eq!(result.output[0].word, "joyful");
        assert_eq!(session.state(), FlowState::Ready);
    }

    #[test]
    fn test_completed_request_cannot_complete_twice() {
        let mut session = session(DefineTool, MockProvider::default());
        let ticket = session.begin("happy").unwrap();

        session.complete(ticket.id, Ok(SCENARIO.to_string())).unwrap();
        assert_eq!(
            session.complete(ticket.id, Ok(SCENARIO.to_string())),
            Err(ExtractorError::StaleResponse(ticket.id))
        );
        assert_eq!(session.state(), FlowState::Ready);
    }

    #[test]
    fn test_next_request_clears_results() {
        let mut session = session(DefineTool, MockProvider::default());
        let ticket = session.begin("happy").unwrap();
        session.complete(ticket.id, Ok(SCENARIO.to_string())).unwrap();
        assert!(session.result().is_some());

        let ticket = session.begin("glad").unwrap();
        assert_eq!(ticket.terms, vec!["glad"]);
        assert_eq!(session.state(), FlowState::Requesting);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_error_then_retry() {
        let mut session = session(DefineTool, MockProvider::default());
        let ticket = session.begin("happy").unwrap();
        let _ = session.complete(ticket.id, Err("network down".to_string()));
        assert_eq!(session.state(), FlowState::Error);

        let ticket = session.begin("happy").unwrap();
        assert!(session.last_error().is_none());
        session.complete(ticket.id, Ok(SCENARIO.to_string())).unwrap();
        assert_eq!(session.state(), FlowState::Ready);
    }

    #[test]
    fn test_export_then_import() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let mut session = session(DefineTool, MockProvider::default());
        assert!(matches!(session.export(&at), Err(ExtractorError::Validation(_))));

        let ticket = session.begin("happy, joyful").unwrap();
        let produced = session.complete(ticket.id, Ok(SCENARIO.to_string())).unwrap();
        let text = session.export(&at).unwrap();
        assert!(text.contains("GeneratedAt: 2024-05-01T12:30:00.000Z"));

        let mut other = self::session(DefineTool, MockProvider::default());
        let imported = other.import(&text).unwrap();
        assert_eq!(imported.output, produced.output);
        assert_eq!(imported.request_id, None);
        assert_eq!(other.state(), FlowState::Ready);
    }

    #[test]
    fn test_import_cancels_in_flight_request() {
        let mut session = session(SynonymTool, MockProvider::default());
        let ticket = session.begin("happy").unwrap();

        session
            .import("Word Synonym Analysis\n\n## Happy\n**Synonyms:** glad")
            .unwrap();
        assert_eq!(session.pending_request(), None);
        assert_eq!(
            session.complete(ticket.id, Ok("## Happy".to_string())),
            Err(ExtractorError::StaleResponse(ticket.id))
        );
        assert_eq!(session.result().map(|r| r.record_count), Some(1));
    }

    #[test]
    fn test_failed_import_changes_nothing() {
        let mut session = session(CompareTool, MockProvider::default());
        let result = session.import("Not an export");
        assert!(matches!(result, Err(ExtractorError::Format(_))));
        assert_eq!(session.state(), FlowState::Idle);
    }

    struct SlowProvider;

    impl CompletionProvider for SlowProvider {
        type Error = LlmError;

        fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
            std::thread::sleep(Duration::from_millis(1500));
            Ok(SCENARIO.to_string())
        }
    }

    #[tokio::test]
    async fn test_timeout() {
        let config = ExtractorConfig {
            response_timeout_secs: 1,
            ..ExtractorConfig::default()
        };
        let mut session = ToolSession::new(DefineTool, SlowProvider, config).unwrap();

        let result = session.submit("happy").await;

        assert_eq!(result, Err(ExtractorError::Timeout));
        assert_eq!(session.state(), FlowState::Error);
        assert_eq!(session.pending_request(), None);
    }
}
