//! Per-tool request flow
//!
//! ```text
//! Idle ──begin──▶ Requesting ──complete──▶ Parsing ──▶ Ready
//!                     │                        │
//!                     └── upstream / empty ────┴──▶ Error
//! Ready | Error ──begin──▶ Requesting (previous results cleared)
//! ```
//!
//! Every request gets a monotonic [`RequestId`]. Only the response for the
//! latest request is applied; anything older is rejected as stale.

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::normalize::parse_terms;
use crate::tools::{RoundTrip, Tool};
use crate::types::{ExtractionWarning, ToolResult};
use chrono::{DateTime, Utc};
use definecraft_domain::traits::CompletionProvider;
use definecraft_domain::RequestId;
use std::fmt;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Where a session is in its request flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowState {
    /// Nothing requested yet
    Idle,
    /// Waiting for the completion service
    Requesting,
    /// Response received, being parsed
    Parsing,
    /// Results available
    Ready,
    /// The last request failed
    Error,
}

/// A started request, handed to whoever performs the completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    /// Identifier to pass back to [`ToolSession::complete`]
    pub id: RequestId,

    /// Normalized terms
    pub terms: Vec<String>,

    /// Prompt to send
    pub prompt: String,
}

struct InFlight {
    id: RequestId,
    terms: Vec<String>,
}

/// One tool instance with its provider, state and latest result
pub struct ToolSession<T, P>
where
    T: Tool,
{
    tool: T,
    provider: Arc<P>,
    config: ExtractorConfig,
    state: FlowState,
    next_id: Option<RequestId>,
    in_flight: Option<InFlight>,
    result: Option<ToolResult<T::Output>>,
    last_error: Option<ExtractorError>,
}

impl<T, P> ToolSession<T, P>
where
    T: Tool,
{
    /// Create a session, validating the configuration
    pub fn new(tool: T, provider: P, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            tool,
            provider: Arc::new(provider),
            config,
            state: FlowState::Idle,
            next_id: Some(RequestId::first()),
            in_flight: None,
            result: None,
            last_error: None,
        })
    }

    /// Current state
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Latest result, if the session is `Ready`
    pub fn result(&self) -> Option<&ToolResult<T::Output>> {
        self.result.as_ref()
    }

    /// Error that put the session into `Error`
    pub fn last_error(&self) -> Option<&ExtractorError> {
        self.last_error.as_ref()
    }

    /// Request currently awaiting a response
    pub fn pending_request(&self) -> Option<RequestId> {
        self.in_flight.as_ref().map(|f| f.id)
    }

    /// The tool this session runs
    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// Session configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Normalize and validate input, then start a new request
    ///
    /// Validation errors leave the session untouched. On success previous
    /// results are cleared and any older request becomes stale.
    pub fn begin(&mut self, raw_input: &str) -> Result<RequestTicket, ExtractorError> {
        let length = raw_input.chars().count();
        if length > self.config.max_input_length {
            return Err(ExtractorError::InputTooLong(length, self.config.max_input_length));
        }

        let terms = parse_terms(raw_input);
        let min = self.tool.min_terms();
        if terms.len() < min {
            return Err(ExtractorError::Validation(format!(
                "{} needs at least {} word(s), got {}",
                self.tool.kind(),
                min,
                terms.len()
            )));
        }
        if let Some(max) = self.tool.max_terms() {
            if terms.len() > max {
                return Err(ExtractorError::Validation(format!(
                    "{} takes at most {} word(s), got {}",
                    self.tool.kind(),
                    max,
                    terms.len()
                )));
            }
        }

        if let Some(previous) = &self.in_flight {
            debug!("Request {} superseded", previous.id);
        }

        let id = self.next_id.ok_or_else(|| {
            ExtractorError::Validation("Request ids exhausted; start a new session".to_string())
        })?;
        self.next_id = id.next();
        let prompt = self.tool.build_prompt(&terms, self.config.english_level);

        self.result = None;
        self.last_error = None;
        self.state = FlowState::Requesting;
        self.in_flight = Some(InFlight {
            id,
            terms: terms.clone(),
        });

        info!(
            "Starting {} request {} for {} term(s), prompt length {}",
            self.tool.kind(),
            id,
            terms.len(),
            prompt.len()
        );

        Ok(RequestTicket { id, terms, prompt })
    }

    /// Apply the completion outcome for request `id`
    ///
    /// Responses for any request other than the latest are rejected with
    /// `StaleResponse` and change nothing.
    pub fn complete(
        &mut self,
        id: RequestId,
        response: Result<String, String>,
    ) -> Result<ToolResult<T::Output>, ExtractorError> {
        let terms = match self.in_flight.take() {
            Some(flight) if flight.id == id => flight.terms,
            other => {
                self.in_flight = other;
                warn!("Discarding stale response for {}", id);
                return Err(ExtractorError::StaleResponse(id));
            }
        };

        let response = match response {
            Ok(response) => response,
            Err(message) => return Err(self.fail(ExtractorError::Upstream(message))),
        };
        if response.trim().is_empty() {
            return Err(self.fail(ExtractorError::EmptyResponse));
        }

        self.state = FlowState::Parsing;
        debug!("Response length: {} chars", response.len());

        let mut outcome = self.tool.parse(&response, &terms);
        let record_count = self.tool.record_count(&outcome.output);
        if record_count == 0 {
            warn!("Parsing failed, but a response was received; keeping raw text");
            outcome.warnings.push(ExtractionWarning::NoRecordsExtracted);
        }

        info!(
            "{} request {} complete: {} record(s), {} warning(s)",
            self.tool.kind(),
            id,
            record_count,
            outcome.warnings.len()
        );

        let result = ToolResult {
            request_id: Some(id),
            output: outcome.output,
            record_count,
            warnings: outcome.warnings,
            raw_response: response,
        };
        self.state = FlowState::Ready;
        self.result = Some(result.clone());
        Ok(result)
    }

    fn fail(&mut self, error: ExtractorError) -> ExtractorError {
        warn!("{} request failed: {}", self.tool.kind(), error);
        self.state = FlowState::Error;
        self.result = None;
        self.last_error = Some(error.clone());
        error
    }
}

impl<T, P> ToolSession<T, P>
where
    T: Tool,
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: fmt::Display,
{
    /// Start a request, call the provider and apply its response
    pub async fn submit(&mut self, raw_input: &str) -> Result<ToolResult<T::Output>, ExtractorError> {
        let ticket = self.begin(raw_input)?;
        debug!("Calling {} for request {}", self.provider.model_name(), ticket.id);

        let response = match timeout(self.config.response_timeout(), self.call_provider(ticket.prompt))
            .await
        {
            Ok(response) => response,
            Err(_) => {
                self.in_flight = None;
                return Err(self.fail(ExtractorError::Timeout));
            }
        };

        self.complete(ticket.id, response)
    }

    async fn call_provider(&self, prompt: String) -> Result<String, String> {
        let provider = Arc::clone(&self.provider);

        // Call in a blocking context since CompletionProvider is not async
        tokio::task::spawn_blocking(move || provider.generate(&prompt).map_err(|e| e.to_string()))
            .await
            .map_err(|e| format!("Task join error: {}", e))?
    }
}

impl<T, P> ToolSession<T, P>
where
    T: RoundTrip,
{
    /// Export the current result
    pub fn export(&self, generated_at: &DateTime<Utc>) -> Result<String, ExtractorError> {
        let result = self
            .result
            .as_ref()
            .filter(|r| r.record_count > 0)
            .ok_or_else(|| ExtractorError::Validation("Nothing to export".to_string()))?;
        Ok(self.tool.export(&result.output, generated_at))
    }

    /// Replace the current result with the contents of an export file
    ///
    /// A failed import changes nothing. A successful one cancels any request
    /// still in flight.
    pub fn import(&mut self, text: &str) -> Result<&ToolResult<T::Output>, ExtractorError> {
        let output = self.tool.import(text)?;

        if let Some(flight) = self.in_flight.take() {
            info!("Import cancels in-flight request {}", flight.id);
        }
        let record_count = self.tool.record_count(&output);

        self.state = FlowState::Ready;
        self.last_error = None;
        Ok(&*self.result.insert(ToolResult {
            request_id: None,
            output,
            record_count,
            warnings: Vec::new(),
            raw_response: String::new(),
        }))
    }
}
