//! Text-in/text-out model client.
//!
//! `ModelClient` wraps a [`BoxLlmProvider`] with the configured model
//! settings and a deadline. It reduces the provider's event stream to
//! plain text fragments, which is all the chat pipeline needs.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{Stream, StreamExt};

use chatbot_types::config::ModelConfig;
use chatbot_types::llm::{CompletionRequest, LlmError, Message, StreamEvent};

use super::box_provider::BoxLlmProvider;

/// Finite, non-restartable stream of assistant text fragments.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>>;

/// Per-request model parameters.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    /// Deadline for a whole non-streaming call, and for the wait before
    /// each streamed fragment.
    pub timeout: Duration,
}

impl From<&ModelConfig> for ModelSettings {
    fn from(config: &ModelConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Cheaply cloneable handle to the completion provider.
#[derive(Clone)]
pub struct ModelClient {
    provider: Arc<BoxLlmProvider>,
    settings: ModelSettings,
}

impl ModelClient {
    pub fn new(provider: BoxLlmProvider, settings: ModelSettings) -> Self {
        Self {
            provider: Arc::new(provider),
            settings,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Check that the provider credential is present and well-formed.
    pub fn check_credentials(&self) -> Result<(), LlmError> {
        self.provider.check_credentials()
    }

    fn build_request(&self, messages: Vec<Message>, stream: bool) -> CompletionRequest {
        CompletionRequest {
            model: self.settings.model.clone(),
            messages,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            stream,
        }
    }

    fn timeout_error(&self) -> LlmError {
        LlmError::Timeout {
            timeout_secs: self.settings.timeout.as_secs(),
        }
    }

    /// Send the context and return the full text of the first choice.
    #[tracing::instrument(
        name = "model_complete",
        skip(self, messages),
        fields(provider = %self.provider.name(), model = %self.settings.model, context_len = messages.len())
    )]
    pub async fn complete(&self, messages: Vec<Message>) -> Result<String, LlmError> {
        let request = self.build_request(messages, false);

        let response = tokio::time::timeout(self.settings.timeout, self.provider.complete(&request))
            .await
            .map_err(|_| self.timeout_error())??;

        tracing::debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Completion received"
        );

        if response.content.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(response.content)
    }

    /// Same request with streaming enabled. Yields text fragments in arrival
    /// order; non-text provider events are dropped.
    pub fn complete_streaming(&self, messages: Vec<Message>) -> FragmentStream {
        let request = self.build_request(messages, true);
        let mut events = self.provider.stream(request);
        let timeout = self.settings.timeout;
        let timeout_secs = timeout.as_secs();

        Box::pin(async_stream::try_stream! {
            loop {
                let next = tokio::time::timeout(timeout, events.next())
                    .await
                    .map_err(|_| LlmError::Timeout { timeout_secs })?;

                match next {
                    None => break,
                    Some(event) => match event? {
                        StreamEvent::TextDelta { text } => {
                            if !text.is_empty() {
                                yield text;
                            }
                        }
                        StreamEvent::Usage(usage) => {
                            tracing::debug!(
                                input_tokens = usage.input_tokens,
                                output_tokens = usage.output_tokens,
                                "Streaming usage received"
                            );
                        }
                        StreamEvent::Done => break,
                        _ => {}
                    },
                }
            }
        })
    }
}
