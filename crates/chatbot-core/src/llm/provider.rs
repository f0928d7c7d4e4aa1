//! LlmProvider trait definition.
//!
//! This is the core abstraction that all LLM providers implement.
//! Uses RPITIT for `complete` and `Pin<Box<dyn Stream>>` for `stream`
//! (streams need to be object-safe for the BoxLlmProvider wrapper).

use std::pin::Pin;

use futures_util::Stream;

use chatbot_types::llm::{CompletionRequest, CompletionResponse, LlmError, StreamEvent};

/// Boxed stream of provider events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for LLM provider backends.
///
/// Implementations live in chatbot-infra (e.g., `OpenAiCompatibleProvider`);
/// tests substitute deterministic fakes.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "dashscope").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// Send a streaming completion request. Returns a stream of events.
    ///
    /// Errors that happen before the first event (bad credential, refused
    /// connection) surface as the stream's first item.
    fn stream(&self, request: CompletionRequest) -> EventStream;

    /// Check that the provider is usable without calling it.
    fn check_credentials(&self) -> Result<(), LlmError>;
}
