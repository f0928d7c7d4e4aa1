//! OpenAI SSE stream to [`StreamEvent`] adapter.
//!
//! Maps `async-openai`'s [`ChatCompletionResponseStream`] events to the
//! provider-agnostic [`StreamEvent`] enum defined in `chatbot-types`.

use futures_util::StreamExt;

use async_openai::types::chat::{ChatCompletionResponseStream, FinishReason};

use chatbot_core::llm::provider::EventStream;
use chatbot_types::llm::{LlmError, StreamEvent, Usage};

/// Map an async-openai [`ChatCompletionResponseStream`] to a stream of [`StreamEvent`]s.
///
/// The returned stream emits events in this order:
/// 1. `Connected`: immediately on entry
/// 2. `TextDelta`: for each non-empty text chunk of the first choice
/// 3. `Finished`: when a finish_reason appears
/// 4. `Usage`: token usage (requires `stream_options.include_usage = true` on request)
/// 5. `Done`: at the end of the stream
pub fn map_openai_stream(stream: ChatCompletionResponseStream) -> EventStream {
    Box::pin(async_stream::try_stream! {
        yield StreamEvent::Connected;

        let mut stream = stream;

        while let Some(result) = stream.next().await {
            let chunk = result.map_err(|e| LlmError::Stream(e.to_string()))?;

            // The final chunk carries usage with an empty choices array.
            if let Some(usage) = chunk.usage.as_ref() {
                yield StreamEvent::Usage(Usage {
                    input_tokens: usage.prompt_tokens,
                    output_tokens: usage.completion_tokens,
                });
            }

            let Some(choice) = chunk.choices.first() else {
                continue;
            };

            if let Some(text) = choice.delta.content.as_ref().filter(|t| !t.is_empty()) {
                yield StreamEvent::TextDelta { text: text.clone() };
            }

            if let Some(reason) = choice.finish_reason.as_ref() {
                yield StreamEvent::Finished {
                    reason: finish_reason_name(reason).to_string(),
                };
            }
        }

        yield StreamEvent::Done;
    })
}

/// Wire name of a finish reason.
pub(crate) fn finish_reason_name(reason: &FinishReason) -> &'static str {
    match reason {
        FinishReason::Stop => "stop",
        FinishReason::Length => "length",
        FinishReason::ToolCalls => "tool_calls",
        FinishReason::ContentFilter => "content_filter",
        FinishReason::FunctionCall => "function_call",
    }
}
