//! Model context assembly.

use chatbot_types::chat::ChatMessage;
use chatbot_types::llm::Message;

/// System instruction used when none is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Build the model context: the system instruction followed by the full
/// history in stored order.
pub fn build_context(system_prompt: &str, history: &[ChatMessage]) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(Message::system(system_prompt));
    messages.extend(history.iter().map(|m| Message {
        role: m.role,
        content: m.content.clone(),
    }));
    messages
}
