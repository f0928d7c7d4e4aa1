//! Events of the streaming relay protocol.
//!
//! Each event is serialized as one SSE `data:` line:
//! `{"type":"chunk","data":{"content":"..."}}`. The transport appends the
//! `[DONE]` sentinel after `End`; an `Error` event is always the last one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire text of the stream-termination sentinel.
pub const DONE_SENTINEL: &str = "[DONE]";

/// One event emitted by the streaming relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RelayEvent {
    /// Sent before any model output. `message_id` is advisory: it is the
    /// user message id + 1 and may not match the row eventually written.
    Start { message_id: i64 },

    /// Exactly one fragment of assistant output, never repeated.
    Chunk { content: String },

    /// The assistant message was persisted.
    End {
        message_id: i64,
        created_at: DateTime<Utc>,
    },

    /// A failure after the stream opened. Nothing follows it.
    Error { code: u32, message: String },
}

impl RelayEvent {
    /// Whether the transport should follow this event with the sentinel.
    pub fn is_end(&self) -> bool {
        matches!(self, RelayEvent::End { .. })
    }
}
