//! Conversation and message types.
//!
//! A conversation is a titled container for an ordered sequence of
//! messages. Both are owned by the persistence layer; everything above it
//! works on request-scoped copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export MessageRole from llm module (it's used in both chat and llm contexts).
pub use crate::llm::MessageRole;

/// Title assigned to a conversation created without one.
///
/// Replaced by a derived title when the first message arrives.
pub const PLACEHOLDER_TITLE: &str = "新对话";

/// A conversation between the user and the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// Bumped on every message write, rename, or touch.
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Whether the title is still the creation-time placeholder.
    pub fn has_placeholder_title(&self) -> bool {
        self.title == PLACEHOLDER_TITLE
    }
}

/// A single persisted message within a conversation.
///
/// Messages are never mutated. History is ordered by the autoincrement
/// `id`, which follows insert order regardless of the wall clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub conversation_id: i64,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Result of one non-streaming turn: both persisted messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
}

/// Page/limit pair after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    /// Clamp raw values: `page >= 1`, `limit` in `[1, 100]`.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Row offset for this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_LIMIT)
    }
}

/// Pagination block returned alongside a conversation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: u64,
}

/// One page of conversations, most recently updated first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationPage {
    pub list: Vec<Conversation>,
    pub pagination: Pagination,
}
