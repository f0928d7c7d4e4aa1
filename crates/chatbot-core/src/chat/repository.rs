//! ConversationRepository trait definition.
//!
//! Typed operations over the conversations and messages tables. Follows
//! the RPITIT pattern (native async fn in traits, Rust 2024 edition).

use chatbot_types::chat::{ChatMessage, Conversation, MessageRole};
use chatbot_types::error::RepositoryError;

/// Repository trait for conversation and message persistence.
///
/// Implementations live in chatbot-infra (e.g., `SqliteConversationRepository`).
pub trait ConversationRepository: Send + Sync {
    /// Count all conversations.
    fn count_conversations(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// List conversations, most recently updated first.
    fn list_conversations(
        &self,
        limit: i64,
        offset: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, RepositoryError>> + Send;

    /// Insert a conversation with the given title.
    fn create_conversation(
        &self,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Conversation, RepositoryError>> + Send;

    /// Get a conversation by id.
    fn get_conversation(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// Delete a conversation. Returns the number of rows removed (0 or 1).
    fn delete_conversation(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Delete every message of a conversation. Returns the number removed.
    fn delete_messages(
        &self,
        conversation_id: i64,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Replace a conversation's title and bump `updated_at`.
    fn rename_conversation(
        &self,
        id: i64,
        title: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Set `updated_at` to now.
    fn touch_conversation(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a conversation's messages in chronological order.
    fn list_messages(
        &self,
        conversation_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Append a message; the id and timestamp are assigned by storage.
    fn append_message(
        &self,
        conversation_id: i64,
        role: MessageRole,
        content: &str,
    ) -> impl std::future::Future<Output = Result<ChatMessage, RepositoryError>> + Send;

    /// Cheap round-trip to verify storage is reachable.
    fn ping(&self) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
