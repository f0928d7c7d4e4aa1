//! Chat service orchestrating conversations and message exchange.
//!
//! ChatService coordinates the ConversationRepository and the ModelClient:
//! listing and creating conversations, cascading deletes, and running one
//! user turn through the model either as a single response or as a relay
//! stream. Secondary writes (title rename, `updated_at` touch, message
//! cascade) never fail the request; they are logged and dropped.

use std::sync::Arc;

use chatbot_types::chat::{
    ChatMessage, Conversation, ConversationPage, Exchange, MessageRole, PageRequest, Pagination,
    PLACEHOLDER_TITLE,
};
use chatbot_types::error::ChatError;
use chatbot_types::llm::Message;
use tracing::{debug, info, warn};

use crate::chat::context::build_context;
use crate::chat::relay::{self, RelayStream};
use crate::chat::repository::ConversationRepository;
use crate::chat::title::derive_title;
use crate::llm::client::ModelClient;

/// Orchestrates conversation lifecycle and the message-exchange pipeline.
///
/// Generic over `ConversationRepository` so chatbot-core never depends on
/// chatbot-infra. The repository sits behind an `Arc` because detached
/// writes and the streaming relay outlive the request that started them.
pub struct ChatService<R: ConversationRepository + 'static> {
    repo: Arc<R>,
    model: ModelClient,
    system_prompt: String,
}

impl<R: ConversationRepository + 'static> ChatService<R> {
    pub fn new(repo: Arc<R>, model: ModelClient, system_prompt: impl Into<String>) -> Self {
        Self {
            repo,
            model,
            system_prompt: system_prompt.into(),
        }
    }

    /// Access the repository.
    pub fn repo(&self) -> &Arc<R> {
        &self.repo
    }

    /// Access the model client.
    pub fn model(&self) -> &ModelClient {
        &self.model
    }

    // --- Conversations ---

    /// One page of conversations, most recently updated first, with the
    /// total count.
    pub async fn list_conversations(&self, page: PageRequest) -> Result<ConversationPage, ChatError> {
        let total = self.repo.count_conversations().await?;
        let list = self
            .repo
            .list_conversations(page.limit, page.offset())
            .await?;

        Ok(ConversationPage {
            list,
            pagination: Pagination {
                page: page.page,
                limit: page.limit,
                total,
            },
        })
    }

    /// Create a conversation. Absent, empty, or whitespace-only titles get
    /// the placeholder.
    pub async fn create_conversation(&self, title: Option<String>) -> Result<Conversation, ChatError> {
        let title = match title {
            Some(t) if !t.trim().is_empty() => t,
            _ => PLACEHOLDER_TITLE.to_string(),
        };

        let conversation = self.repo.create_conversation(&title).await?;
        info!(conversation_id = conversation.id, "Conversation created");
        Ok(conversation)
    }

    /// Delete a conversation and its messages.
    pub async fn delete_conversation(&self, id: i64) -> Result<(), ChatError> {
        let removed = self.repo.delete_conversation(id).await?;
        if removed == 0 {
            return Err(ChatError::NotFound);
        }

        match self.repo.delete_messages(id).await {
            Ok(count) => debug!(conversation_id = id, count, "Message cascade complete"),
            Err(e) => warn!(conversation_id = id, error = %e, "Failed to delete conversation messages"),
        }

        info!(conversation_id = id, "Conversation deleted");
        Ok(())
    }

    /// All messages of a conversation in chronological order.
    pub async fn list_messages(&self, conversation_id: i64) -> Result<Vec<ChatMessage>, ChatError> {
        self.resolve(conversation_id).await?;
        Ok(self.repo.list_messages(conversation_id).await?)
    }

    // --- Message exchange ---

    /// Run one non-streaming turn and return both persisted messages.
    ///
    /// A model failure leaves the user message persisted with no reply.
    #[tracing::instrument(name = "send_message", skip(self, content))]
    pub async fn send_message(&self, conversation_id: i64, content: &str) -> Result<Exchange, ChatError> {
        let (user_message, context) = self.prepare_turn(conversation_id, content).await?;

        let reply = self.model.complete(context).await?;

        let assistant_message = self
            .repo
            .append_message(conversation_id, MessageRole::Assistant, &reply)
            .await?;

        spawn_touch(Arc::clone(&self.repo), conversation_id);

        Ok(Exchange {
            user_message,
            assistant_message,
        })
    }

    /// Run one streaming turn.
    ///
    /// Validation, lookup, and the user-message write happen before this
    /// returns, so their failures are ordinary errors. Everything after is
    /// reported in-band on the returned stream.
    #[tracing::instrument(name = "stream_message", skip(self, content))]
    pub async fn stream_message(
        &self,
        conversation_id: i64,
        content: &str,
    ) -> Result<RelayStream, ChatError> {
        let (user_message, context) = self.prepare_turn(conversation_id, content).await?;

        Ok(relay::spawn_relay(
            Arc::clone(&self.repo),
            self.model.clone(),
            conversation_id,
            user_message.id + 1,
            context,
        ))
    }

    /// Verify storage is reachable.
    pub async fn health(&self) -> Result<(), ChatError> {
        Ok(self.repo.ping().await?)
    }

    /// Validate, resolve, rename if needed, persist the user message, and
    /// build the model context from the full history.
    async fn prepare_turn(
        &self,
        conversation_id: i64,
        content: &str,
    ) -> Result<(ChatMessage, Vec<Message>), ChatError> {
        if content.trim().is_empty() {
            return Err(ChatError::InvalidInput(
                "message content must not be empty".to_string(),
            ));
        }

        let conversation = self.resolve(conversation_id).await?;

        if conversation.has_placeholder_title() {
            spawn_rename(Arc::clone(&self.repo), conversation_id, derive_title(content));
        }

        let user_message = self
            .repo
            .append_message(conversation_id, MessageRole::User, content)
            .await?;

        let history = self.repo.list_messages(conversation_id).await?;
        let context = build_context(&self.system_prompt, &history);
        debug!(conversation_id, context_len = context.len(), "Context assembled");

        Ok((user_message, context))
    }

    async fn resolve(&self, conversation_id: i64) -> Result<Conversation, ChatError> {
        self.repo
            .get_conversation(conversation_id)
            .await?
            .ok_or(ChatError::NotFound)
    }
}

/// Replace a placeholder title in the background.
fn spawn_rename<R: ConversationRepository + 'static>(repo: Arc<R>, conversation_id: i64, title: String) {
    tokio::spawn(async move {
        if let Err(e) = repo.rename_conversation(conversation_id, &title).await {
            warn!(conversation_id, error = %e, "Failed to rename conversation");
        }
    });
}

/// Bump `updated_at` in the background.
pub(crate) fn spawn_touch<R: ConversationRepository + 'static>(repo: Arc<R>, conversation_id: i64) {
    tokio::spawn(async move {
        if let Err(e) = repo.touch_conversation(conversation_id).await {
            warn!(conversation_id, error = %e, "Failed to touch conversation");
        }
    });
}
