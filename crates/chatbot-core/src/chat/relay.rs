//! Streaming relay task.
//!
//! Drives `ModelClient::complete_streaming` in a detached task and forwards
//! each fragment to the client as a [`RelayEvent`] over a bounded channel.
//! The accumulated text becomes the assistant message once the model
//! finishes. Dropping the receiving end is the cancellation signal: the
//! relay stops pulling fragments but still persists what it has.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, info, warn};

use chatbot_types::chat::MessageRole;
use chatbot_types::error::ChatError;
use chatbot_types::llm::{LlmError, Message};
use chatbot_types::relay::RelayEvent;

use crate::chat::repository::ConversationRepository;
use crate::chat::service::spawn_touch;
use crate::llm::client::ModelClient;

/// Relay events in emission order. Ends after `End` or `Error`.
pub type RelayStream = ReceiverStream<RelayEvent>;

/// Events buffered between the relay task and a slow client.
const RELAY_BUFFER: usize = 32;

/// How a relay run finished, for logging.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Completed,
    Disconnected,
    Failed,
}

/// Spawn the relay task for one turn and return its event stream.
///
/// `start_id` is announced in the `start` event before any model output.
pub fn spawn_relay<R: ConversationRepository + 'static>(
    repo: Arc<R>,
    model: ModelClient,
    conversation_id: i64,
    start_id: i64,
    context: Vec<Message>,
) -> RelayStream {
    let (tx, rx) = mpsc::channel(RELAY_BUFFER);

    tokio::spawn(async move {
        let outcome = run(repo, model, conversation_id, start_id, context, tx).await;
        debug!(conversation_id, ?outcome, "Relay finished");
    });

    ReceiverStream::new(rx)
}

async fn run<R: ConversationRepository + 'static>(
    repo: Arc<R>,
    model: ModelClient,
    conversation_id: i64,
    start_id: i64,
    context: Vec<Message>,
    tx: mpsc::Sender<RelayEvent>,
) -> Outcome {
    if tx
        .send(RelayEvent::Start {
            message_id: start_id,
        })
        .await
        .is_err()
    {
        return Outcome::Disconnected;
    }

    let mut fragments = model.complete_streaming(context);
    let mut accumulated = String::new();
    let mut disconnected = false;

    loop {
        let next = tokio::select! {
            next = fragments.next() => next,
            _ = tx.closed() => {
                disconnected = true;
                break;
            }
        };

        match next {
            None => break,
            Some(Ok(fragment)) => {
                accumulated.push_str(&fragment);
                if tx.send(RelayEvent::Chunk { content: fragment }).await.is_err() {
                    disconnected = true;
                    break;
                }
            }
            Some(Err(e)) => {
                error!(conversation_id, error = %e, "Model stream failed");
                send_error(&tx, ChatError::Model(e)).await;
                return Outcome::Failed;
            }
        }
    }
    drop(fragments);

    if disconnected {
        info!(
            conversation_id,
            chars = accumulated.chars().count(),
            "Client disconnected mid-stream"
        );
        if !accumulated.is_empty() {
            match repo
                .append_message(conversation_id, MessageRole::Assistant, &accumulated)
                .await
            {
                Ok(_) => spawn_touch(repo, conversation_id),
                Err(e) => {
                    warn!(conversation_id, error = %e, "Failed to persist partial reply")
                }
            }
        }
        return Outcome::Disconnected;
    }

    if accumulated.is_empty() {
        error!(conversation_id, "Model stream ended without output");
        send_error(&tx, ChatError::Model(LlmError::EmptyResponse)).await;
        return Outcome::Failed;
    }

    let assistant_message = match repo
        .append_message(conversation_id, MessageRole::Assistant, &accumulated)
        .await
    {
        Ok(message) => message,
        Err(e) => {
            error!(conversation_id, error = %e, "Failed to persist streamed reply");
            send_error(&tx, ChatError::Storage(e)).await;
            return Outcome::Failed;
        }
    };

    // The reply is stored; a client that left at this point misses only the
    // confirmation.
    let _ = tx
        .send(RelayEvent::End {
            message_id: assistant_message.id,
            created_at: assistant_message.created_at,
        })
        .await;

    spawn_touch(repo, conversation_id);
    Outcome::Completed
}

async fn send_error(tx: &mpsc::Sender<RelayEvent>, err: ChatError) {
    let _ = tx
        .send(RelayEvent::Error {
            code: err.code(),
            message: err.public_message(),
        })
        .await;
}
