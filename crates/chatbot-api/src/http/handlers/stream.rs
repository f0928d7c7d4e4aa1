//! SSE streaming message endpoint.
//!
//! POST /api/v1/conversations/{id}/messages/stream
//!
//! Validation, lookup, and the user-message write happen before the
//! response opens; their failures are ordinary envelope errors. After
//! that, every relay event becomes one unnamed SSE event whose `data` is
//! the event's JSON:
//! - `start` with the advisory assistant id
//! - `chunk` per model fragment
//! - `end` with the persisted assistant id, then a literal `[DONE]`
//! - `error` on failure, with nothing after it
//!
//! Closing the connection drops the relay receiver, which stops the model
//! stream and persists whatever text had arrived.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::StreamExt;
use tokio_stream::Stream;

use chatbot_types::relay::{RelayEvent, DONE_SENTINEL};

use crate::http::error::AppError;
use crate::http::extractors::json::ApiJson;
use crate::http::extractors::path::parse_id;
use crate::http::handlers::message::SendMessageRequest;
use crate::state::AppState;

/// POST /api/v1/conversations/{id}/messages/stream
pub async fn stream_message(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(body): ApiJson<SendMessageRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let content = body.validated_content()?;
    let id = parse_id(&raw_id)?;

    let mut relay = state.chat_service.stream_message(id, content).await?;
    tracing::debug!(conversation_id = id, "Relay stream opened");

    let sse_stream = async_stream::stream! {
        while let Some(event) = relay.next().await {
            let is_end = event.is_end();
            yield Ok::<_, Infallible>(to_sse_event(&event));
            if is_end {
                yield Ok(Event::default().data(DONE_SENTINEL));
                break;
            }
        }
    };

    Ok(Sse::new(sse_stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}

fn to_sse_event(event: &RelayEvent) -> Event {
    match serde_json::to_string(event) {
        Ok(json) => Event::default().data(json),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize relay event");
            Event::default().data(
                r#"{"type":"error","data":{"code":1003,"message":"failed to serialize event"}}"#,
            )
        }
    }
}

