//! Conversation persistence port and the message-exchange pipeline.
//!
//! - `repository`: the `ConversationRepository` trait the infra layer implements
//! - `title`: display title derivation from the first message
//! - `context`: model context assembly from stored history
//! - `service`: `ChatService`, the non-streaming orchestrator
//! - `relay`: the streaming relay task behind `ChatService::stream_message`

pub mod context;
pub mod relay;
pub mod repository;
pub mod service;
pub mod title;
