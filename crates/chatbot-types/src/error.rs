use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in chatbot-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Failure of a chat operation, as seen by the transport layer.
///
/// `Storage` and `Model` carry the original cause for server-side logging;
/// clients only ever see a generic message for them.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("conversation not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("model error: {0}")]
    Model(#[from] LlmError),
}

impl ChatError {
    /// Envelope code for this error: 1001 invalid input, 1002 not found,
    /// 1003 internal.
    pub fn code(&self) -> u32 {
        match self {
            ChatError::InvalidInput(_) => 1001,
            ChatError::NotFound => 1002,
            ChatError::Storage(_) | ChatError::Model(_) => 1003,
        }
    }

    /// Message safe to show a client.
    pub fn public_message(&self) -> String {
        match self {
            ChatError::InvalidInput(msg) => msg.clone(),
            ChatError::NotFound => "conversation not found".to_string(),
            ChatError::Storage(_) => "storage operation failed".to_string(),
            ChatError::Model(_) => "model service call failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_chat_error_codes() {
        assert_eq!(ChatError::InvalidInput("x".into()).code(), 1001);
        assert_eq!(ChatError::NotFound.code(), 1002);
        assert_eq!(ChatError::from(RepositoryError::Connection).code(), 1003);
        assert_eq!(ChatError::from(LlmError::EmptyResponse).code(), 1003);
    }

    #[test]
    fn test_internal_errors_hide_cause() {
        let err = ChatError::from(RepositoryError::Query("disk I/O error at page 42".into()));
        assert!(err.to_string().contains("page 42"));
        assert!(!err.public_message().contains("page 42"));
    }
}
