//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! `ChatService` is generic over the repository trait; AppState pins it to the
//! SQLite implementation.

use std::path::PathBuf;
use std::sync::Arc;

use chatbot_core::chat::service::ChatService;
use chatbot_core::llm::client::ModelClient;
use chatbot_infra::config::resolve_database_url;
use chatbot_infra::llm::create_model_client;
use chatbot_infra::sqlite::chat::SqliteConversationRepository;
use chatbot_infra::sqlite::pool::DatabasePool;
use chatbot_types::config::ChatbotConfig;

/// Concrete type alias for the service generic pinned to the infra implementation.
pub type ConcreteChatService = ChatService<SqliteConversationRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<ChatbotConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, build the model
    /// client from config, wire services.
    pub async fn init(data_dir: PathBuf, config: ChatbotConfig) -> anyhow::Result<Self> {
        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = resolve_database_url(&config, &data_dir);
        let db_pool = DatabasePool::new(&db_url).await?;

        let model = create_model_client(&config.model);
        tracing::info!(
            provider = model.provider_name(),
            model = %config.model.model,
            "Model client configured"
        );

        Ok(Self::from_parts(db_pool, model, config, data_dir))
    }

    /// Wire state from already-built parts.
    pub fn from_parts(
        db_pool: DatabasePool,
        model: ModelClient,
        config: ChatbotConfig,
        data_dir: PathBuf,
    ) -> Self {
        let repo = SqliteConversationRepository::new(db_pool.clone());
        let chat_service = ChatService::new(
            Arc::new(repo),
            model,
            config.model.system_prompt.clone(),
        );

        Self {
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
            data_dir,
            db_pool,
        }
    }
}
