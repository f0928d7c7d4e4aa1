//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](chatbot_core::llm::provider::LlmProvider)
//! implementation for OpenAI-compatible endpoints, credential handling, and
//! a factory ([`create_model_client`]) that wires both into a
//! [`ModelClient`] from the `[model]` config section.

pub mod credential;
pub mod openai_compat;

use secrecy::SecretString;

use chatbot_core::llm::box_provider::BoxLlmProvider;
use chatbot_core::llm::client::{ModelClient, ModelSettings};
use chatbot_types::config::ModelConfig;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Create a [`BoxLlmProvider`] for the configured endpoint.
///
/// The credential is optional here; the provider reports its absence on
/// every call.
pub fn create_provider(config: &ModelConfig, api_key: Option<SecretString>) -> BoxLlmProvider {
    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig::from_model_config(config, api_key));
    BoxLlmProvider::new(provider)
}

/// Create the [`ModelClient`] the chat service uses, reading the credential
/// from the environment variable named in the config.
pub fn create_model_client(config: &ModelConfig) -> ModelClient {
    let api_key = credential::load_api_key(&config.api_key_env);
    ModelClient::new(create_provider(config, api_key), ModelSettings::from(config))
}
