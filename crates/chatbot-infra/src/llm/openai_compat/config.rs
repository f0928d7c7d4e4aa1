//! Configuration and defaults for OpenAI-compatible providers.

use secrecy::SecretString;

use chatbot_types::config::ModelConfig;

/// Provider name reported for the DashScope compatible-mode endpoint.
pub const DASHSCOPE_PROVIDER: &str = "dashscope";

/// DashScope compatible-mode base URL.
pub const DASHSCOPE_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "dashscope").
    pub provider_name: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Credential, if one was found. Checked on every call.
    pub api_key: Option<SecretString>,
    /// Environment variable the credential is read from, for error messages.
    pub api_key_env: String,
    /// Model identifier (e.g., "qwen-plus").
    pub model: String,
}

impl OpenAiCompatConfig {
    /// Build from the `[model]` config section.
    ///
    /// The provider name is `dashscope` for the DashScope endpoint and the
    /// URL host otherwise.
    pub fn from_model_config(config: &ModelConfig, api_key: Option<SecretString>) -> Self {
        Self {
            provider_name: provider_name_for(&config.base_url),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            model: config.model.clone(),
        }
    }
}

/// DashScope default configuration.
pub fn dashscope_defaults(api_key: Option<SecretString>, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: DASHSCOPE_PROVIDER.into(),
        base_url: DASHSCOPE_BASE_URL.into(),
        api_key,
        api_key_env: "DASHSCOPE_API_KEY".into(),
        model: model.into(),
    }
}

fn provider_name_for(base_url: &str) -> String {
    if base_url.contains("dashscope.aliyuncs.com") {
        return DASHSCOPE_PROVIDER.to_string();
    }
    base_url
        .split("://")
        .nth(1)
        .and_then(|rest| rest.split(['/', ':']).next())
        .filter(|host| !host.is_empty())
        .unwrap_or("openai-compatible")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashscope_defaults() {
        let config = dashscope_defaults(None, "qwen-plus");
        assert_eq!(config.provider_name, "dashscope");
        assert_eq!(config.base_url, "https://dashscope.aliyuncs.com/compatible-mode/v1");
        assert_eq!(config.api_key_env, "DASHSCOPE_API_KEY");
        assert_eq!(config.model, "qwen-plus");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_from_default_model_config() {
        let config = OpenAiCompatConfig::from_model_config(&ModelConfig::default(), None);
        assert_eq!(config.provider_name, "dashscope");
        assert_eq!(config.model, "qwen-plus");
    }

    #[test]
    fn test_custom_endpoint_named_by_host() {
        let model = ModelConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..ModelConfig::default()
        };
        let config = OpenAiCompatConfig::from_model_config(&model, None);
        assert_eq!(config.provider_name, "localhost");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }
}
