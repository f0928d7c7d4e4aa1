//! Model credential loading and validation.
//!
//! The credential lives in an environment variable (named by
//! `model.api_key_env`) and is held as a [`SecretString`] from the moment
//! it is read. Validation never echoes the value.

use secrecy::{ExposeSecret, SecretString};

use chatbot_types::llm::LlmError;

/// Prefix every accepted credential carries.
pub const API_KEY_PREFIX: &str = "sk-";

/// Read the credential from `env_var`. Unset, non-Unicode, or blank values
/// count as absent. The value is kept verbatim, so surrounding whitespace
/// fails the prefix check.
pub fn load_api_key(env_var: &str) -> Option<SecretString> {
    match std::env::var(env_var) {
        Ok(value) if !value.trim().is_empty() => Some(SecretString::from(value)),
        _ => None,
    }
}

/// Check that a credential is present and well-formed.
pub fn validate_api_key(api_key: Option<&SecretString>, env_var: &str) -> Result<(), LlmError> {
    let key = api_key.ok_or_else(|| LlmError::MissingApiKey {
        env_var: env_var.to_string(),
    })?;

    if !key.expose_secret().starts_with(API_KEY_PREFIX) {
        return Err(LlmError::InvalidApiKey {
            expected_prefix: API_KEY_PREFIX.to_string(),
        });
    }

    Ok(())
}
