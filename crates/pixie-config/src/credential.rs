//! API credential gate.
//!
//! The bearer key comes only from the environment and is read once at
//! start-up. A missing key, a blank key, or the placeholder value shipped in
//! sample `.env` files all mean "not configured": the front end must show the
//! configuration-required screen instead of the chat.

use pixie_common::ConfigError;

/// Environment variable holding the completion API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Value found in sample `.env` files; never a usable key.
pub const API_KEY_PLACEHOLDER: &str = "your-openai-api-key-here";

/// Check a raw credential value and return the usable key.
pub fn resolve_api_key(value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(key) => {
            let key = key.trim();
            if key.is_empty() || key == API_KEY_PLACEHOLDER {
                Err(ConfigError::MissingCredential(API_KEY_ENV.into()))
            } else {
                Ok(key.to_string())
            }
        }
        None => Err(ConfigError::MissingCredential(API_KEY_ENV.into())),
    }
}

/// Read and check [`API_KEY_ENV`] from the process environment.
pub fn api_key_from_env() -> Result<String, ConfigError> {
    resolve_api_key(std::env::var(API_KEY_ENV).ok())
}
