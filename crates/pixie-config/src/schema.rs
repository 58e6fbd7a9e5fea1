//! Configuration schema types for Pixie.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the values the chat was tuned with.

use pixie_common::{DEFAULT_ENDPOINT, DEFAULT_HISTORY_WINDOW};
use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

// =============================================================================
// API Config
// =============================================================================

/// Remote completion endpoint and the fixed sampling parameters sent with
/// every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub top_p: f64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u32,
    pub connect_timeout_secs: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            model: "gpt-4".into(),
            max_tokens: 200,
            temperature: 0.9,
            presence_penalty: 0.2,
            frequency_penalty: 0.1,
            top_p: 0.95,
            timeout_secs: 60,
            connect_timeout_secs: 10,
        }
    }
}

// =============================================================================
// Chat Config
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// How many prior turns are replayed to the model with each message.
    pub history_window: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

// =============================================================================
// Profile Config
// =============================================================================

/// Names and pictures shown in the chat header and next to bubbles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub user_name: Option<String>,
    pub user_avatar_url: Option<String>,
    pub assistant_name: String,
    pub assistant_avatar_url: Option<String>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            user_name: None,
            user_avatar_url: Some("https://i.ibb.co/ynHmvpkJ/tail.jpg".into()),
            assistant_name: "Enchanted Friend".into(),
            assistant_avatar_url: Some("https://i.ibb.co/TBTK5JJY/tail.jpg".into()),
        }
    }
}

// =============================================================================
// Logging Config
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "pixie=info".into(),
        }
    }
}

// =============================================================================
// Root
// =============================================================================

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PixieConfig {
    pub api: ApiConfig,
    pub chat: ChatConfig,
    pub profile: ProfileConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_values() {
        let config = PixieConfig::default();
        assert_eq!(config.api.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.api.model, "gpt-4");
        assert_eq!(config.api.max_tokens, 200);
        assert_eq!(config.api.temperature, 0.9);
        assert_eq!(config.api.presence_penalty, 0.2);
        assert_eq!(config.api.frequency_penalty, 0.1);
        assert_eq!(config.api.top_p, 0.95);
        assert_eq!(config.chat.history_window, 10);
        assert_eq!(config.chat.history_window, DEFAULT_HISTORY_WINDOW);
        assert_eq!(config.profile.assistant_name, "Enchanted Friend");
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: PixieConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.model, "gpt-4");
        assert_eq!(config.logging.level, "pixie=info");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: PixieConfig = toml::from_str(
            r#"
[api]
model = "gpt-4o-mini"
"#,
        )
        .unwrap();
        assert_eq!(config.api.model, "gpt-4o-mini");
        assert_eq!(config.api.max_tokens, 200);
        assert_eq!(config.chat.history_window, 10);
    }
}
