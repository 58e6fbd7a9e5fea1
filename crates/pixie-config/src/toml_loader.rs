//! TOML config file loading and creation.

use crate::schema::PixieConfig;
use crate::validation;
use pixie_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
/// After loading, the config is validated; if validation fails, a warning
/// is logged and the default config is returned.
pub fn load_from_path(path: &Path) -> Result<PixieConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let config: PixieConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(PixieConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/pixie/config.toml`
/// On Linux: `~/.config/pixie/config.toml`
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<PixieConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(PixieConfig::default());
    }

    load_from_path(&path)
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("pixie").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// Generate the default TOML config content with comments.
fn default_config_toml() -> String {
    r##"# Pixie Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# The API key is never read from this file: export OPENAI_API_KEY instead.

[api]
# endpoint = "https://api.openai.com/v1/chat/completions"
# model = "gpt-4"
# max_tokens = 200          # 1-4096
# temperature = 0.9         # 0.0-2.0
# presence_penalty = 0.2    # -2.0-2.0
# frequency_penalty = 0.1   # -2.0-2.0
# top_p = 0.95              # 0.0-1.0
# timeout_secs = 60         # 1-600
# connect_timeout_secs = 10 # 1-600

[chat]
# history_window = 10       # 1-50 prior turns sent with each message

[profile]
# user_name = "Alex Rivera"
# user_avatar_url = "https://i.ibb.co/ynHmvpkJ/tail.jpg"
# assistant_name = "Enchanted Friend"
# assistant_avatar_url = "https://i.ibb.co/TBTK5JJY/tail.jpg"

[logging]
# level = "pixie=info"      # any tracing-subscriber filter directive
"##
    .to_string()
}
