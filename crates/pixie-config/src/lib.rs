//! Pixie configuration system.
//!
//! Provides TOML-based configuration with validation and the API credential
//! gate. All config sections use sensible defaults so partial configs work
//! out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pixie_config::{api_key_from_env, load_config};
//!
//! let config = load_config(None).expect("failed to load config");
//! let key = api_key_from_env().expect("OPENAI_API_KEY not set");
//! println!("{} via {}", config.api.model, config.api.endpoint);
//! # let _ = key;
//! ```

pub mod credential;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use credential::{api_key_from_env, resolve_api_key, API_KEY_ENV, API_KEY_PLACEHOLDER};
pub use schema::{PixieConfig, CONFIG_SCHEMA_VERSION};

use pixie_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, or from `path` when given.
///
/// An explicit path that does not exist is an error; the default path is
/// created with a documented template on first run. A file that fails
/// validation yields the defaults, so the result is always valid.
pub fn load_config(path: Option<&Path>) -> Result<PixieConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &PixieConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
