//! Full configuration validation.
//!
//! Validates sampling ranges, timeouts, the history window and the endpoint.

use crate::schema::PixieConfig;
use pixie_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &PixieConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    // API
    if !config.api.endpoint.starts_with("http://") && !config.api.endpoint.starts_with("https://")
    {
        errors.push(format!(
            "api.endpoint = {:?} must be an http(s) URL",
            config.api.endpoint
        ));
    }
    if config.api.model.trim().is_empty() {
        errors.push("api.model must not be empty".into());
    }
    validate_range(&mut errors, "api.max_tokens", config.api.max_tokens, 1, 4096);
    validate_range_f64(&mut errors, "api.temperature", config.api.temperature, 0.0, 2.0);
    validate_range_f64(
        &mut errors,
        "api.presence_penalty",
        config.api.presence_penalty,
        -2.0,
        2.0,
    );
    validate_range_f64(
        &mut errors,
        "api.frequency_penalty",
        config.api.frequency_penalty,
        -2.0,
        2.0,
    );
    validate_range_f64(&mut errors, "api.top_p", config.api.top_p, 0.0, 1.0);
    validate_range(&mut errors, "api.timeout_secs", config.api.timeout_secs, 1, 600);
    validate_range(
        &mut errors,
        "api.connect_timeout_secs",
        config.api.connect_timeout_secs,
        1,
        600,
    );

    // Chat
    validate_range(
        &mut errors,
        "chat.history_window",
        config.chat.history_window,
        1,
        50,
    );

    // Profile
    if config.profile.assistant_name.trim().is_empty() {
        errors.push("profile.assistant_name must not be empty".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range<T>(errors: &mut Vec<String>, name: &str, value: T, min: T, max: T)
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn validate_range_f64(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
