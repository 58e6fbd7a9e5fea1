//! Chat-completions client configuration.

use std::fmt;
use std::time::Duration;

use pixie_common::DEFAULT_ENDPOINT;

/// Endpoint, credential and fixed sampling parameters. Built once and handed
/// to [`super::OpenAiClient::new`]; nothing here varies per call.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub top_p: f64,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("presence_penalty", &self.presence_penalty)
            .field("frequency_penalty", &self.frequency_penalty)
            .field("top_p", &self.top_p)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: "gpt-4".to_string(),
            max_tokens: 200,
            temperature: 0.9,
            presence_penalty: 0.2,
            frequency_penalty: 0.1,
            top_p: 0.95,
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_penalties(mut self, presence: f64, frequency: f64) -> Self {
        self.presence_penalty = presence;
        self.frequency_penalty = frequency;
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_key() {
        let config = OpenAiConfig::new("sk-secret-value");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret-value"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("gpt-4"));
    }

    #[test]
    fn defaults_to_shared_endpoint() {
        assert_eq!(OpenAiConfig::new("k").endpoint, pixie_common::DEFAULT_ENDPOINT);
    }

    #[test]
    fn builders_override_defaults() {
        let config = OpenAiConfig::new("k")
            .with_endpoint("http://localhost:8080/v1/chat/completions")
            .with_model("gpt-4o-mini")
            .with_max_tokens(64)
            .with_temperature(0.2)
            .with_penalties(0.0, 0.5)
            .with_top_p(1.0)
            .with_timeouts(Duration::from_secs(2), Duration::from_secs(5));
        assert_eq!(config.endpoint, "http://localhost:8080/v1/chat/completions");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 64);
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.presence_penalty, 0.0);
        assert_eq!(config.frequency_penalty, 0.5);
        assert_eq!(config.top_p, 1.0);
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
