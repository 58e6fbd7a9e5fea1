//! Chat-completions client struct, request building, and response parsing.

use crate::{AiError, AiResponse, Message, TokenUsage};

use super::config::OpenAiConfig;

/// Chat-completions API client.
pub struct OpenAiClient {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Build the JSON request body. Sampling values come from the config only.
    pub(crate) fn build_request_body(&self, messages: &[Message]) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "presence_penalty": self.config.presence_penalty,
            "frequency_penalty": self.config.frequency_penalty,
            "top_p": self.config.top_p,
        })
    }

    /// Parse a non-streaming response. The first choice must carry
    /// non-empty text content.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        let first = json["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .ok_or_else(|| AiError::MalformedResponse("no choices in response".to_string()))?;

        let content = first["message"]["content"].as_str().ok_or_else(|| {
            AiError::MalformedResponse("choices[0].message.content is not a string".to_string())
        })?;

        if content.trim().is_empty() {
            return Err(AiError::MalformedResponse("empty completion".to_string()));
        }

        let usage = TokenUsage {
            input_tokens: json["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
            output_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0),
        };

        Ok(AiResponse {
            content: content.to_string(),
            usage,
        })
    }
}
