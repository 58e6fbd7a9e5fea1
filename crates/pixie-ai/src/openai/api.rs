//! AiClient trait implementation for OpenAiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiClient, AiError, AiResponse, Message};

use super::client::OpenAiClient;

/// Longest slice of an error body carried in `AiError::ApiError`.
const ERROR_BODY_LIMIT: usize = 200;

#[async_trait]
impl AiClient for OpenAiClient {
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages);

        debug!(
            model = %self.config.model,
            messages = messages.len(),
            "Chat completion request"
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::NetworkError(format!("request timed out: {e}"))
                } else {
                    AiError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(ERROR_BODY_LIMIT).collect::<String>();
            return Err(AiError::ApiError {
                status: status.as_u16(),
                body: text,
            });
        }

        // A failed read is a transport problem; only bytes that arrived and
        // don't parse count as malformed.
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AiError::NetworkError(format!("failed to read response body: {e}")))?;
        let json: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| AiError::MalformedResponse(e.to_string()))?;

        self.parse_response(json)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;
    use crate::{OpenAiConfig, Role};

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// True once `buf` holds the headers and the whole body they announce.
    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(split) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..split]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        buf.len() >= split + 4 + content_length
    }

    /// Accept one connection on a loopback port, answer it with `response`
    /// verbatim, and hand back the raw request text.
    async fn serve_once(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf: Vec<u8> = Vec::new();
            let mut chunk = [0u8; 4096];
            while !request_complete(&buf) {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            let _ = stream.shutdown().await;
            String::from_utf8_lossy(&buf).into_owned()
        });
        (format!("http://{addr}/v1/chat/completions"), handle)
    }

    fn client_for(endpoint: &str) -> OpenAiClient {
        OpenAiClient::new(OpenAiConfig::new("sk-test").with_endpoint(endpoint)).unwrap()
    }

    fn hello() -> Vec<Message> {
        vec![Message {
            role: Role::User,
            content: "hello".into(),
        }]
    }

    #[tokio::test]
    async fn success_returns_content_and_sends_bearer_key() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Once upon a time..."}}],"usage":{"prompt_tokens":9,"completion_tokens":4}}"#;
        let (endpoint, server) = serve_once(http_response("200 OK", body)).await;

        let resp = client_for(&endpoint).send_message(&hello()).await.unwrap();
        assert_eq!(resp.content, "Once upon a time...");
        assert_eq!(resp.usage.total_tokens(), 13);

        let request = server.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /v1/chat/completions"));
        assert!(lower.contains("authorization: bearer sk-test"));
        assert!(request.contains(r#""model":"gpt-4""#));
        assert!(request.contains(r#""content":"hello""#));
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let (endpoint, server) =
            serve_once(http_response("500 Internal Server Error", "boom")).await;

        let err = client_for(&endpoint)
            .send_message(&hello())
            .await
            .unwrap_err();
        assert!(
            matches!(err, AiError::ApiError { status: 500, ref body } if body == "boom"),
            "got {err:?}"
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn long_error_body_is_truncated() {
        let long = "x".repeat(ERROR_BODY_LIMIT * 2);
        let (endpoint, server) = serve_once(http_response("401 Unauthorized", &long)).await;

        let err = client_for(&endpoint)
            .send_message(&hello())
            .await
            .unwrap_err();
        match err {
            AiError::ApiError { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body.len(), ERROR_BODY_LIMIT);
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn non_json_success_body_is_malformed() {
        let (endpoint, server) = serve_once(http_response("200 OK", "hello")).await;

        let err = client_for(&endpoint)
            .send_message(&hello())
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::MalformedResponse(_)), "got {err:?}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn body_cut_short_is_network_error() {
        let response = "HTTP/1.1 200 OK\r\n\
                        Content-Type: application/json\r\n\
                        Content-Length: 100\r\n\r\n{\"choi"
            .to_string();
        let (endpoint, server) = serve_once(response).await;

        let err = client_for(&endpoint)
            .send_message(&hello())
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::NetworkError(_)), "got {err:?}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = format!("http://{addr}/v1/chat/completions");
        let err = client_for(&endpoint)
            .send_message(&hello())
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::NetworkError(_)), "got {err:?}");
    }
}
