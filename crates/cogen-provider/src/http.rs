//! OpenAI-compatible HTTP provider
//!
//! Talks to any `/chat/completions` endpoint (OpenAI, OpenRouter, local
//! gateways) and maps HTTP outcomes onto [`ProviderError`].

use crate::error::ProviderError;
use crate::provider::ModelProvider;
use crate::request::ProviderRequest;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default API base
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_MESSAGE: &str = "You are a senior Solidity engineer. \
Answer with exactly one complete, compilable Solidity source file inside a single \
```solidity fenced code block and nothing else.";

/// Longest error body kept in diagnostics
const ERROR_BODY_LIMIT: usize = 300;

/// HTTP provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpProviderConfig {
    /// API base, without the `/chat/completions` suffix
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat completions provider
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    config: HttpProviderConfig,
}

impl HttpProvider {
    /// Create provider
    ///
    /// # Errors
    /// Returns `ProviderError::MalformedRequest` if the HTTP client cannot
    /// be built (e.g. TLS backend unavailable).
    pub fn new(config: HttpProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ProviderError::MalformedRequest(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &HttpProviderConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ModelProvider for HttpProvider {
    async fn complete(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(request.credential.expose())
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = parse_retry_after(response.headers());
            let text = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), retry_after, truncate(&text)));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::upstream(Some(status.as_u16()), format!("invalid response body: {e}"))
            }
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ProviderError::upstream(Some(status.as_u16()), "empty completion"))
    }
}

/// Map a non-success HTTP status onto a provider error
///
/// - 401/403 → `AuthError`
/// - 429 → `RateLimited`
/// - 5xx → `Upstream`
/// - any other status → `MalformedRequest`
#[must_use]
pub fn classify_status(status: u16, retry_after: Option<Duration>, body: String) -> ProviderError {
    match status {
        401 | 403 => ProviderError::AuthError(body),
        429 => ProviderError::RateLimited { retry_after },
        500..=599 => ProviderError::Upstream {
            status: Some(status),
            message: body,
        },
        _ => ProviderError::MalformedRequest(format!("status {status}: {body}")),
    }
}

fn map_transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::upstream(error.status().map(|s| s.as_u16()), error.to_string())
    }
}

/// Parse a `Retry-After` header given in seconds
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn status_classification() {
        assert!(matches!(
            classify_status(401, None, "no".into()),
            ProviderError::AuthError(_)
        ));
        assert!(matches!(
            classify_status(403, None, "no".into()),
            ProviderError::AuthError(_)
        ));
        assert_eq!(
            classify_status(429, Some(Duration::from_secs(3)), String::new()),
            ProviderError::RateLimited {
                retry_after: Some(Duration::from_secs(3))
            }
        );
        assert_eq!(
            classify_status(503, None, "down".into()),
            ProviderError::Upstream {
                status: Some(503),
                message: "down".into()
            }
        );
        assert!(matches!(
            classify_status(400, None, "bad".into()),
            ProviderError::MalformedRequest(_)
        ));
        assert!(matches!(
            classify_status(404, None, "no model".into()),
            ProviderError::MalformedRequest(_)
        ));
    }

    #[test]
    fn retry_after_seconds() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_retry_after(&headers), None);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(7)));

        headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"));
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn endpoint_joins_cleanly() {
        let provider = HttpProvider::new(HttpProviderConfig {
            base_url: "http://localhost:8080/v1/".into(),
            ..HttpProviderConfig::default()
        })
        .unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn response_body_decoding() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"contract A {}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("contract A {}")
        );

        let empty: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.choices.is_empty());
    }

    #[test]
    fn long_bodies_are_truncated() {
        let long = "x".repeat(1000);
        let short = truncate(&long);
        assert_eq!(short.len(), ERROR_BODY_LIMIT + 3);
        assert_eq!(truncate("short"), "short");
    }
}
