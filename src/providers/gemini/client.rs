//! Gemini client implementation

use super::converter::{extract_text, text_to_contents, to_contents, to_generation_config};
use super::types::{
    CountTokensRequest, CountTokensResponse, GenerateContentRequest, GenerateContentResponse,
    GeminiErrorResponse, GenerationConfig,
};
use crate::config::SecretString;
use crate::protocol::{GenerationProperties, TranscriptEntry};
use crate::providers::{ChatSession, ConnectorError, ConnectorResult, SessionFactory};
use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client, StatusCode};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Gemini HTTP client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Config against the production endpoint
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Thin HTTP client for the Gemini generateContent and countTokens endpoints
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: GeminiConfig) -> ConnectorResult<Self> {
        if config.api_key.is_empty() {
            return Err(ConnectorError::Configuration(
                "API key is empty".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ConnectorError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Build request headers
    fn build_headers(&self) -> ConnectorResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            self.config.api_key.expose_secret().parse().map_err(|_| {
                ConnectorError::Configuration("API key is not a valid header value".to_string())
            })?,
        );
        headers.insert(
            "Content-Type",
            "application/json"
                .parse()
                .map_err(|_| ConnectorError::Configuration("invalid content type".to_string()))?,
        );
        Ok(headers)
    }

    fn endpoint(&self, model: &str, verb: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.config.base_url, model, verb)
    }

    /// Map an API error body to a connector error.
    ///
    /// The structured `error.message` is extracted when the body parses as the
    /// Gemini error envelope; otherwise the raw body is carried verbatim.
    fn handle_error_response(&self, status: StatusCode, body: String) -> ConnectorError {
        if let Ok(parsed) = serde_json::from_str::<GeminiErrorResponse>(&body) {
            let detail = parsed.error;
            match detail.status.as_deref() {
                Some("UNAUTHENTICATED") | Some("PERMISSION_DENIED") => {
                    ConnectorError::Authentication(detail.message)
                }
                Some("NOT_FOUND") => ConnectorError::ModelNotFound(detail.message),
                Some("INVALID_ARGUMENT") | Some("FAILED_PRECONDITION") => {
                    ConnectorError::InvalidRequest(detail.message)
                }
                Some("UNAVAILABLE") | Some("INTERNAL") => {
                    ConnectorError::ServiceUnavailable(detail.message)
                }
                Some(other) => ConnectorError::Api {
                    code: other.to_string(),
                    message: detail.message,
                },
                None => ConnectorError::Api {
                    code: detail.code.to_string(),
                    message: detail.message,
                },
            }
        } else {
            match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ConnectorError::Authentication(body)
                }
                StatusCode::BAD_REQUEST => ConnectorError::InvalidRequest(body),
                StatusCode::NOT_FOUND => ConnectorError::ModelNotFound(body),
                StatusCode::INTERNAL_SERVER_ERROR
                | StatusCode::BAD_GATEWAY
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::GATEWAY_TIMEOUT => ConnectorError::ServiceUnavailable(body),
                _ => ConnectorError::Api {
                    code: status.to_string(),
                    message: body,
                },
            }
        }
    }

    /// Submit a generateContent request for the given model
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> ConnectorResult<GenerateContentResponse> {
        let url = self.endpoint(model, "generateContent");
        let response = self
            .client
            .post(&url)
            .headers(self.build_headers()?)
            .json(request)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(self.handle_error_response(status, body))
        }
    }

    /// Count the tokens in a piece of text for the given model
    pub async fn count_tokens(&self, model: &str, text: &str) -> ConnectorResult<u32> {
        let url = self.endpoint(model, "countTokens");
        let request = CountTokensRequest {
            contents: text_to_contents(text),
        };
        let response = self
            .client
            .post(&url)
            .headers(self.build_headers()?)
            .json(&request)
            .send()
            .await?;

        if response.status().is_success() {
            let parsed: CountTokensResponse = response.json().await?;
            Ok(parsed.total_tokens)
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(self.handle_error_response(status, body))
        }
    }
}

/// A live chat session: one model, one generation config, stateless transport.
///
/// Gemini's generateContent carries the whole conversation on every call, so
/// the session holds no mutable state; the caller re-sends the accumulated
/// transcript each turn.
pub struct GeminiSession {
    client: GeminiClient,
    model: String,
    generation_config: Option<GenerationConfig>,
}

#[async_trait]
impl ChatSession for GeminiSession {
    async fn send(&self, transcript: &[TranscriptEntry]) -> ConnectorResult<String> {
        let request = GenerateContentRequest {
            contents: to_contents(transcript),
            generation_config: self.generation_config.clone(),
        };
        let response = self.client.generate_content(&self.model, &request).await?;
        extract_text(&response)
    }

    async fn count_tokens(&self, text: &str) -> ConnectorResult<u32> {
        self.client.count_tokens(&self.model, text).await
    }
}

/// Factory for live Gemini sessions
#[derive(Debug, Clone)]
pub struct GeminiSessionFactory {
    base_url: String,
    timeout_secs: u64,
}

impl GeminiSessionFactory {
    /// Factory against the production endpoint
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Factory against a custom endpoint, used by HTTP-level tests
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for GeminiSessionFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionFactory for GeminiSessionFactory {
    async fn open_session(
        &self,
        model: &str,
        api_key: &SecretString,
        properties: &GenerationProperties,
    ) -> ConnectorResult<Box<dyn ChatSession>> {
        let config = GeminiConfig {
            api_key: api_key.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        };
        let client = GeminiClient::new(config)?;
        tracing::debug!(model, key = %api_key.partial_redact(), "opened Gemini session");
        Ok(Box::new(GeminiSession {
            client,
            model: model.to_string(),
            generation_config: to_generation_config(properties),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GeminiClient {
        GeminiClient::new(GeminiConfig::new(SecretString::new("AIzaTestKey12345"))).unwrap()
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = GeminiClient::new(GeminiConfig::new(SecretString::new("")));
        assert!(matches!(result, Err(ConnectorError::Configuration(_))));
    }

    #[test]
    fn test_endpoint_format() {
        let client = test_client();
        assert_eq!(
            client.endpoint("gemini-1.5-flash", "generateContent"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_error_mapping_structured_body() {
        let client = test_client();
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let err = client.handle_error_response(StatusCode::BAD_REQUEST, body.to_string());
        match err {
            ConnectorError::InvalidRequest(message) => assert_eq!(message, "API key not valid"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_mapping_unauthenticated() {
        let client = test_client();
        let body = r#"{"error": {"code": 401, "message": "bad credential", "status": "UNAUTHENTICATED"}}"#;
        let err = client.handle_error_response(StatusCode::UNAUTHORIZED, body.to_string());
        assert!(matches!(err, ConnectorError::Authentication(_)));
    }

    #[test]
    fn test_error_mapping_raw_body_fallback() {
        let client = test_client();
        let err =
            client.handle_error_response(StatusCode::SERVICE_UNAVAILABLE, "down".to_string());
        match err {
            ConnectorError::ServiceUnavailable(message) => assert_eq!(message, "down"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
