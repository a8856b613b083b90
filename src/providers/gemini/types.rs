//! Gemini API types
//!
//! These types match the Gemini REST API format and are used for
//! serialization/deserialization when communicating with Google's servers.
//! The API speaks camelCase JSON; absent optional fields are omitted.

use serde::{Deserialize, Serialize};

/// Gemini generateContent request
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,

    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One conversation turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

/// Content part; the connector only uses text parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// Generation tunables forwarded from the connector's allow-list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(rename = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,

    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

/// One generated candidate
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,

    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

/// Feedback on the prompt itself, present when generation was blocked
#[derive(Debug, Deserialize)]
pub struct PromptFeedback {
    #[serde(rename = "blockReason")]
    pub block_reason: Option<String>,
}

/// Token accounting attached to a response
#[derive(Debug, Deserialize)]
pub struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    pub prompt_token_count: Option<u32>,

    #[serde(rename = "candidatesTokenCount")]
    pub candidates_token_count: Option<u32>,

    #[serde(rename = "totalTokenCount")]
    pub total_token_count: Option<u32>,
}

/// Gemini countTokens request
#[derive(Debug, Serialize)]
pub struct CountTokensRequest {
    pub contents: Vec<Content>,
}

/// Gemini countTokens response
#[derive(Debug, Deserialize)]
pub struct CountTokensResponse {
    #[serde(rename = "totalTokens")]
    pub total_tokens: u32,
}

/// Gemini error response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiErrorResponse {
    pub error: GeminiErrorDetail,
}

/// Gemini error detail
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiErrorDetail {
    pub code: i32,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
