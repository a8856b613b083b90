//! Host-facing protocol types
//!
//! These structures define the connector's entire contract with the host: the
//! per-invocation transcript, the per-prompt completion results, and the
//! response envelope. Field names on the wire use the casing the host reads
//! (`Completions`, `Content`, `TokenUsage`, `Error`, `ModelType`), so the
//! serde renames here are part of the contract, not cosmetics.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Role of a transcript entry within one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptRole {
    /// Host-supplied prompt
    User,
    /// Model reply (or the recorded failure for a prompt)
    Model,
}

impl fmt::Display for TranscriptRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptRole::User => write!(f, "user"),
            TranscriptRole::Model => write!(f, "model"),
        }
    }
}

/// One entry in the conversation history accumulated during an invocation.
///
/// The transcript is append-only, owned by the invocation, and discarded when
/// the envelope is returned; nothing persists across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: TranscriptRole,
    pub content: String,
}

impl TranscriptEntry {
    /// Create a user entry
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TranscriptRole::User,
            content: content.into(),
        }
    }

    /// Create a model entry
    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: TranscriptRole::Model,
            content: content.into(),
        }
    }
}

/// Result for a single prompt: the model's text or the failure that replaced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompletionResult {
    /// Successful completion
    Success {
        #[serde(rename = "Content")]
        content: String,

        /// Token count for the prompt, when the count call succeeded
        #[serde(rename = "TokenUsage", skip_serializing_if = "Option::is_none")]
        token_usage: Option<u32>,
    },
    /// Failed completion, holding the extracted error message
    Error {
        #[serde(rename = "Error")]
        error: String,
    },
}

impl CompletionResult {
    /// Create a successful completion
    pub fn success(content: impl Into<String>, token_usage: Option<u32>) -> Self {
        Self::Success {
            content: content.into(),
            token_usage,
        }
    }

    /// Create an error completion from anything displayable
    pub fn error(message: impl fmt::Display) -> Self {
        Self::Error {
            error: message.to_string(),
        }
    }

    /// Whether this entry records a failure
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// The completion text, if this entry is a success
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Success { content, .. } => Some(content),
            Self::Error { .. } => None,
        }
    }
}

/// The envelope returned to the host, one per invocation.
///
/// Outside the catastrophic single-error case, `completions` holds exactly
/// one entry per input prompt, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorResponse {
    #[serde(rename = "Completions")]
    pub completions: Vec<CompletionResult>,

    #[serde(rename = "ModelType", skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
}

/// Recognized generation-property keys, the connector's forwarding allow-list.
pub const RECOGNIZED_PROPERTIES: [&str; 5] = [
    "maxOutputTokens",
    "stopSequences",
    "temperature",
    "topP",
    "topK",
];

/// Typed generation parameters parsed from the host's open-ended property map.
///
/// Only the keys in [`RECOGNIZED_PROPERTIES`] are forwarded to the vendor
/// session; everything else is ignored. A recognized key with a value of the
/// wrong shape is also ignored rather than failing the call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationProperties {
    pub max_output_tokens: Option<u32>,
    pub stop_sequences: Option<Vec<String>>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
}

impl GenerationProperties {
    /// Parse the host's property map against the allow-list
    pub fn from_map(properties: &HashMap<String, Value>) -> Self {
        let mut parsed = Self::default();
        for (key, value) in properties {
            match key.as_str() {
                "maxOutputTokens" => parsed.max_output_tokens = as_u32(key, value),
                "stopSequences" => parsed.stop_sequences = as_string_array(key, value),
                "temperature" => parsed.temperature = as_f32(key, value),
                "topP" => parsed.top_p = as_f32(key, value),
                "topK" => parsed.top_k = as_u32(key, value),
                other => {
                    tracing::debug!(property = other, "ignoring unrecognized property");
                }
            }
        }
        parsed
    }
}

fn as_u32(key: &str, value: &Value) -> Option<u32> {
    let parsed = value.as_u64().and_then(|n| u32::try_from(n).ok());
    if parsed.is_none() {
        tracing::debug!(property = key, %value, "ignoring property with non-integer value");
    }
    parsed
}

fn as_f32(key: &str, value: &Value) -> Option<f32> {
    let parsed = value.as_f64().map(|n| n as f32);
    if parsed.is_none() {
        tracing::debug!(property = key, %value, "ignoring property with non-numeric value");
    }
    parsed
}

fn as_string_array(key: &str, value: &Value) -> Option<Vec<String>> {
    let parsed = value.as_array().map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect::<Vec<_>>()
    });
    if parsed.is_none() {
        tracing::debug!(property = key, %value, "ignoring property with non-array value");
    }
    parsed
}
