//! The prompt loop: the connector's single operation
//!
//! `run_prompts` drives one chat session through the host's prompts, strictly
//! in order, and always returns a well-formed envelope. Two error tiers:
//! anything failing before the loop (missing credential, session
//! construction) collapses the envelope to a single `Error` entry; a failure
//! inside the loop is recorded in place and the batch continues.

use crate::config::{SecretString, API_KEY_SETTING};
use crate::protocol::{
    CompletionResult, ConnectorResponse, GenerationProperties, TranscriptEntry,
};
use crate::providers::{ConnectorError, ConnectorResult, GeminiSessionFactory, SessionFactory};
use serde_json::Value;
use std::collections::HashMap;

/// Run the host's prompts against one chat session.
///
/// Never returns an error: every failure path produces a normal envelope.
/// `ModelType` carries the requested model identifier on both paths.
pub async fn run_prompts(
    factory: &dyn SessionFactory,
    model: &str,
    prompts: &[String],
    properties: &HashMap<String, Value>,
    settings: &HashMap<String, Value>,
) -> ConnectorResponse {
    let completions = match run_batch(factory, model, prompts, properties, settings).await {
        Ok(completions) => completions,
        Err(err) => {
            tracing::error!(model, error = %err, "invocation failed before the prompt loop");
            vec![CompletionResult::error(&err)]
        }
    };

    ConnectorResponse {
        completions,
        model_type: Some(model.to_string()),
    }
}

async fn run_batch(
    factory: &dyn SessionFactory,
    model: &str,
    prompts: &[String],
    properties: &HashMap<String, Value>,
    settings: &HashMap<String, Value>,
) -> ConnectorResult<Vec<CompletionResult>> {
    let api_key = extract_api_key(settings)?;
    let generation = GenerationProperties::from_map(properties);
    let session = factory.open_session(model, &api_key, &generation).await?;

    let mut transcript: Vec<TranscriptEntry> = Vec::new();
    let mut completions = Vec::with_capacity(prompts.len());

    for (index, prompt) in prompts.iter().enumerate() {
        transcript.push(TranscriptEntry::user(prompt.as_str()));

        match session.send(&transcript).await {
            Ok(text) => {
                // Token count is best-effort; a failed count never fails the prompt.
                let token_usage = match session.count_tokens(prompt).await {
                    Ok(count) => Some(count),
                    Err(err) => {
                        tracing::debug!(index, error = %err, "token count unavailable");
                        None
                    }
                };
                tracing::debug!(index, response = %text, "prompt completed");
                transcript.push(TranscriptEntry::model(text.clone()));
                completions.push(CompletionResult::success(text, token_usage));
            }
            Err(err) => {
                tracing::debug!(index, error = %err, "prompt failed");
                // Recorded as a model turn so the transcript stays aligned
                // with the prompt count for later turns in this invocation.
                transcript.push(TranscriptEntry::model(err.to_string()));
                completions.push(CompletionResult::error(&err));
            }
        }
    }

    Ok(completions)
}

fn extract_api_key(settings: &HashMap<String, Value>) -> ConnectorResult<SecretString> {
    settings
        .get(API_KEY_SETTING)
        .and_then(Value::as_str)
        .filter(|key| !key.is_empty())
        .map(SecretString::new)
        .ok_or_else(|| {
            ConnectorError::Configuration(format!("setting {} is missing", API_KEY_SETTING))
        })
}

/// The connector wired to the live Gemini endpoint
#[derive(Debug, Clone, Default)]
pub struct GeminiConnector {
    factory: GeminiSessionFactory,
}

impl GeminiConnector {
    /// Connector against the production endpoint
    pub fn new() -> Self {
        Self::default()
    }

    /// Connector against a custom endpoint, used by HTTP-level tests
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            factory: GeminiSessionFactory::with_base_url(base_url),
        }
    }

    /// The host's entry point: see [`run_prompts`]
    pub async fn execute(
        &self,
        model: &str,
        prompts: &[String],
        properties: &HashMap<String, Value>,
        settings: &HashMap<String, Value>,
    ) -> ConnectorResponse {
        run_prompts(&self.factory, model, prompts, properties, settings).await
    }
}
