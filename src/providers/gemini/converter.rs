//! Conversion between the connector protocol and the Gemini wire format

use super::types::{Content, GenerateContentResponse, GenerationConfig, Part};
use crate::protocol::{GenerationProperties, TranscriptEntry};
use crate::providers::{ConnectorError, ConnectorResult};

/// Convert the invocation transcript to Gemini contents
pub fn to_contents(transcript: &[TranscriptEntry]) -> Vec<Content> {
    transcript
        .iter()
        .map(|entry| Content {
            role: entry.role.to_string(),
            parts: vec![Part {
                text: entry.content.clone(),
            }],
        })
        .collect()
}

/// Convert a single piece of text to Gemini contents (used for countTokens)
pub fn text_to_contents(text: &str) -> Vec<Content> {
    vec![Content {
        role: "user".to_string(),
        parts: vec![Part {
            text: text.to_string(),
        }],
    }]
}

/// Convert the typed generation properties to the wire config.
///
/// Returns `None` when no property was set, so the request omits the
/// `generationConfig` field entirely and the API applies its own defaults.
pub fn to_generation_config(properties: &GenerationProperties) -> Option<GenerationConfig> {
    if *properties == GenerationProperties::default() {
        return None;
    }
    Some(GenerationConfig {
        max_output_tokens: properties.max_output_tokens,
        stop_sequences: properties.stop_sequences.clone(),
        temperature: properties.temperature,
        top_p: properties.top_p,
        top_k: properties.top_k,
    })
}

/// Extract the reply text from a generateContent response.
///
/// The reply is the concatenation of the first candidate's text parts. A
/// response without candidates is an error; when the prompt was blocked the
/// block reason becomes the message.
pub fn extract_text(response: &GenerateContentResponse) -> ConnectorResult<String> {
    let candidate = response.candidates.first().ok_or_else(|| {
        let reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref());
        match reason {
            Some(reason) => ConnectorError::Api {
                code: "BLOCKED".to_string(),
                message: format!("Prompt was blocked: {}", reason),
            },
            None => ConnectorError::Parse("response contained no candidates".to_string()),
        }
    })?;

    let content = candidate
        .content
        .as_ref()
        .ok_or_else(|| ConnectorError::Parse("candidate contained no content".to_string()))?;

    Ok(content
        .parts
        .iter()
        .map(|part| part.text.as_str())
        .collect::<Vec<_>>()
        .join(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::gemini::types::{Candidate, PromptFeedback};
    use crate::protocol::TranscriptRole;

    #[test]
    fn test_transcript_to_contents() {
        let transcript = vec![
            TranscriptEntry::user("hi"),
            TranscriptEntry::model("hello"),
            TranscriptEntry::user("bye"),
        ];
        let contents = to_contents(&transcript);
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role, "user");
        assert_eq!(contents[1].role, "model");
        assert_eq!(contents[1].parts[0].text, "hello");
        assert_eq!(contents[2].parts[0].text, "bye");
        assert_eq!(transcript[0].role, TranscriptRole::User);
    }

    #[test]
    fn test_generation_config_omitted_when_empty() {
        assert!(to_generation_config(&GenerationProperties::default()).is_none());
    }

    #[test]
    fn test_generation_config_carries_set_fields() {
        let properties = GenerationProperties {
            max_output_tokens: Some(300),
            temperature: Some(0.9),
            ..Default::default()
        };
        let config = to_generation_config(&properties).unwrap();
        assert_eq!(config.max_output_tokens, Some(300));
        assert_eq!(config.temperature, Some(0.9));
        assert_eq!(config.top_k, None);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["maxOutputTokens"], 300);
        assert!(json.get("topK").is_none());
    }

    #[test]
    fn test_extract_text_concatenates_parts() {
        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: "model".to_string(),
                    parts: vec![
                        Part {
                            text: "Hello, ".to_string(),
                        },
                        Part {
                            text: "world".to_string(),
                        },
                    ],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            prompt_feedback: None,
            usage_metadata: None,
        };
        assert_eq!(extract_text(&response).unwrap(), "Hello, world");
    }

    #[test]
    fn test_extract_text_blocked_prompt() {
        let response = GenerateContentResponse {
            candidates: vec![],
            prompt_feedback: Some(PromptFeedback {
                block_reason: Some("SAFETY".to_string()),
            }),
            usage_metadata: None,
        };
        let err = extract_text(&response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_extract_text_no_candidates() {
        let response = GenerateContentResponse {
            candidates: vec![],
            prompt_feedback: None,
            usage_metadata: None,
        };
        assert!(matches!(
            extract_text(&response).unwrap_err(),
            ConnectorError::Parse(_)
        ));
    }
}
