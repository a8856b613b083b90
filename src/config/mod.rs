//! Connector configuration descriptor
//!
//! The host reads this descriptor at load time to build its UI: which models
//! the connector supports, which generation properties the operator can tune
//! (with defaults), and which settings it must collect (here, the API key).
//! The descriptor is static metadata; the connector never mutates it, and the
//! field casing on the wire matches what the host expects.

mod secrets;

pub use secrets::SecretString;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Settings key under which the host supplies the credential.
pub const API_KEY_SETTING: &str = "API_KEY";

const ICON_BASE64: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMTYiIGhlaWdodD0iMTYiIHZpZXdCb3g9IjAgMCAxNiAxNiIgZmlsbD0ibm9uZSIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj4KPHBhdGggZD0iTTggMTQuNUM3LjQ2MTQ1IDExLjE0MzMgNC42NzE4MyA4LjUwODYzIDEuMTE3NjUgOEM0LjY3MTgzIDcuNDkxMzcgNy40NjE0NSA0Ljg1NjczIDggMS41QzguNTM4NTUgNC44NTY3MyAxMS4zMjgyIDcuNDkxMzcgMTQuODgyNCA4QzExLjMyODQgOC41MDg2MyA4LjUzODc2IDExLjE0MzMgOCAxNC41WiIgZmlsbD0iIzZGNzM3QSIvPgo8L3N2Zz4K";

/// Value type tag for a tunable property or setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Number,
    Array,
    String,
}

/// A tunable generation property exposed to the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub id: String,
    pub name: String,
    /// Default value shown by the host
    pub value: Value,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
}

/// A setting the host must collect from the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    pub id: String,
    pub name: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
}

/// Static connector descriptor read by the host at load time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorConfig {
    pub connector_name: String,
    pub models: Vec<String>,
    pub properties: Vec<PropertyDescriptor>,
    pub settings: Vec<SettingDescriptor>,
    pub author: String,
    pub description: String,
    pub icon_base64: String,
}

impl ConnectorConfig {
    /// The Gemini connector descriptor
    pub fn gemini() -> Self {
        Self {
            connector_name: "Gemini".to_string(),
            models: [
                "gemini-1.0-pro",
                "gemini-1.5-pro",
                "gemini-1.5-flash",
                "gemini-1.5-pro-exp-0801",
                "gemini-2.0-flash",
                "gemini-2.0-flash-lite-preview-02-05",
                "gemini-1.5-flash-8b",
                "gemini-2.0-pro-exp-02-05",
                "gemini-2.0-flash-thinking-exp-01-21",
                "gemini-2.0-flash-exp",
                "gemini-2.5-flash",
                "gemini-2.5-pro",
                "gemini-exp-1206",
                "learnlm-1.5-pro-experimental",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            properties: vec![
                PropertyDescriptor {
                    id: "maxOutputTokens".to_string(),
                    name: "Max Output Tokens".to_string(),
                    value: json!(300),
                    property_type: PropertyType::Number,
                },
                PropertyDescriptor {
                    id: "stopSequences".to_string(),
                    name: "Stop Sequences".to_string(),
                    value: json!(["red"]),
                    property_type: PropertyType::Array,
                },
                PropertyDescriptor {
                    id: "temperature".to_string(),
                    name: "Temperature".to_string(),
                    value: json!(0.9),
                    property_type: PropertyType::Number,
                },
                PropertyDescriptor {
                    id: "topP".to_string(),
                    name: "Top P".to_string(),
                    value: json!(0.1),
                    property_type: PropertyType::Number,
                },
                PropertyDescriptor {
                    id: "topK".to_string(),
                    name: "Top K".to_string(),
                    value: json!(16),
                    property_type: PropertyType::Number,
                },
            ],
            settings: vec![SettingDescriptor {
                id: API_KEY_SETTING.to_string(),
                name: "API Key".to_string(),
                value: json!(""),
                property_type: PropertyType::String,
            }],
            author: "Prompt Mixer".to_string(),
            description: "Gemini API connector".to_string(),
            icon_base64: ICON_BASE64.to_string(),
        }
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self::gemini()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_contents() {
        let config = ConnectorConfig::gemini();
        assert_eq!(config.connector_name, "Gemini");
        assert!(config.models.contains(&"gemini-1.5-flash".to_string()));
        assert_eq!(config.properties.len(), 5);
        assert_eq!(config.settings.len(), 1);
        assert_eq!(config.settings[0].id, API_KEY_SETTING);
    }

    #[test]
    fn test_descriptor_host_casing() {
        let json = serde_json::to_value(ConnectorConfig::gemini()).unwrap();
        assert!(json.get("connectorName").is_some());
        assert!(json.get("iconBase64").is_some());
        assert_eq!(json["properties"][0]["id"], "maxOutputTokens");
        assert_eq!(json["properties"][0]["type"], "number");
        assert_eq!(json["properties"][1]["type"], "array");
        assert_eq!(json["settings"][0]["type"], "string");
    }

    #[test]
    fn test_descriptor_round_trips() {
        let config = ConnectorConfig::gemini();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ConnectorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
