//! Gemini Chat Connector
//!
//! This crate adapts a prompt-orchestration host's generic calling convention
//! to Google's Gemini chat API. The host supplies a model identifier, an
//! ordered list of prompts, a generation-property map, and a settings map
//! carrying the API key; the connector drives one chat session through the
//! prompts sequentially and returns a uniform envelope of completions, one
//! per prompt, in input order.
//!
//! Failure is always data: the connector never raises across the host
//! boundary. Per-prompt failures become `Error` completions in place, and
//! anything that fails before the prompt loop (bad credential, session
//! construction) collapses the whole envelope to a single `Error` entry.

pub mod config;
pub mod connector;
pub mod protocol;
pub mod providers;

pub use config::{ConnectorConfig, SecretString};
pub use connector::{run_prompts, GeminiConnector};
pub use protocol::{
    CompletionResult, ConnectorResponse, GenerationProperties, TranscriptEntry, TranscriptRole,
};
pub use providers::{ChatSession, ConnectorError, ConnectorResult, SessionFactory};

/// Returns the version of the connector crate.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
