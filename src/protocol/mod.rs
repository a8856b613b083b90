//! Protocol module for the host-facing request/response structures
//!
//! These are the canonical data models the connector exchanges with the host:
//! the transcript accumulated per invocation, the per-prompt completion
//! results, the response envelope, and the typed generation properties parsed
//! from the host's open-ended property map.

pub mod types;

pub use types::{
    CompletionResult, ConnectorResponse, GenerationProperties, TranscriptEntry, TranscriptRole,
    RECOGNIZED_PROPERTIES,
};
