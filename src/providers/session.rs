//! Session abstraction between the prompt loop and the vendor API
//!
//! The connector's loop is written against these traits so the vendor client
//! stays swappable: the live implementation talks to Gemini over HTTP, test
//! doubles script their replies. A session is scoped to one model and one set
//! of generation properties for the lifetime of an invocation.

use crate::config::SecretString;
use crate::protocol::{GenerationProperties, TranscriptEntry};
use crate::providers::ConnectorResult;
use async_trait::async_trait;

/// One open chat exchange with the vendor.
///
/// `send` receives the full transcript accumulated so far, with the current
/// prompt as its final `user` entry, and returns the model's reply text.
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// Submit the transcript and await the model's textual reply
    async fn send(&self, transcript: &[TranscriptEntry]) -> ConnectorResult<String>;

    /// Count the tokens in a piece of text
    async fn count_tokens(&self, text: &str) -> ConnectorResult<u32>;
}

/// Constructs sessions for an invocation.
///
/// Failure here (invalid credential, client construction) is the connector's
/// catastrophic path: the whole invocation collapses to a single error entry.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Open a session scoped to the model, credential, and generation properties
    async fn open_session(
        &self,
        model: &str,
        api_key: &SecretString,
        properties: &GenerationProperties,
    ) -> ConnectorResult<Box<dyn ChatSession>>;
}
