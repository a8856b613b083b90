//! Provider abstraction and the Gemini implementation
//!
//! This module defines the session seam the prompt loop runs against and the
//! concrete Gemini client behind it.

pub mod error;
pub mod gemini;
pub mod session;

pub use error::{ConnectorError, ConnectorResult};
pub use session::{ChatSession, SessionFactory};

// Re-export the concrete provider
pub use gemini::{GeminiClient, GeminiConfig, GeminiSessionFactory};
