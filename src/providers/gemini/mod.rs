//! Gemini provider implementation
//!
//! Thin mapping between the connector protocol and the Gemini REST API:
//! wire types, transcript conversion, and the HTTP client.

pub mod client;
pub mod converter;
pub mod types;

pub use client::{GeminiClient, GeminiConfig, GeminiSession, GeminiSessionFactory};
