//! Text-in/text-out inference boundary.
//!
//! The engine only needs `complete(instruction, input) -> text`. The HTTP
//! implementation lives behind the `inference` feature; tests script it.

use serde_json::{json, Value};
use thiserror::Error;

/// The inference service could not answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct InferenceError {
    reason: String,
}

impl InferenceError {
    /// Create an error with a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A text-classification service.
///
/// Implementations must sample deterministically (temperature zero).
pub trait InferenceClient {
    /// Send a fixed `instruction` and an `input`, return the raw answer.
    fn complete(&self, instruction: &str, input: &str) -> Result<String, InferenceError>;
}

/// Chat-completion request body for an OpenAI-compatible endpoint.
#[must_use]
pub fn completion_request(model: &str, instruction: &str, input: &str) -> Value {
    json!({
        "model": model,
        "temperature": 0,
        "max_tokens": 16,
        "messages": [
            { "role": "system", "content": instruction },
            { "role": "user", "content": input },
        ],
    })
}

/// Extract the answer text from a chat-completion response.
///
/// Returns `None` when the response has no first choice with string content.
#[must_use]
pub fn parse_completion(response: &Value) -> Option<&str> {
    response["choices"][0]["message"]["content"].as_str()
}

#[cfg(test)]
pub(crate) use scripted::ScriptedClient;
