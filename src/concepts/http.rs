//! Blocking HTTP client for an OpenAI-compatible chat-completion endpoint.

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::inference::{completion_request, parse_completion, InferenceClient, InferenceError};

/// Chat-completion client used by the inference backend.
#[derive(Debug, Clone)]
pub struct HttpInferenceClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpInferenceClient {
    /// Create a client for `endpoint` using `model`.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }
}

impl InferenceClient for HttpInferenceClient {
    #[instrument(skip(self, instruction), fields(model = %self.model))]
    fn complete(&self, instruction: &str, input: &str) -> Result<String, InferenceError> {
        let body = completion_request(&self.model, instruction, input);

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| {
            error!(error = ?e, "Inference request failed");
            InferenceError::new(format!("request failed: {e}"))
        })?;

        let status = response.status();
        let text = response.text().map_err(|e| {
            error!(error = ?e, "Failed to read inference response");
            InferenceError::new(format!("failed to read response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, response = %text, "Inference endpoint error");
            return Err(InferenceError::new(format!("endpoint returned {status}: {text}")));
        }

        let json: Value = serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, "Failed to parse inference response");
            InferenceError::new(format!("failed to parse response: {e}"))
        })?;

        let content = parse_completion(&json)
            .ok_or_else(|| InferenceError::new("response has no completion content"))?;

        debug!(content_length = content.len(), "Received completion");
        Ok(content.to_string())
    }
}
