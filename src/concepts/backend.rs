//! Concept backends: how a raw face expression becomes a label.
//!
//! Two implementations, chosen once when the resolver is built:
//! - [`FallbackBackend`]: pure normalization of the expression itself
//! - [`InferenceBackend`]: asks an [`InferenceClient`] for the dominant concept

use tracing::{debug, warn};

use super::inference::InferenceClient;
use crate::core::error::ConceptResolutionError;

/// Fixed instruction sent with every inference request.
pub const CONCEPT_INSTRUCTION: &str = "Identify the single dominant mathematical concept in the \
expression. Return only the concept as a short lowercase phrase, with no explanation.";

/// Capability interface: expression in, concept label out.
pub trait ConceptBackend {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Produce the concept label for `expression`.
    fn label(&self, expression: &str) -> Result<String, ConceptResolutionError>;
}

/// Labels an expression by normalizing it: lowercase, trim, truncate.
///
/// A pure function of the expression, so labels agree across sessions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FallbackBackend {
    max_len: usize,
}

impl FallbackBackend {
    /// Create a fallback backend truncating labels to `max_len` characters.
    #[must_use]
    pub const fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    /// Maximum label length in characters.
    #[must_use]
    pub const fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Default for FallbackBackend {
    fn default() -> Self {
        Self::new(crate::core::DEFAULT_MAX_CONCEPT_LEN)
    }
}

impl ConceptBackend for FallbackBackend {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn label(&self, expression: &str) -> Result<String, ConceptResolutionError> {
        // Truncate on chars so multi-byte symbols are never split.
        Ok(expression
            .to_lowercase()
            .trim()
            .chars()
            .take(self.max_len)
            .collect())
    }
}

/// Labels an expression by asking an external inference service.
///
/// Failures are surfaced, never papered over with the fallback.
pub struct InferenceBackend {
    client: Box<dyn InferenceClient>,
}

impl InferenceBackend {
    /// Wrap an inference client.
    pub fn new(client: impl InferenceClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }
}

impl std::fmt::Debug for InferenceBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceBackend").finish_non_exhaustive()
    }
}

impl ConceptBackend for InferenceBackend {
    fn name(&self) -> &'static str {
        "inference"
    }

    fn label(&self, expression: &str) -> Result<String, ConceptResolutionError> {
        let response = self
            .client
            .complete(CONCEPT_INSTRUCTION, expression)
            .map_err(|err| {
                warn!(expression, error = %err, "Concept inference failed");
                ConceptResolutionError::Unavailable {
                    expression: expression.to_string(),
                    reason: err.to_string(),
                }
            })?;

        match clean_label(&response) {
            Some(label) => {
                debug!(expression, label = %label, "Inferred concept");
                Ok(label)
            }
            None => {
                warn!(expression, response = %response, "Malformed concept label");
                Err(ConceptResolutionError::Malformed {
                    expression: expression.to_string(),
                    response,
                })
            }
        }
    }
}

/// Lowercase and trim a model answer; reject empty or multi-line answers.
///
/// Surrounding quotes and a trailing period are dropped, since models add
/// them even when told not to.
fn clean_label(response: &str) -> Option<String> {
    let label = response
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim_end_matches('.')
        .trim()
        .to_lowercase();

    if label.is_empty() || label.contains('\n') {
        return None;
    }
    Some(label)
}
