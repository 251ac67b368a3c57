//! Concept resolution: turning face expressions into matchable labels.
//!
//! Two expressions that look different ("d/dx x^2", "f'(x) for f = x^2")
//! match when their labels are equal. Labels are computed once per face at
//! deck build and cached per session.

pub mod backend;
pub mod inference;
pub mod resolver;
#[cfg(feature = "inference")]
pub mod http;

pub use backend::{ConceptBackend, FallbackBackend, InferenceBackend, CONCEPT_INSTRUCTION};
pub use inference::{InferenceClient, InferenceError};
pub use resolver::ConceptResolver;
#[cfg(feature = "inference")]
pub use http::HttpInferenceClient;
