//! Concept resolution with a per-session cache.
//!
//! The cache is keyed by the exact expression string. A hit never reaches
//! the backend, so an expression maps to one label for the whole session
//! and an inference service is asked at most once per unique expression.
//! [`ConceptResolver::reset`] clears it; a new session calls it on start.

use rustc_hash::FxHashMap;
use tracing::{debug, info, instrument};

use super::backend::{ConceptBackend, FallbackBackend};
use crate::core::config::ResolverConfig;
use crate::core::error::ConceptResolutionError;

/// Maps face expressions to concept labels.
pub struct ConceptResolver {
    backend: Box<dyn ConceptBackend>,
    cache: FxHashMap<String, String>,
    backend_calls: u64,
}

impl ConceptResolver {
    /// Create a resolver over a backend.
    pub fn new(backend: impl ConceptBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            cache: FxHashMap::default(),
            backend_calls: 0,
        }
    }

    /// Resolver with the default fallback backend.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(FallbackBackend::default())
    }

    /// Build the backend named by configuration.
    ///
    /// Selecting inference in a build without the `inference` feature fails
    /// rather than quietly using the fallback.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ConceptResolutionError> {
        match config {
            ResolverConfig::Fallback { max_len } => Ok(Self::new(FallbackBackend::new(*max_len))),
            ResolverConfig::Inference {
                endpoint,
                model,
                api_key,
            } => Self::inference(endpoint, model, api_key.clone()),
        }
    }

    #[cfg(feature = "inference")]
    fn inference(
        endpoint: &str,
        model: &str,
        api_key: Option<String>,
    ) -> Result<Self, ConceptResolutionError> {
        use super::backend::InferenceBackend;
        use super::http::HttpInferenceClient;

        info!(endpoint, model, "Using inference concept backend");
        Ok(Self::new(InferenceBackend::new(HttpInferenceClient::new(
            endpoint, model, api_key,
        ))))
    }

    #[cfg(not(feature = "inference"))]
    fn inference(
        endpoint: &str,
        model: &str,
        _api_key: Option<String>,
    ) -> Result<Self, ConceptResolutionError> {
        info!(endpoint, model, "Inference backend requested but not compiled in");
        Err(ConceptResolutionError::BackendUnavailable(
            "built without the `inference` feature".to_string(),
        ))
    }

    /// Name of the active backend.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Resolve an expression to its concept label.
    ///
    /// Failed resolutions are not cached; a later call asks the backend again.
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub fn resolve(&mut self, expression: &str) -> Result<String, ConceptResolutionError> {
        if let Some(label) = self.cache.get(expression) {
            return Ok(label.clone());
        }

        self.backend_calls += 1;
        let label = self.backend.label(expression)?;
        debug!(label = %label, "Resolved concept");
        self.cache.insert(expression.to_string(), label.clone());
        Ok(label)
    }

    /// Drop every cached label.
    pub fn reset(&mut self) {
        debug!(cached = self.cache.len(), "Resetting concept cache");
        self.cache.clear();
    }

    /// Number of cached expressions.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Number of times the backend has been asked (cache misses).
    #[must_use]
    pub fn backend_calls(&self) -> u64 {
        self.backend_calls
    }
}

impl Default for ConceptResolver {
    fn default() -> Self {
        Self::fallback()
    }
}

impl std::fmt::Debug for ConceptResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConceptResolver")
            .field("backend", &self.backend.name())
            .field("cached", &self.cache.len())
            .field("backend_calls", &self.backend_calls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concepts::backend::InferenceBackend;
    use crate::concepts::inference::{InferenceError, ScriptedClient};

    #[test]
    fn test_cache_hit_skips_backend() {
        let client = ScriptedClient::answering(&[("d/dx x^2", "Derivative")]);
        let log = client.log();
        let mut resolver = ConceptResolver::new(InferenceBackend::new(client));

        assert_eq!(resolver.resolve("d/dx x^2").unwrap(), "derivative");
        assert_eq!(resolver.resolve("d/dx x^2").unwrap(), "derivative");

        assert_eq!(log.borrow().len(), 1);
        assert_eq!(resolver.backend_calls(), 1);
        assert_eq!(resolver.cached(), 1);
    }

    #[test]
    fn test_cache_is_keyed_by_exact_expression() {
        let mut resolver = ConceptResolver::fallback();

        resolver.resolve("X").unwrap();
        resolver.resolve(" x").unwrap();

        // Same label, but two distinct keys.
        assert_eq!(resolver.cached(), 2);
        assert_eq!(resolver.backend_calls(), 2);
    }

    #[test]
    fn test_reset_clears_cache() {
        let mut resolver = ConceptResolver::fallback();
        resolver.resolve("a").unwrap();

        resolver.reset();

        assert_eq!(resolver.cached(), 0);
        resolver.resolve("a").unwrap();
        assert_eq!(resolver.backend_calls(), 2);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let client = ScriptedClient::failing(InferenceError::new("offline"));
        let log = client.log();
        let mut resolver = ConceptResolver::new(InferenceBackend::new(client));

        assert!(resolver.resolve("x").is_err());
        assert!(resolver.resolve("x").is_err());

        assert_eq!(resolver.cached(), 0);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_from_config_fallback() {
        let mut resolver = ConceptResolver::from_config(&ResolverConfig::Fallback { max_len: 4 }).unwrap();

        assert_eq!(resolver.backend_name(), "fallback");
        assert_eq!(resolver.resolve("Integral").unwrap(), "inte");
    }

    #[cfg(not(feature = "inference"))]
    #[test]
    fn test_from_config_inference_without_feature() {
        let config = ResolverConfig::Inference {
            endpoint: "http://localhost:1".to_string(),
            model: "m".to_string(),
            api_key: None,
        };

        assert!(matches!(
            ConceptResolver::from_config(&config),
            Err(ConceptResolutionError::BackendUnavailable(_))
        ));
    }

    #[cfg(feature = "inference")]
    #[test]
    fn test_from_config_inference() {
        let config = ResolverConfig::Inference {
            endpoint: "http://localhost:1".to_string(),
            model: "m".to_string(),
            api_key: None,
        };

        let resolver = ConceptResolver::from_config(&config).unwrap();
        assert_eq!(resolver.backend_name(), "inference");
    }
}
