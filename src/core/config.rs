//! Engine configuration.
//!
//! A session is configured once at startup:
//! - `player_count`: 2 or 4 (14 or 7 tiles each)
//! - `match_mode`: two-ended board or linear chain
//! - `scoring`: flat or first-attempt-only
//! - `seed`: deck shuffle seed
//! - `resolver`: which concept backend labels the faces
//!
//! Configs can be built in code or read from TOML:
//!
//! ```
//! use concept_domino::core::EngineConfig;
//! use concept_domino::board::MatchMode;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     player_count = 4
//!     match_mode = "linear"
//! "#).unwrap();
//!
//! assert_eq!(config.player_count, 4);
//! assert_eq!(config.match_mode, MatchMode::Linear);
//! ```

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::board::MatchMode;
use crate::session::ScoringPolicy;

/// Default fallback label length.
pub const DEFAULT_MAX_CONCEPT_LEN: usize = 50;

/// Concept backend selection. Chosen once per process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum ResolverConfig {
    /// Normalize the expression itself (no network).
    Fallback {
        #[serde(default = "default_max_len")]
        max_len: usize,
    },
    /// Ask a chat-completion endpoint for the dominant concept.
    Inference {
        endpoint: String,
        model: String,
        #[serde(default)]
        api_key: Option<String>,
    },
}

fn default_max_len() -> usize {
    DEFAULT_MAX_CONCEPT_LEN
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::Fallback {
            max_len: DEFAULT_MAX_CONCEPT_LEN,
        }
    }
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of seats (2 or 4). Validated at session start.
    pub player_count: usize,

    /// How tiles attach to the chain.
    pub match_mode: MatchMode,

    /// How attempts are scored.
    pub scoring: ScoringPolicy,

    /// Seed for the deck shuffle.
    pub seed: u64,

    /// Concept backend.
    pub resolver: ResolverConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            match_mode: MatchMode::TwoEnded,
            scoring: ScoringPolicy::Flat,
            seed: 42,
            resolver: ResolverConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Set the number of players.
    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the match mode.
    #[must_use]
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Set the scoring policy.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the concept backend.
    #[must_use]
    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }

    /// Parse a TOML document. Missing keys take their defaults.
    ///
    /// An inference `api_key` written as `${VAR}` is read from the environment.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        if let ResolverConfig::Inference {
            api_key: Some(key), ..
        } = &mut config.resolver
        {
            *key = expand_env_vars(key);
        }
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config.match_mode, ?config.scoring, "Loaded engine config");
        Ok(config)
    }
}

/// Replace every `${VAR}` with the value of `VAR` (empty if unset).
fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &rest[start + 2..start + 2 + len];
        out.push_str(&env::var(var).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();

        assert_eq!(config.player_count, 2);
        assert_eq!(config.match_mode, MatchMode::TwoEnded);
        assert_eq!(config.scoring, ScoringPolicy::Flat);
        assert_eq!(config.resolver, ResolverConfig::Fallback { max_len: 50 });
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_player_count(4)
            .with_scoring(ScoringPolicy::FirstAttemptOnly)
            .with_seed(7);

        assert_eq!(config.player_count, 4);
        assert_eq!(config.scoring, ScoringPolicy::FirstAttemptOnly);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_toml_inference_backend() {
        let config = EngineConfig::from_toml_str(
            r#"
            scoring = "first_attempt_only"

            [resolver]
            backend = "inference"
            endpoint = "https://api.openai.com/v1/chat/completions"
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();

        assert_eq!(config.scoring, ScoringPolicy::FirstAttemptOnly);
        assert_eq!(
            config.resolver,
            ResolverConfig::Inference {
                endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
                model: "gpt-4o-mini".to_string(),
                api_key: None,
            }
        );
    }

    #[test]
    fn test_toml_fallback_max_len() {
        let config = EngineConfig::from_toml_str(
            r#"
            [resolver]
            backend = "fallback"
            max_len = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.resolver, ResolverConfig::Fallback { max_len: 12 });
    }

    #[test]
    fn test_toml_rejects_unknown_mode() {
        assert!(matches!(
            EngineConfig::from_toml_str(r#"match_mode = "circular""#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domino.toml");
        std::fs::write(&path, "player_count = 4\nseed = 9\n").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.player_count, 4);
        assert_eq!(config.seed, 9);

        assert!(matches!(
            EngineConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_expand_env_vars() {
        std::env::set_var("CONCEPT_DOMINO_TEST_KEY", "sk-test");

        assert_eq!(expand_env_vars("${CONCEPT_DOMINO_TEST_KEY}"), "sk-test");
        assert_eq!(expand_env_vars("a-${CONCEPT_DOMINO_TEST_KEY}-b"), "a-sk-test-b");
        assert_eq!(expand_env_vars("${CONCEPT_DOMINO_UNSET_VAR}"), "");
        assert_eq!(expand_env_vars("plain"), "plain");
        assert_eq!(expand_env_vars("${unterminated"), "${unterminated");
    }
}
