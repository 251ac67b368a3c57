//! Score deltas for placement attempts.
//!
//! | attempt                          | Flat | FirstAttemptOnly |
//! |----------------------------------|------|------------------|
//! | success, first attempt           | +4   | +4               |
//! | success after a failed attempt   | +4   | 0                |
//! | failure, first attempt           | -2   | -2               |
//! | failure after a failed attempt   | 0    | 0                |

use serde::{Deserialize, Serialize};

/// Points for a successful placement.
pub const PLACEMENT_POINTS: i64 = 4;

/// Points for an invalid attempt (negative).
pub const INVALID_ATTEMPT_POINTS: i64 = -2;

/// How attempts are scored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Every success scores; only the first failure of a turn costs.
    #[default]
    Flat,
    /// Only the first attempt of a turn scores, up or down.
    FirstAttemptOnly,
}

impl ScoringPolicy {
    /// Delta for a successful placement.
    #[must_use]
    pub const fn on_success(self, first_attempt: bool) -> i64 {
        match self {
            ScoringPolicy::Flat => PLACEMENT_POINTS,
            ScoringPolicy::FirstAttemptOnly if first_attempt => PLACEMENT_POINTS,
            ScoringPolicy::FirstAttemptOnly => 0,
        }
    }

    /// Delta for an invalid attempt.
    #[must_use]
    pub const fn on_failure(self, first_attempt: bool) -> i64 {
        if first_attempt {
            INVALID_ATTEMPT_POINTS
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat() {
        let policy = ScoringPolicy::Flat;

        assert_eq!(policy.on_success(true), 4);
        assert_eq!(policy.on_success(false), 4);
        assert_eq!(policy.on_failure(true), -2);
        assert_eq!(policy.on_failure(false), 0);
    }

    #[test]
    fn test_first_attempt_only() {
        let policy = ScoringPolicy::FirstAttemptOnly;

        assert_eq!(policy.on_success(true), 4);
        assert_eq!(policy.on_success(false), 0);
        assert_eq!(policy.on_failure(true), -2);
        assert_eq!(policy.on_failure(false), 0);
    }

    #[test]
    fn test_default_is_flat() {
        assert_eq!(ScoringPolicy::default(), ScoringPolicy::Flat);
    }
}
