//! Retry policy — bounded attempts with exponential backoff.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::PolicyError;

/// How many attempt cycles to run before giving up.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Delay before the second attempt cycle.
const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(5_000);
/// Doubling per failed cycle.
const DEFAULT_BACKOFF_MULTIPLIER: u32 = 2;

/// Controls how the submission engine retries a fully failed attempt cycle.
///
/// The delay before cycle `n + 1` is
/// `initial_delay * backoff_multiplier^(n - 1)`, growing without bound
/// unless `max_delay` caps it. Backoff never applies between endpoints
/// within a cycle — failover is immediate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempt cycles (each cycle tries every endpoint once).
    pub max_attempts: u32,
    /// Delay inserted after the first fully failed cycle.
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after each further failed cycle.
    pub backoff_multiplier: u32,
    /// Optional upper bound on a single delay. `None` means unbounded.
    pub max_delay: Option<Duration>,
}

impl RetryPolicy {
    /// Check the policy invariants: at least one attempt, a multiplier of
    /// at least one.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.max_attempts == 0 {
            return Err(PolicyError::ZeroAttempts);
        }
        if self.backoff_multiplier == 0 {
            return Err(PolicyError::ZeroMultiplier);
        }
        Ok(())
    }

    /// Delay to wait after attempt cycle `attempt` (1-based) fails.
    ///
    /// Saturates instead of overflowing, and respects `max_delay` when set.
    pub fn delay_for_cycle(&self, attempt: u32) -> Duration {
        let mut delay = self.initial_delay;
        for _ in 1..attempt {
            delay = delay.saturating_mul(self.backoff_multiplier);
            if let Some(cap) = self.max_delay {
                if delay >= cap {
                    return cap;
                }
            }
        }
        match self.max_delay {
            Some(cap) => delay.min(cap),
            None => delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            max_delay: None,
        }
    }
}
