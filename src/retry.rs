//! Bounded retry for read-only ledger queries.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of confirmation attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default pause between confirmation attempts
pub const DEFAULT_DELAY: Duration = Duration::from_millis(3000);

/// How long to wait after a failed attempt.
///
/// Serialized externally tagged with durations in milliseconds:
/// `{"fixed": 3000}` or
/// `{"exponential": {"initial": 500, "multiplier": 2.0, "max": 10000}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backoff {
    /// Same pause after every failure
    Fixed(#[serde(with = "duration_ms")] Duration),
    /// `initial * multiplier^n`, capped at `max`
    Exponential {
        #[serde(with = "duration_ms")]
        initial: Duration,
        multiplier: f64,
        #[serde(with = "duration_ms")]
        max: Duration,
    },
}

impl Backoff {
    /// Delay after the failed attempt with 1-based number `attempt`
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Fixed(delay) => *delay,
            Backoff::Exponential {
                initial,
                multiplier,
                max,
            } => {
                let exponent = attempt.saturating_sub(1) as i32;
                let ms = initial.as_millis() as f64 * multiplier.powi(exponent);
                if !ms.is_finite() || ms >= max.as_millis() as f64 {
                    *max
                } else {
                    Duration::from_millis(ms as u64)
                }
            }
        }
    }
}

/// Configuration for retrying confirmation queries.
///
/// A `max_attempts` of zero behaves as one: a retry loop always makes at
/// least one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first try).
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(DEFAULT_MAX_ATTEMPTS, DEFAULT_DELAY)
    }
}

impl RetryPolicy {
    /// `max_attempts` tries with a constant pause between them
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Backoff::Fixed(delay),
        }
    }

    pub fn exponential(
        max_attempts: u32,
        initial: Duration,
        multiplier: f64,
        max: Duration,
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Backoff::Exponential {
                initial,
                multiplier,
                max,
            },
        }
    }

    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self::fixed(1, Duration::ZERO)
    }

    /// Attempts a loop under this policy will actually make
    pub fn effective_max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Fresh per-loop state
    pub fn start(&self) -> RetryState<'_> {
        RetryState {
            policy: self,
            attempt: 0,
        }
    }
}

/// Progress through one retry loop; dropped when the loop ends
#[derive(Debug)]
pub struct RetryState<'a> {
    policy: &'a RetryPolicy,
    attempt: u32,
}

impl RetryState<'_> {
    /// Start the next attempt and return its 1-based number.
    ///
    /// Callers stop once [`RetryState::is_last`] holds after a failure.
    pub fn advance(&mut self) -> u32 {
        self.attempt = self.attempt.saturating_add(1);
        self.attempt
    }

    /// Attempts made so far
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn max_attempts(&self) -> u32 {
        self.policy.effective_max_attempts()
    }

    pub fn is_last(&self) -> bool {
        self.attempt >= self.max_attempts()
    }

    /// Pause before the next attempt
    pub fn delay(&self) -> Duration {
        self.policy.backoff.delay_after(self.attempt)
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
