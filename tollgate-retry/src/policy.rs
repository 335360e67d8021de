// Retry options and the policy they resolve to

use std::env;
use std::time::Duration;

pub const DEFAULT_ATTEMPTS: u32 = 5;
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(1000);
/// Zero disables the cap.
pub const DEFAULT_MAX_DELAY: Duration = Duration::ZERO;
pub const DEFAULT_FACTOR: f64 = 2.0;

/// Caller-supplied options; unset fields take the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetryOptions {
    pub attempts: Option<u32>,
    pub min_delay: Option<Duration>,
    pub max_delay: Option<Duration>,
    pub factor: Option<f64>,
}

impl RetryOptions {
    /// Merge with the defaults.
    pub fn resolve(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.attempts.unwrap_or(DEFAULT_ATTEMPTS),
            min_delay: self.min_delay.unwrap_or(DEFAULT_MIN_DELAY),
            max_delay: self.max_delay.unwrap_or(DEFAULT_MAX_DELAY),
            factor: self.factor.unwrap_or(DEFAULT_FACTOR),
        }
    }

    /// Read `<PREFIX>_ATTEMPTS`, `<PREFIX>_MIN_DELAY_MS`,
    /// `<PREFIX>_MAX_DELAY_MS` and `<PREFIX>_FACTOR`. Missing or unparseable
    /// variables stay unset.
    pub fn from_env(prefix: &str) -> Self {
        fn read<T: std::str::FromStr>(prefix: &str, key: &str) -> Option<T> {
            env::var(format!("{}_{}", prefix, key))
                .ok()
                .and_then(|raw| raw.trim().parse().ok())
        }

        Self {
            attempts: read(prefix, "ATTEMPTS"),
            min_delay: read(prefix, "MIN_DELAY_MS").map(Duration::from_millis),
            max_delay: read(prefix, "MAX_DELAY_MS").map(Duration::from_millis),
            factor: read(prefix, "FACTOR"),
        }
    }
}

/// Fully specified retry behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub attempts: u32,
    pub min_delay: Duration,
    /// Upper bound on any single delay; zero means unbounded
    pub max_delay: Duration,
    /// Exponential growth factor
    pub factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryOptions::default().resolve()
    }
}

impl RetryPolicy {
    /// Defaults overridden by any `<PREFIX>_*` variables that are set.
    pub fn from_env(prefix: &str) -> Self {
        RetryOptions::from_env(prefix).resolve()
    }

    /// Delay after the given (1-based) failed attempt:
    /// `min_delay * factor^(attempt - 1)`, capped by a non-zero `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let millis = self.min_delay.as_millis() as f64 * self.factor.powi(exponent);
        let delay = if millis.is_finite() && millis > 0.0 {
            Duration::from_millis(millis.min(u64::MAX as f64) as u64)
        } else {
            Duration::ZERO
        };

        if self.max_delay > Duration::ZERO {
            delay.min(self.max_delay)
        } else {
            delay
        }
    }
}
