//! Retry with exponential backoff, reporting through a [`LogSink`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use tollgate_retry::{execute_with_retry, AttemptError, RetryOptions};
//! use tollgate_log::GlobalSink;
//!
//! let outcome = execute_with_retry(
//!     "fetch profile",
//!     || async { client.fetch().await.map_err(AttemptError::from) },
//!     RetryOptions { attempts: Some(3), ..Default::default() }.resolve(),
//!     &GlobalSink::default(),
//! )
//! .await;
//! ```

use crate::policy::RetryPolicy;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tollgate_log::{GlobalSink, Level, LogSink};

/// Failure of a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptError<E> {
    /// Worth another attempt.
    Transient(E),
    /// Stop retrying immediately.
    Permanent(E),
}

impl<E> AttemptError<E> {
    pub fn into_inner(self) -> E {
        match self {
            AttemptError::Transient(e) | AttemptError::Permanent(e) => e,
        }
    }

    pub fn is_permanent(&self) -> bool {
        matches!(self, AttemptError::Permanent(_))
    }
}

impl<E> From<E> for AttemptError<E> {
    fn from(error: E) -> Self {
        AttemptError::Transient(error)
    }
}

impl<E: fmt::Display> fmt::Display for AttemptError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Transient(e) | AttemptError::Permanent(e) => e.fmt(f),
        }
    }
}

/// The operation never succeeded.
#[derive(Debug, Error)]
#[error("failed after {attempts} attempt(s): {last_error}")]
pub struct RetryError<E> {
    pub last_error: E,
    pub attempts: u32,
}

/// One line of the attempt log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    /// 1-based
    pub attempt: u32,
    /// Delay slept before this attempt
    pub delay_ms: u64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of [`execute_with_retry`] plus the per-attempt log.
#[derive(Debug)]
pub struct RetryOutcome<T, E> {
    pub result: Result<T, RetryError<E>>,
    pub log: Vec<AttemptRecord>,
}

impl<T, E> RetryOutcome<T, E> {
    pub fn success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn attempts(&self) -> usize {
        self.log.len()
    }

    pub fn into_result(self) -> Result<T, RetryError<E>> {
        self.result
    }
}

/// Run `operation` until it succeeds, fails permanently, or the policy runs
/// out of attempts.
pub async fn execute_with_retry<F, Fut, T, E>(
    operation: &str,
    mut f: F,
    policy: RetryPolicy,
    sink: &dyn LogSink,
) -> RetryOutcome<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AttemptError<E>>>,
    E: fmt::Display,
{
    let attempts = policy.attempts.max(1);
    let mut log = Vec::new();
    let mut delay = Duration::ZERO;
    let mut attempt = 1;

    loop {
        sink.write_log(Level::Info, &format!("Try to execute {}", operation));

        let error = match f().await {
            Ok(value) => {
                log.push(AttemptRecord {
                    attempt,
                    delay_ms: delay.as_millis() as u64,
                    success: true,
                    error: None,
                });
                return RetryOutcome {
                    result: Ok(value),
                    log,
                };
            }
            Err(error) => error,
        };

        let message = format!(
            "Operation \"{}\" execution failed. Reason: {}",
            operation, error
        );
        sink.write_log(Level::Warn, &message);
        log.push(AttemptRecord {
            attempt,
            delay_ms: delay.as_millis() as u64,
            success: false,
            error: Some(message),
        });

        if attempt >= attempts || error.is_permanent() {
            return RetryOutcome {
                result: Err(RetryError {
                    last_error: error.into_inner(),
                    attempts: attempt,
                }),
                log,
            };
        }

        delay = policy.delay_for_attempt(attempt);
        sink.write_log(
            Level::Info,
            &format!(
                "{} retry attempt {} after {}ms",
                operation,
                attempt,
                delay.as_millis()
            ),
        );
        if delay > Duration::ZERO {
            tokio::time::sleep(delay).await;
        }
        attempt += 1;
    }
}

/// Reusable retry executor: a policy plus the sink it reports to.
#[derive(Clone)]
pub struct Retry {
    policy: RetryPolicy,
    sink: Arc<dyn LogSink>,
}

impl Retry {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            sink: Arc::new(GlobalSink::new("tollgate::retry")),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn execute<F, Fut, T, E>(&self, operation: &str, f: F) -> RetryOutcome<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AttemptError<E>>>,
        E: fmt::Display,
    {
        execute_with_retry(operation, f, self.policy.clone(), self.sink.as_ref()).await
    }
}

impl Default for Retry {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl fmt::Debug for Retry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retry")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
