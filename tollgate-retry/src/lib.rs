//! Retry helper for Tollgate
//!
//! Runs a fallible async operation with exponential backoff. Each attempt is
//! reported through a [`tollgate_log::LogSink`], and the returned
//! [`RetryOutcome`] carries a per-attempt log alongside the result.
//!
//! ```
//! use std::time::Duration;
//! use tollgate_retry::RetryOptions;
//!
//! let policy = RetryOptions {
//!     attempts: Some(3),
//!     min_delay: Some(Duration::from_millis(100)),
//!     ..Default::default()
//! }
//! .resolve();
//!
//! assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
//! assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(200));
//! ```

mod policy;
mod retry;

pub use policy::*;
pub use retry::*;
