// Tollgate - declarative model validation for Rust
//
// This library bundles the validation engine with the logging sink it reports
// through and a retry helper for fallible async operations.

// Logging is always available
pub use tollgate_log as log;

// Re-export optional crates
#[cfg(feature = "validation")]
pub use tollgate_validation as validation;

#[cfg(feature = "retry")]
pub use tollgate_retry as retry;

// Prelude for common imports
pub mod prelude {
    pub use crate::log::{GlobalSink, Level, LogSink, MemorySink};

    #[cfg(feature = "validation")]
    pub use crate::validation::{
        ArrayRules, BooleanRules, Field, FieldErrors, IntoValue, Model, NumberRules, RuleBuilder,
        RuleSet, StringRules, ValidationError, ValidationErrors, ValidationResult, Validator,
        Value, ValueKind,
    };

    #[cfg(feature = "retry")]
    pub use crate::retry::{
        AttemptError, Retry, RetryError, RetryOptions, RetryOutcome, RetryPolicy,
        execute_with_retry,
    };
}
