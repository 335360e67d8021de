//! Type-specialized rule vocabularies.
//!
//! Each builder wraps a [`RuleListHandle`](crate::RuleListHandle) and only
//! exposes checks that make sense for its type. Checks see the field through
//! a typed view (`Option<&str>`, `Option<f64>`, ...) that is `None` when the
//! value is absent, null, or of another kind, so every comparison fails
//! instead of panicking on such values.
//!
//! All checks run on every validation, including after the type guard has
//! already failed.

mod array;
mod boolean;
mod number;
mod string;

pub use array::ArrayRules;
pub use boolean::BooleanRules;
pub use number::NumberRules;
pub use string::StringRules;

/// `"a, b, c"` for membership messages.
pub(crate) fn join_display<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
