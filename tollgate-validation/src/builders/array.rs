// Array checks

use crate::rules::{RuleListHandle, TypedRules};
use crate::{Model, Value, ValueKind};

/// Checks for list fields.
///
/// This vocabulary installs no type guard: a non-array value only shows up
/// through the failures of the checks declared here.
pub struct ArrayRules<'a, M: Model> {
    handle: RuleListHandle<'a, M>,
}

impl<'a, M: Model + 'static> TypedRules<'a, M> for ArrayRules<'a, M> {
    const GUARD: Option<ValueKind> = None;

    fn from_handle(handle: RuleListHandle<'a, M>) -> Self {
        Self { handle }
    }
}

impl<'a, M: Model + 'static> ArrayRules<'a, M> {
    /// Custom check over the items and the whole model.
    pub fn must<P>(self, message: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(Option<&[Value]>, &M) -> bool + Send + Sync + 'static,
    {
        Self {
            handle: self
                .handle
                .add_rule(message, move |value, model| predicate(value.as_array(), model)),
        }
    }

    fn check<P>(self, suffix: impl std::fmt::Display, predicate: P) -> Self
    where
        P: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        let message = format!("{} {}", self.handle.field_name(), suffix);
        self.must(message, move |items, _| items.is_some_and(&predicate))
    }

    pub fn min_length(self, min: usize) -> Self {
        self.check(format!("must have at least {} items", min), move |items| {
            items.len() >= min
        })
    }

    pub fn max_length(self, max: usize) -> Self {
        self.check(format!("must have at most {} items", max), move |items| {
            items.len() <= max
        })
    }

    pub fn not_empty(self) -> Self {
        self.check("should not be empty", |items| !items.is_empty())
    }

    /// Override the message of the last declared check.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            handle: self.handle.with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::RuleSet;
    use serde_json::json;

    type Json = serde_json::Value;

    #[test]
    fn test_lengths() {
        let mut rules: RuleSet<Json> = RuleSet::new();
        rules.rule_for("tags").array().min_length(1).max_length(2);

        assert!(rules.validate(&json!({ "tags": ["a"] })).is_valid);
        assert_eq!(
            rules.validate(&json!({ "tags": [] })).errors_for("tags").unwrap(),
            ["tags must have at least 1 items"]
        );
        assert_eq!(
            rules.validate(&json!({ "tags": [1, 2, 3] })).errors_for("tags").unwrap(),
            ["tags must have at most 2 items"]
        );
    }

    #[test]
    fn test_non_array_has_no_guard_message() {
        let mut rules: RuleSet<Json> = RuleSet::new();
        rules.rule_for("tags").array().not_empty();

        assert_eq!(rules.rule_count("tags"), 1);
        assert_eq!(
            rules.validate(&json!({ "tags": "a,b" })).errors_for("tags").unwrap(),
            ["tags should not be empty"]
        );
    }

    #[test]
    fn test_must_inspects_items() {
        let mut rules: RuleSet<Json> = RuleSet::new();
        rules
            .rule_for("scores")
            .array()
            .must("scores must all be numbers", |items, _| {
                items.is_some_and(|items| items.iter().all(|v| v.as_f64().is_some()))
            });

        assert!(rules.validate(&json!({ "scores": [1, 2.5] })).is_valid);
        assert!(!rules.validate(&json!({ "scores": [1, "x"] })).is_valid);
    }
}
