// Number checks

use super::join_display;
use crate::rules::{RuleListHandle, TypedRules};
use crate::{Model, ValueKind};

/// Checks for numeric fields. Every comparison fails on NaN and on values
/// that are not numbers.
pub struct NumberRules<'a, M: Model> {
    handle: RuleListHandle<'a, M>,
}

impl<'a, M: Model + 'static> TypedRules<'a, M> for NumberRules<'a, M> {
    const GUARD: Option<ValueKind> = Some(ValueKind::Number);

    fn from_handle(handle: RuleListHandle<'a, M>) -> Self {
        Self { handle }
    }
}

impl<'a, M: Model + 'static> NumberRules<'a, M> {
    /// Custom check over the numeric view and the whole model.
    pub fn must<P>(self, message: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(Option<f64>, &M) -> bool + Send + Sync + 'static,
    {
        Self {
            handle: self
                .handle
                .add_rule(message, move |value, model| predicate(value.as_f64(), model)),
        }
    }

    fn check<P>(self, suffix: impl std::fmt::Display, predicate: P) -> Self
    where
        P: Fn(f64) -> bool + Send + Sync + 'static,
    {
        let message = format!("{} {}", self.handle.field_name(), suffix);
        self.must(message, move |value, _| value.is_some_and(&predicate))
    }

    /// Present and not NaN.
    pub fn required(self) -> Self {
        self.check("is required", |v| !v.is_nan())
    }

    /// Inclusive lower bound.
    pub fn min(self, min: impl Into<f64>) -> Self {
        let min = min.into();
        self.check(format!("must be >= {}", min), move |v| v >= min)
    }

    /// Inclusive upper bound.
    pub fn max(self, max: impl Into<f64>) -> Self {
        let max = max.into();
        self.check(format!("must be <= {}", max), move |v| v <= max)
    }

    /// Inclusive range.
    pub fn between(self, min: impl Into<f64>, max: impl Into<f64>) -> Self {
        let (min, max) = (min.into(), max.into());
        self.check(format!("must be between {} and {}", min, max), move |v| {
            v >= min && v <= max
        })
    }

    pub fn positive(self) -> Self {
        self.check("must be a positive number", |v| v > 0.0)
    }

    pub fn integer(self) -> Self {
        self.check("must be an integer", |v| v.is_finite() && v.fract() == 0.0)
    }

    pub fn one_of(self, allowed: &[f64]) -> Self {
        let allowed = allowed.to_vec();
        let suffix = format!("must be one of [{}]", join_display(&allowed));
        self.check(suffix, move |v| allowed.contains(&v))
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
    use crate::{IntoValue, Model, RuleSet, Value};
    use std::collections::HashMap;

    type Record = HashMap<String, Value>;

    fn record(age: impl IntoValue) -> Record {
        HashMap::from([("age".to_string(), age.to_value())])
    }

    fn messages(rules: &RuleSet<Record>, model: &Record) -> Vec<String> {
        rules
            .validate(model)
            .errors
            .into_iter()
            .flat_map(|e| e.errors)
            .collect()
    }

    fn age_rules() -> RuleSet<Record> {
        let mut rules: RuleSet<Record> = RuleSet::new();
        rules.rule_for("age").number().required().min(10).max(100);
        rules
    }

    #[test]
    fn test_below_min_reports_only_min() {
        assert_eq!(messages(&age_rules(), &record(5)), vec!["age must be >= 10"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let rules = age_rules();
        assert!(messages(&rules, &record(10)).is_empty());
        assert!(messages(&rules, &record(100)).is_empty());
        assert_eq!(messages(&rules, &record(9)), vec!["age must be >= 10"]);
        assert_eq!(messages(&rules, &record(101)), vec!["age must be <= 100"]);
    }

    #[test]
    fn test_nan_fails_required_and_bounds() {
        assert_eq!(
            messages(&age_rules(), &record(f64::NAN)),
            vec!["age is required", "age must be >= 10", "age must be <= 100"]
        );
    }

    #[test]
    fn test_wrong_type_is_reported_by_guard() {
        let model = record("42");
        assert_eq!(model.value_of("age"), Value::String("42".into()));
        assert_eq!(
            messages(&age_rules(), &model),
            vec![
                "age must be a number",
                "age is required",
                "age must be >= 10",
                "age must be <= 100",
            ]
        );
    }

    #[test]
    fn test_extra_checks() {
        let mut rules: RuleSet<Record> = RuleSet::new();
        rules
            .rule_for("age")
            .number()
            .between(1, 3)
            .positive()
            .integer()
            .one_of(&[1.0, 2.0]);

        assert!(messages(&rules, &record(2)).is_empty());
        assert_eq!(
            messages(&rules, &record(2.5)),
            vec!["age must be an integer", "age must be one of [1, 2]"]
        );
        assert_eq!(
            messages(&rules, &record(-1)),
            vec![
                "age must be between 1 and 3",
                "age must be a positive number",
                "age must be one of [1, 2]",
            ]
        );
    }

    #[test]
    fn test_custom_message() {
        let mut rules: RuleSet<Record> = RuleSet::new();
        rules
            .rule_for("age")
            .number()
            .min(18)
            .with_message("You must be an adult");

        assert_eq!(messages(&rules, &record(12)), vec!["You must be an adult"]);
    }
}
