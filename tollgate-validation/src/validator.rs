// Rule registry and the validator contract

use crate::rules::{RuleBuilder, RuleList, RuleListHandle};
use crate::{Field, FieldErrors, Model, ValidationResult};
use std::fmt;
use tollgate_log::{debug, trace};

const LOG_TARGET: &str = "tollgate::validation";

/// Ordered registry of rule lists, one per declared field.
///
/// Fields keep the order of their first [`rule_for`](Self::rule_for) call;
/// that is also the order of [`ValidationResult::errors`].
pub struct RuleSet<M: Model> {
    entries: Vec<(M::Field, RuleList<M>)>,
}

impl<M: Model + 'static> RuleSet<M> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Start declaring rules for `field`.
    ///
    /// Creates the field's rule list on first use; later calls append to the
    /// existing list.
    pub fn rule_for(&mut self, field: M::Field) -> RuleBuilder<'_, M> {
        let index = match self.entries.iter().position(|(f, _)| *f == field) {
            Some(index) => index,
            None => {
                trace!(target: LOG_TARGET, "registering rule list for `{}`", field.name());
                self.entries.push((field, RuleList::new()));
                self.entries.len() - 1
            }
        };

        let (field, rules) = &mut self.entries[index];
        RuleBuilder::new(RuleListHandle::new(*field, rules))
    }

    /// Run every rule of every field against `model`.
    ///
    /// Nothing short-circuits: a failed type guard is reported and the
    /// remaining checks still run. A panicking rule aborts the whole call.
    pub fn validate(&self, model: &M) -> ValidationResult {
        let mut failures: Vec<FieldErrors> = Vec::new();

        for (field, rules) in &self.entries {
            let value = model.value_of(*field);

            for rule in rules {
                let Some(error) = rule.evaluate(&value, model) else {
                    continue;
                };

                match failures.iter_mut().find(|f| f.property == error.property) {
                    Some(entry) => entry.errors.push(error.message),
                    None => failures.push(FieldErrors {
                        property: error.property,
                        errors: vec![error.message],
                    }),
                }
            }
        }

        let result = ValidationResult::from_field_errors(failures);
        debug!(
            target: LOG_TARGET,
            "validated {} field(s): {} failing, {} message(s)",
            self.entries.len(),
            result.errors.len(),
            result.error_count()
        );
        result
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = M::Field> + '_ {
        self.entries.iter().map(|(field, _)| *field)
    }

    /// Number of rules declared for `field`, including type guards.
    pub fn rule_count(&self, field: M::Field) -> usize {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map_or(0, |(_, rules)| rules.len())
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M: Model + 'static> Default for RuleSet<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Clone for RuleSet<M> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<M: Model> fmt::Debug for RuleSet<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(field, rules)| (field, rules.len())))
            .finish()
    }
}

/// A concrete validator: owns a [`RuleSet`] filled at construction.
///
/// ```
/// use tollgate_validation::{RuleSet, Validator};
/// use serde_json::json;
///
/// struct SignUpValidator {
///     rules: RuleSet<serde_json::Value>,
/// }
///
/// impl SignUpValidator {
///     fn new() -> Self {
///         let mut rules = RuleSet::<serde_json::Value>::new();
///         rules.rule_for("age").number().required().min(10).max(100);
///         rules.rule_for("name").string().required().max_length(255);
///         Self { rules }
///     }
/// }
///
/// impl Validator for SignUpValidator {
///     type Model = serde_json::Value;
///
///     fn rules(&self) -> &RuleSet<Self::Model> {
///         &self.rules
///     }
/// }
///
/// let result = SignUpValidator::new().validate(&json!({ "age": 5, "name": "Ada" }));
/// assert!(!result.is_valid);
/// assert_eq!(result.errors_for("age").unwrap(), ["age must be >= 10"]);
/// ```
pub trait Validator {
    type Model: Model + 'static;

    fn rules(&self) -> &RuleSet<Self::Model>;

    fn validate(&self, model: &Self::Model) -> ValidationResult {
        self.rules().validate(model)
    }
}

impl<M: Model + 'static> Validator for RuleSet<M> {
    type Model = M;

    fn rules(&self) -> &RuleSet<M> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type Json = serde_json::Value;

    #[test]
    fn test_no_rules_is_valid() {
        let rules: RuleSet<Json> = RuleSet::new();
        let result = rules.validate(&json!({ "name": 1, "age": "x" }));
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_rule_for_does_not_reset() {
        let mut rules: RuleSet<Json> = RuleSet::new();
        rules.rule_for("name").string().required();
        rules.rule_for("name").string().max_length(3);

        assert_eq!(rules.len(), 1);
        assert_eq!(rules.rule_count("name"), 4);
        assert_eq!(rules.rule_count("other"), 0);
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let mut rules: RuleSet<Json> = RuleSet::new();
        rules.rule_for("b").string();
        rules.rule_for("a").number();
        rules.rule_for("b").string();

        assert_eq!(rules.fields().collect::<Vec<_>>(), vec!["b", "a"]);

        let result = rules.validate(&json!({}));
        let order: Vec<_> = result.errors.iter().map(|e| e.property.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
        assert_eq!(result.errors_for("b").unwrap().len(), 2);
    }

    #[test]
    fn test_untyped_rule() {
        let mut rules: RuleSet<Json> = RuleSet::new();
        rules
            .rule_for("end")
            .rule("end must be after start", |end, model: &Json| {
                match (end.as_f64(), model["start"].as_f64()) {
                    (Some(end), Some(start)) => end > start,
                    _ => false,
                }
            });

        assert!(rules.validate(&json!({ "start": 1, "end": 2 })).is_valid);
        assert!(!rules.validate(&json!({ "start": 3, "end": 2 })).is_valid);
    }

    #[test]
    fn test_rules_added_later_affect_later_runs() {
        let mut rules: RuleSet<Json> = RuleSet::new();
        let model = json!({ "age": 5 });

        rules.rule_for("age").number();
        assert!(rules.validate(&model).is_valid);

        rules.rule_for("age").number().min(10);
        assert!(!rules.validate(&model).is_valid);
    }

    #[test]
    fn test_debug_lists_rule_counts() {
        let mut rules: RuleSet<Json> = RuleSet::new();
        rules.rule_for("age").number().min(1);
        assert_eq!(format!("{:?}", rules), r#"{"age": 2}"#);
    }

    #[test]
    #[should_panic(expected = "broken rule")]
    fn test_panicking_rule_propagates() {
        let mut rules: RuleSet<Json> = RuleSet::new();
        rules.rule_for("x").rule("never reported", |_, _| panic!("broken rule"));
        rules.validate(&json!({}));
    }
}
