// Rules, rule lists and the handles that fill them

use crate::builders::{ArrayRules, BooleanRules, NumberRules, StringRules};
use crate::{Field, Model, ValidationError, Value, ValueKind};
use std::fmt;
use std::sync::Arc;

type Predicate<M> = Arc<dyn Fn(&Value, &M) -> bool + Send + Sync>;

/// A single pass/fail check bound to one field.
pub struct Rule<M> {
    property: String,
    message: String,
    check: Predicate<M>,
}

impl<M> Rule<M> {
    pub fn new<P>(property: impl Into<String>, message: impl Into<String>, check: P) -> Self
    where
        P: Fn(&Value, &M) -> bool + Send + Sync + 'static,
    {
        Self {
            property: property.into(),
            message: message.into(),
            check: Arc::new(check),
        }
    }

    /// Run the check; a failure yields the rule's error.
    pub fn evaluate(&self, value: &Value, model: &M) -> Option<ValidationError> {
        if (self.check)(value, model) {
            None
        } else {
            Some(ValidationError::new(self.property.clone(), self.message.clone()))
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<M> Clone for Rule<M> {
    fn clone(&self) -> Self {
        Self {
            property: self.property.clone(),
            message: self.message.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

impl<M> fmt::Debug for Rule<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("property", &self.property)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Ordered rules of one field. Declaration order is evaluation order.
pub type RuleList<M> = Vec<Rule<M>>;

/// The implicit first rule of a typed builder: the value must be of `kind`.
pub fn type_guard<M: 'static>(property: &str, kind: ValueKind) -> Rule<M> {
    Rule::new(
        property,
        format!("{} must be a {}", property, kind),
        move |value: &Value, _: &M| kind.matches(value),
    )
}

// ============================================================================
// Base builder
// ============================================================================

/// Non-owning handle on one field's rule list.
///
/// The list itself lives in the [`RuleSet`](crate::RuleSet); the handle only
/// appends to it.
pub struct RuleListHandle<'a, M: Model> {
    field: M::Field,
    rules: &'a mut RuleList<M>,
}

impl<'a, M: Model + 'static> RuleListHandle<'a, M> {
    pub fn new(field: M::Field, rules: &'a mut RuleList<M>) -> Self {
        Self { field, rules }
    }

    pub fn field(&self) -> M::Field {
        self.field
    }

    pub fn field_name(&self) -> &str {
        self.field.name()
    }

    /// Number of rules currently in the list.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Append a prebuilt rule.
    pub fn push(self, rule: Rule<M>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Register a deferred check: when `predicate` returns false for the
    /// field's value, validation reports `message` for this field.
    pub fn add_rule<P>(self, message: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(&Value, &M) -> bool + Send + Sync + 'static,
    {
        let rule = Rule::new(self.field.name(), message, predicate);
        self.push(rule)
    }

    /// Replace the message of the most recently declared rule on this field.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        if let Some(last) = self.rules.last_mut() {
            last.message = message.into();
        }
        self
    }
}

// ============================================================================
// Typed builders
// ============================================================================

/// A type-specialized vocabulary of checks over a [`RuleListHandle`].
///
/// `GUARD` names the kind asserted by the rule that [`typed_rules`] pushes
/// before handing out the builder; `None` means no guard.
pub trait TypedRules<'a, M: Model>: Sized {
    const GUARD: Option<ValueKind>;

    fn from_handle(handle: RuleListHandle<'a, M>) -> Self;
}

/// Push the builder's type guard (if any) and wrap the handle.
pub fn typed_rules<'a, M, R>(handle: RuleListHandle<'a, M>) -> R
where
    M: Model + 'static,
    R: TypedRules<'a, M>,
{
    let handle = match R::GUARD {
        Some(kind) => {
            let guard = type_guard(handle.field_name(), kind);
            handle.push(guard)
        }
        None => handle,
    };
    R::from_handle(handle)
}

pub fn string_rules<M: Model + 'static>(handle: RuleListHandle<'_, M>) -> StringRules<'_, M> {
    typed_rules(handle)
}

pub fn number_rules<M: Model + 'static>(handle: RuleListHandle<'_, M>) -> NumberRules<'_, M> {
    typed_rules(handle)
}

pub fn boolean_rules<M: Model + 'static>(handle: RuleListHandle<'_, M>) -> BooleanRules<'_, M> {
    typed_rules(handle)
}

pub fn array_rules<M: Model + 'static>(handle: RuleListHandle<'_, M>) -> ArrayRules<'_, M> {
    typed_rules(handle)
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Returned by [`RuleSet::rule_for`](crate::RuleSet::rule_for); picks the
/// vocabulary for the field.
///
/// A field may be routed through several vocabularies. Each call appends to
/// the same list.
pub struct RuleBuilder<'a, M: Model> {
    handle: RuleListHandle<'a, M>,
}

impl<'a, M: Model + 'static> RuleBuilder<'a, M> {
    pub fn new(handle: RuleListHandle<'a, M>) -> Self {
        Self { handle }
    }

    pub fn string(self) -> StringRules<'a, M> {
        string_rules(self.handle)
    }

    pub fn number(self) -> NumberRules<'a, M> {
        number_rules(self.handle)
    }

    pub fn boolean(self) -> BooleanRules<'a, M> {
        boolean_rules(self.handle)
    }

    /// Array checks. Unlike the other vocabularies this one pushes no type
    /// guard.
    pub fn array(self) -> ArrayRules<'a, M> {
        array_rules(self.handle)
    }

    /// An untyped rule over the raw field value.
    pub fn rule<P>(self, message: impl Into<String>, predicate: P) -> RuleListHandle<'a, M>
    where
        P: Fn(&Value, &M) -> bool + Send + Sync + 'static,
    {
        self.handle.add_rule(message, predicate)
    }
}
