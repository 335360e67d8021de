// Boolean checks

use crate::rules::{RuleListHandle, TypedRules};
use crate::{Model, ValueKind};

pub struct BooleanRules<'a, M: Model> {
    handle: RuleListHandle<'a, M>,
}

impl<'a, M: Model + 'static> TypedRules<'a, M> for BooleanRules<'a, M> {
    const GUARD: Option<ValueKind> = Some(ValueKind::Boolean);

    fn from_handle(handle: RuleListHandle<'a, M>) -> Self {
        Self { handle }
    }
}

impl<'a, M: Model + 'static> BooleanRules<'a, M> {
    /// Custom check over the boolean view and the whole model.
    pub fn must<P>(self, message: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(Option<bool>, &M) -> bool + Send + Sync + 'static,
    {
        Self {
            handle: self
                .handle
                .add_rule(message, move |value, model| predicate(value.as_bool(), model)),
        }
    }

    /// Exactly `true`; absent and null values fail.
    pub fn is_true(self) -> Self {
        let message = format!("{} must be true", self.handle.field_name());
        self.must(message, |value, _| value == Some(true))
    }

    /// Exactly `false`; absent and null values fail.
    pub fn is_false(self) -> Self {
        let message = format!("{} must be false", self.handle.field_name());
        self.must(message, |value, _| value == Some(false))
    }

    /// Override the message of the last declared check.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            handle: self.handle.with_message(message),
        }
    }
}
