// String checks

use super::join_display;
use crate::patterns;
use crate::rules::{RuleListHandle, TypedRules};
use crate::{Model, ValueKind};
use regex::Regex;

/// Checks for text fields. Lengths count characters, not bytes.
pub struct StringRules<'a, M: Model> {
    handle: RuleListHandle<'a, M>,
}

impl<'a, M: Model + 'static> TypedRules<'a, M> for StringRules<'a, M> {
    const GUARD: Option<ValueKind> = Some(ValueKind::String);

    fn from_handle(handle: RuleListHandle<'a, M>) -> Self {
        Self { handle }
    }
}

impl<'a, M: Model + 'static> StringRules<'a, M> {
    /// Custom check over the string view and the whole model.
    pub fn must<P>(self, message: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(Option<&str>, &M) -> bool + Send + Sync + 'static,
    {
        Self {
            handle: self
                .handle
                .add_rule(message, move |value, model| predicate(value.as_str(), model)),
        }
    }

    fn check<P>(self, suffix: impl std::fmt::Display, predicate: P) -> Self
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let message = format!("{} {}", self.handle.field_name(), suffix);
        self.must(message, move |value, _| value.is_some_and(&predicate))
    }

    /// Present and non-empty.
    pub fn required(self) -> Self {
        self.check("is required", |v| !v.is_empty())
    }

    /// Same condition as [`required`](Self::required), different message.
    pub fn not_empty(self) -> Self {
        self.check("should not be empty", |v| !v.is_empty())
    }

    pub fn min_length(self, min: usize) -> Self {
        self.check(format!("must be at least {} characters long", min), move |v| {
            v.chars().count() >= min
        })
    }

    pub fn max_length(self, max: usize) -> Self {
        self.check(format!("must be at most {} characters long", max), move |v| {
            v.chars().count() <= max
        })
    }

    pub fn email(self) -> Self {
        self.check("must be a valid email", patterns::is_email)
    }

    pub fn url(self) -> Self {
        self.check("must be a valid URL", patterns::is_url)
    }

    pub fn uuid(self) -> Self {
        self.check("must be a valid UUID", patterns::is_uuid)
    }

    /// ASCII letters and digits only, at least one character.
    pub fn alphanumeric(self) -> Self {
        self.check("must contain only letters and numbers", patterns::is_alphanumeric)
    }

    pub fn matches(self, pattern: &Regex) -> Self {
        let pattern = pattern.clone();
        self.check("does not match required pattern", move |v| pattern.is_match(v))
    }

    pub fn one_of(self, allowed: &[&str]) -> Self {
        let allowed: Vec<String> = allowed.iter().map(|s| s.to_string()).collect();
        let suffix = format!("must be one of [{}]", join_display(&allowed));
        self.check(suffix, move |v| allowed.iter().any(|a| a == v))
    }

    /// Override the message of the last declared check.
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            handle: self.handle.with_message(message),
        }
    }
}
