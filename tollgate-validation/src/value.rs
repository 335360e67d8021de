// Runtime view of model fields

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Dynamic value of a single model field.
///
/// `Undefined` is an absent field, `Null` an explicitly empty one. Numbers
/// are `f64` and may be NaN.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

/// The primitive kinds a type-guard rule can assert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Array,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Array => "array",
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        value.kind() == Some(*self)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Kind of the value, `None` for undefined, null and objects.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::String(_) => Some(ValueKind::String),
            Value::Number(_) => Some(ValueKind::Number),
            Value::Bool(_) => Some(ValueKind::Boolean),
            Value::Array(_) => Some(ValueKind::Array),
            Value::Undefined | Value::Null | Value::Object(_) => None,
        }
    }

    /// True for `Undefined` and `Null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Member lookup on objects; anything else yields `Undefined`.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Object(map) => map.get(key).cloned().unwrap_or_default(),
            _ => Value::Undefined,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

// ============================================================================
// Conversion into `Value`
// ============================================================================

/// Conversion used by [`Model`] implementations to expose their fields.
pub trait IntoValue {
    fn to_value(&self) -> Value;
}

impl IntoValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl IntoValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl IntoValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl IntoValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! number_into_value {
    ($($ty:ty),*) => {
        $(
            impl IntoValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Number(*self as f64)
                }
            }
        )*
    };
}

number_into_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: IntoValue> IntoValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: IntoValue> IntoValue for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(IntoValue::to_value).collect())
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: IntoValue + ?Sized> IntoValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: IntoValue> IntoValue for HashMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Object(self.iter().map(|(k, v)| (k.clone(), v.to_value())).collect())
    }
}

impl IntoValue for serde_json::Value {
    fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

// ============================================================================
// Models and their fields
// ============================================================================

/// Key naming one field of a [`Model`].
///
/// Implemented for `&'static str`; a fieldless enum works just as well and
/// keeps typos out of rule declarations.
pub trait Field: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    fn name(&self) -> &str;
}

impl Field for &'static str {
    fn name(&self) -> &str {
        self
    }
}

/// A record whose fields can be read by key.
///
/// ```
/// use tollgate_validation::{IntoValue, Model, Value};
///
/// struct SignUp {
///     name: Option<String>,
///     age: u32,
/// }
///
/// impl Model for SignUp {
///     type Field = &'static str;
///
///     fn value_of(&self, field: &'static str) -> Value {
///         match field {
///             "name" => self.name.to_value(),
///             "age" => self.age.to_value(),
///             _ => Value::Undefined,
///         }
///     }
/// }
///
/// let model = SignUp { name: None, age: 30 };
/// assert_eq!(model.value_of("age"), Value::Number(30.0));
/// assert_eq!(model.value_of("name"), Value::Null);
/// ```
pub trait Model {
    type Field: Field;

    fn value_of(&self, field: Self::Field) -> Value;
}

impl Model for serde_json::Value {
    type Field = &'static str;

    fn value_of(&self, field: &'static str) -> Value {
        match self.get(field) {
            Some(value) => Value::from(value.clone()),
            None => Value::Undefined,
        }
    }
}

impl Model for HashMap<String, Value> {
    type Field = &'static str;

    fn value_of(&self, field: &'static str) -> Value {
        self.get(field).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of_values() {
        assert_eq!(Value::String("a".into()).kind(), Some(ValueKind::String));
        assert_eq!(Value::Number(f64::NAN).kind(), Some(ValueKind::Number));
        assert_eq!(Value::Bool(false).kind(), Some(ValueKind::Boolean));
        assert_eq!(Value::Array(vec![]).kind(), Some(ValueKind::Array));
        assert_eq!(Value::Undefined.kind(), None);
        assert_eq!(Value::Null.kind(), None);
    }

    #[test]
    fn test_json_model_lookup() {
        let model = json!({ "name": "Ada", "tags": ["a", "b"], "nothing": null });

        assert_eq!(model.value_of("name"), Value::String("Ada".into()));
        assert_eq!(model.value_of("nothing"), Value::Null);
        assert_eq!(model.value_of("missing"), Value::Undefined);
        assert_eq!(model.value_of("tags").as_array().map(<[Value]>::len), Some(2));
    }

    #[test]
    fn test_non_object_json_model_is_all_undefined() {
        assert_eq!(json!(42).value_of("anything"), Value::Undefined);
    }

    #[test]
    fn test_into_value_conversions() {
        assert_eq!(5u8.to_value(), Value::Number(5.0));
        assert_eq!("x".to_value(), Value::String("x".into()));
        assert_eq!(None::<String>.to_value(), Value::Null);
        assert_eq!(
            vec![true, false].to_value(),
            Value::Array(vec![Value::Bool(true), Value::Bool(false)])
        );
    }

    #[test]
    fn test_object_get() {
        let value = Value::from(json!({ "inner": { "n": 1 } }));
        assert_eq!(value.get("inner").get("n"), Value::Number(1.0));
        assert_eq!(value.get("nope"), Value::Undefined);
        assert_eq!(Value::Null.get("x"), Value::Undefined);
    }
}
