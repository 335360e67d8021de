//! Declarative model validation for Tollgate
//!
//! Rules are attached to the fields of a model type, every rule runs on each
//! validation, and the failures come back as a field-keyed report.
//!
//! # Examples
//!
//! ## Declaring a validator
//!
//! ```
//! use tollgate_validation::{IntoValue, Model, RuleSet, Validator, Value};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum SignUpField {
//!     Name,
//!     Age,
//!     Terms,
//! }
//!
//! impl tollgate_validation::Field for SignUpField {
//!     fn name(&self) -> &str {
//!         match self {
//!             SignUpField::Name => "name",
//!             SignUpField::Age => "age",
//!             SignUpField::Terms => "terms",
//!         }
//!     }
//! }
//!
//! struct SignUp {
//!     name: Option<String>,
//!     age: f64,
//!     terms: bool,
//! }
//!
//! impl Model for SignUp {
//!     type Field = SignUpField;
//!
//!     fn value_of(&self, field: SignUpField) -> Value {
//!         match field {
//!             SignUpField::Name => self.name.to_value(),
//!             SignUpField::Age => self.age.to_value(),
//!             SignUpField::Terms => self.terms.to_value(),
//!         }
//!     }
//! }
//!
//! struct SignUpValidator {
//!     rules: RuleSet<SignUp>,
//! }
//!
//! impl SignUpValidator {
//!     fn new() -> Self {
//!         let mut rules = RuleSet::<SignUp>::new();
//!         rules.rule_for(SignUpField::Age).number().required().min(10).max(100);
//!         rules.rule_for(SignUpField::Name).string().required().min_length(1).max_length(255);
//!         rules.rule_for(SignUpField::Terms).boolean().is_true();
//!         Self { rules }
//!     }
//! }
//!
//! impl Validator for SignUpValidator {
//!     type Model = SignUp;
//!
//!     fn rules(&self) -> &RuleSet<SignUp> {
//!         &self.rules
//!     }
//! }
//!
//! let result = SignUpValidator::new().validate(&SignUp {
//!     name: None,
//!     age: 5.0,
//!     terms: true,
//! });
//!
//! assert!(!result.is_valid);
//! assert_eq!(result.errors_for("age").unwrap(), ["age must be >= 10"]);
//! assert_eq!(result.errors_for("name").unwrap()[0], "name must be a string");
//! assert!(result.errors_for("terms").is_none());
//! ```
//!
//! ## Validating JSON
//!
//! `serde_json::Value` is a model whose fields are its object keys.
//!
//! ```
//! use tollgate_validation::RuleSet;
//! use serde_json::json;
//!
//! let mut rules = RuleSet::<serde_json::Value>::new();
//! rules.rule_for("email").string().required().email();
//! rules.rule_for("tags").array().min_length(1);
//!
//! let result = rules.validate(&json!({ "email": "ada@example.com", "tags": [] }));
//! assert_eq!(result.errors_for("tags").unwrap(), ["tags must have at least 1 items"]);
//! assert!(result.into_result().is_err());
//! ```

mod builders;
mod errors;
mod patterns;
mod rules;
mod validator;
mod value;

pub use builders::*;
pub use errors::*;
pub use rules::*;
pub use validator::*;
pub use value::*;
