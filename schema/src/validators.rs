//! Field validators.
//!
//! Validators run during load, after a value has passed its type check.
//! They are the only caller-supplied hook into the validation pipeline.
//! Built-ins lean on the `validator` crate's primitives and report through
//! its [`ValidationError`].

use crate::FieldType;
use regex::Regex;
use sc_core::Value;
use std::borrow::Cow;
use std::sync::Arc;
use validator::{ValidateEmail, ValidateLength, ValidateRange, ValidateUrl, ValidationError};

/// A check attached to a field.
pub trait Validator: Send + Sync {
    /// Validate a non-null value whose shape already matches the field.
    fn validate(&self, value: &Value) -> Result<(), ValidationError>;

    /// Short description used in schema diagnostics.
    fn description(&self) -> String;

    /// Whether this validator can check values of the given field type.
    fn accepts(&self, ty: &FieldType) -> bool {
        let _ = ty;
        true
    }
}

/// Renders a validator failure as a field error message.
pub fn message_of(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => format!("Invalid value ({}).", error.code),
    }
}

fn failure(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

fn accepts_any(ty: &FieldType, check: &dyn Fn(&FieldType) -> bool) -> bool {
    match ty {
        FieldType::Optional(inner) => accepts_any(inner, check),
        FieldType::Union(members) => members.iter().any(check),
        FieldType::Any => true,
        other => check(other),
    }
}

/// Inclusive numeric bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    min: Option<f64>,
    max: Option<f64>,
}

impl Range {
    pub fn new(min: impl Into<f64>, max: impl Into<f64>) -> Self {
        Self {
            min: Some(min.into()),
            max: Some(max.into()),
        }
    }

    pub fn at_least(min: impl Into<f64>) -> Self {
        Self {
            min: Some(min.into()),
            max: None,
        }
    }

    pub fn at_most(max: impl Into<f64>) -> Self {
        Self {
            min: None,
            max: Some(max.into()),
        }
    }

    fn message(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!(
                "Must be greater than or equal to {min} and less than or equal to {max}.",
            ),
            (Some(min), None) => format!("Must be greater than or equal to {min}."),
            (None, Some(max)) => format!("Must be less than or equal to {max}."),
            (None, None) => "Out of range.".to_string(),
        }
    }
}

impl Validator for Range {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let Some(number) = value.as_f64() else {
            return Ok(());
        };
        if number.validate_range(self.min, self.max, None, None) {
            Ok(())
        } else {
            let mut error = failure("range", self.message());
            error.add_param(Cow::from("value"), &number);
            Err(error)
        }
    }

    fn description(&self) -> String {
        format!("Range({:?}, {:?})", self.min, self.max)
    }

    fn accepts(&self, ty: &FieldType) -> bool {
        accepts_any(ty, &|t| matches!(t, FieldType::Int | FieldType::Float))
    }
}

/// Length bounds for strings (in characters), sequences and mappings.
#[derive(Debug, Clone, PartialEq)]
pub struct Length {
    min: Option<u64>,
    max: Option<u64>,
    equal: Option<u64>,
}

impl Length {
    pub fn new(min: u64, max: u64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            equal: None,
        }
    }

    pub fn at_least(min: u64) -> Self {
        Self {
            min: Some(min),
            max: None,
            equal: None,
        }
    }

    pub fn at_most(max: u64) -> Self {
        Self {
            min: None,
            max: Some(max),
            equal: None,
        }
    }

    pub fn exactly(equal: u64) -> Self {
        Self {
            min: None,
            max: None,
            equal: Some(equal),
        }
    }

    fn message(&self) -> String {
        match (self.equal, self.min, self.max) {
            (Some(equal), _, _) => format!("Length must be {equal}."),
            (None, Some(min), Some(max)) => format!("Length must be between {min} and {max}."),
            (None, Some(min), None) => format!("Shorter than minimum length {min}."),
            (None, None, Some(max)) => format!("Longer than maximum length {max}."),
            (None, None, None) => "Invalid length.".to_string(),
        }
    }
}

impl Validator for Length {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let ok = match value {
            Value::String(s) => s.validate_length(self.min, self.max, self.equal),
            Value::Sequence(items) => items.validate_length(self.min, self.max, self.equal),
            Value::Mapping(map) => {
                let len = map.len() as u64;
                self.equal.map_or(true, |equal| len == equal)
                    && len.validate_range(self.min, self.max, None, None)
            }
            _ => true,
        };
        if ok {
            Ok(())
        } else {
            Err(failure("length", self.message()))
        }
    }

    fn description(&self) -> String {
        format!("Length({:?}, {:?}, {:?})", self.min, self.max, self.equal)
    }

    fn accepts(&self, ty: &FieldType) -> bool {
        accepts_any(ty, &|t| {
            matches!(t, FieldType::Str | FieldType::Seq(_) | FieldType::Map(_))
        })
    }
}

/// The value must equal one of the listed choices.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOf {
    choices: Vec<Value>,
}

impl OneOf {
    pub fn new<V: Into<Value>>(choices: impl IntoIterator<Item = V>) -> Self {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    fn rendered_choices(&self) -> String {
        self.choices
            .iter()
            .map(|choice| match choice {
                Value::String(s) => s.clone(),
                Value::Integer(i) => i.to_string(),
                Value::Float(f) => f.to_string(),
                Value::Bool(b) => b.to_string(),
                other => other.type_name().to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Validator for OneOf {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if self.choices.contains(value) {
            Ok(())
        } else {
            Err(failure(
                "one_of",
                format!("Must be one of: {}.", self.rendered_choices()),
            ))
        }
    }

    fn description(&self) -> String {
        format!("OneOf({})", self.rendered_choices())
    }

    fn accepts(&self, ty: &FieldType) -> bool {
        accepts_any(ty, &FieldType::is_primitive)
    }
}

/// The string must match a regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }
}

impl Validator for Pattern {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value.as_str() {
            Some(s) if !self.regex.is_match(s) => Err(failure(
                "regex",
                "String does not match expected pattern.".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn description(&self) -> String {
        format!("Pattern({})", self.regex.as_str())
    }

    fn accepts(&self, ty: &FieldType) -> bool {
        accepts_any(ty, &|t| matches!(t, FieldType::Str))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Validator for Email {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value.as_str() {
            Some(s) if !s.validate_email() => {
                Err(failure("email", "Not a valid email address.".to_string()))
            }
            _ => Ok(()),
        }
    }

    fn description(&self) -> String {
        "Email".to_string()
    }

    fn accepts(&self, ty: &FieldType) -> bool {
        accepts_any(ty, &|t| matches!(t, FieldType::Str))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Url;

impl Validator for Url {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        match value.as_str() {
            Some(s) if !s.validate_url() => Err(failure("url", "Not a valid URL.".to_string())),
            _ => Ok(()),
        }
    }

    fn description(&self) -> String {
        "Url".to_string()
    }

    fn accepts(&self, ty: &FieldType) -> bool {
        accepts_any(ty, &|t| matches!(t, FieldType::Str))
    }
}

/// A caller-supplied boolean check with a fixed message.
#[derive(Clone)]
pub struct Predicate {
    message: String,
    check: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Predicate {
    pub fn new<F>(message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            check: Arc::new(check),
        }
    }
}

impl Validator for Predicate {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if (self.check)(value) {
            Ok(())
        } else {
            Err(failure("predicate", self.message.clone()))
        }
    }

    fn description(&self) -> String {
        format!("Predicate({})", self.message)
    }
}

/// A plain function in the `validator` crate's custom-function style.
#[derive(Clone, Copy)]
pub struct Custom {
    name: &'static str,
    function: fn(&Value) -> Result<(), ValidationError>,
}

impl Custom {
    pub fn new(name: &'static str, function: fn(&Value) -> Result<(), ValidationError>) -> Self {
        Self { name, function }
    }
}

impl Validator for Custom {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        (self.function)(value)
    }

    fn description(&self) -> String {
        format!("Custom({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<(), ValidationError>) -> String {
        message_of(&result.unwrap_err())
    }

    #[test]
    fn test_range_messages() {
        let range = Range::new(18, 60);
        assert!(range.validate(&Value::from(18)).is_ok());
        assert!(range.validate(&Value::from(60)).is_ok());
        assert_eq!(
            message(range.validate(&Value::from(100))),
            "Must be greater than or equal to 18 and less than or equal to 60.",
        );
        assert_eq!(
            message(Range::at_least(1).validate(&Value::from(0))),
            "Must be greater than or equal to 1.",
        );
        assert_eq!(
            message(Range::at_most(1.5).validate(&Value::from(2))),
            "Must be less than or equal to 1.5.",
        );
    }

    #[test]
    fn test_range_accepts_numeric_shapes_only() {
        let range = Range::new(0, 1);
        assert!(range.accepts(&FieldType::Int));
        assert!(range.accepts(&FieldType::optional(FieldType::Float)));
        assert!(range.accepts(&FieldType::union([FieldType::Str, FieldType::Int])));
        assert!(!range.accepts(&FieldType::Str));
        assert!(!range.accepts(&FieldType::seq(FieldType::Int)));
    }

    #[test]
    fn test_length() {
        let length = Length::new(1, 3);
        assert!(length.validate(&Value::from("ab")).is_ok());
        assert!(length.validate(&Value::from("日本語")).is_ok());
        assert_eq!(
            message(length.validate(&Value::from(""))),
            "Length must be between 1 and 3.",
        );
        assert!(length.validate(&Value::from(vec![1, 2])).is_ok());
        assert!(length.validate(&Value::from(vec![1, 2, 3, 4])).is_err());

        let exact = Length::exactly(1);
        let map: Value = [("a", 1)].into_iter().collect();
        assert!(exact.validate(&map).is_ok());
        assert!(exact.validate(&Value::empty_mapping()).is_err());
        assert!(!exact.accepts(&FieldType::Int));
    }

    #[test]
    fn test_one_of() {
        let levels = OneOf::new(["debug", "info"]);
        assert!(levels.validate(&Value::from("info")).is_ok());
        assert_eq!(
            message(levels.validate(&Value::from("trace"))),
            "Must be one of: debug, info.",
        );
    }

    #[test]
    fn test_pattern_email_url() {
        let pattern = Pattern::new(r"^\d+\.\d+$").unwrap();
        assert!(pattern.validate(&Value::from("1.0")).is_ok());
        assert!(pattern.validate(&Value::from("one")).is_err());

        assert!(Email.validate(&Value::from("tom@gmail.com")).is_ok());
        assert_eq!(
            message(Email.validate(&Value::from("tom"))),
            "Not a valid email address.",
        );

        assert!(Url.validate(&Value::from("https://example.com")).is_ok());
        assert!(Url.validate(&Value::from("not a url")).is_err());
    }

    fn validate_even(value: &Value) -> Result<(), ValidationError> {
        match value.as_i64() {
            Some(i) if i % 2 == 0 => Ok(()),
            _ => Err(ValidationError::new("even")),
        }
    }

    #[test]
    fn test_predicate_and_custom() {
        let positive = Predicate::new("Must be positive.", |v| v.as_f64().is_some_and(|n| n > 0.0));
        assert!(positive.validate(&Value::from(1)).is_ok());
        assert_eq!(message(positive.validate(&Value::from(-1))), "Must be positive.");

        let even = Custom::new("even", validate_even);
        assert!(even.validate(&Value::from(2)).is_ok());
        assert_eq!(message(even.validate(&Value::from(3))), "Invalid value (even).");
    }
}
