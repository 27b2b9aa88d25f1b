//! Field descriptors.
//!
//! A [`Field`] names one key of a record, declares its [`FieldType`], and
//! optionally carries a default, a required flag and validators.

use crate::validators::Validator;
use crate::{Record, RecordSchema, registry};
use errors::SchemaError;
use sc_core::Value;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Reference to a nested record type, resolved through the registry.
#[derive(Clone, Copy)]
pub struct RecordRef {
    type_id: TypeId,
    name: &'static str,
    derive: fn() -> Result<Arc<RecordSchema>, SchemaError>,
}

impl RecordRef {
    pub fn of<T: Record>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: registry::short_type_name::<T>(),
            derive: registry::derive::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The nested record's schema; cached after the first call.
    pub fn schema(&self) -> Result<Arc<RecordSchema>, SchemaError> {
        (self.derive)()
    }
}

impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record({})", self.name)
    }
}

impl PartialEq for RecordRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

/// Declared type shape of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Str,
    Int,
    /// Accepts integers as well as floats.
    Float,
    Bool,
    /// Any value tree, unchecked.
    Any,
    /// The inner type or null.
    Optional(Box<FieldType>),
    /// One of several primitive types, matched without coercion.
    Union(Vec<FieldType>),
    /// Homogeneous sequence.
    Seq(Box<FieldType>),
    /// String-keyed mapping with homogeneous values.
    Map(Box<FieldType>),
    Record(RecordRef),
}

impl FieldType {
    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional(Box::new(inner))
    }

    pub fn seq(inner: FieldType) -> Self {
        FieldType::Seq(Box::new(inner))
    }

    pub fn map(inner: FieldType) -> Self {
        FieldType::Map(Box::new(inner))
    }

    pub fn union(members: impl IntoIterator<Item = FieldType>) -> Self {
        FieldType::Union(members.into_iter().collect())
    }

    pub fn record<T: Record>() -> Self {
        FieldType::Record(RecordRef::of::<T>())
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            FieldType::Str | FieldType::Int | FieldType::Float | FieldType::Bool,
        )
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, FieldType::Optional(_))
    }

    /// The type with one level of `Optional` removed.
    pub fn non_null(&self) -> &FieldType {
        match self {
            FieldType::Optional(inner) => inner,
            other => other,
        }
    }

    /// Whether a scalar value matches this primitive type.
    pub(crate) fn matches_scalar(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldType::Str, Value::String(_))
            | (FieldType::Int, Value::Integer(_))
            | (FieldType::Float, Value::Integer(_) | Value::Float(_))
            | (FieldType::Bool, Value::Bool(_)) => true,
            (FieldType::Union(members), _) => members.iter().any(|m| m.matches_scalar(value)),
            _ => false,
        }
    }

    /// Name used in diagnostics, e.g. `Not a valid {describe}.`
    pub fn describe(&self) -> String {
        match self {
            FieldType::Str => "string".to_string(),
            FieldType::Int => "integer".to_string(),
            FieldType::Float => "number".to_string(),
            FieldType::Bool => "boolean".to_string(),
            FieldType::Any => "value".to_string(),
            FieldType::Optional(inner) => inner.describe(),
            FieldType::Union(members) => members
                .iter()
                .map(FieldType::describe)
                .collect::<Vec<_>>()
                .join(" | "),
            FieldType::Seq(_) => "list".to_string(),
            FieldType::Map(_) | FieldType::Record(_) => "mapping".to_string(),
        }
    }
}

/// What a missing key falls back to.
#[derive(Clone)]
pub enum DefaultValue {
    Value(Value),
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
    /// Load the nested record from an empty mapping, applying its own
    /// defaults.
    Nested,
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            DefaultValue::Factory(_) => f.write_str("Factory"),
            DefaultValue::Nested => f.write_str("Nested"),
        }
    }
}

/// Descriptor of one record field.
#[derive(Clone)]
pub struct Field {
    name: String,
    ty: FieldType,
    default: Option<DefaultValue>,
    required: bool,
    validators: Vec<Arc<dyn Validator>>,
    description: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            required: false,
            validators: Vec::new(),
            description: None,
        }
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Value(value.into()));
        self
    }

    pub fn default_with<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Factory(Arc::new(factory)));
        self
    }

    /// Missing keys load the nested record from `{}`.
    pub fn default_nested(mut self) -> Self {
        self.default = Some(DefaultValue::Nested);
        self
    }

    /// Requires the key to be present, even for optional types.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validate(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn doc(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &FieldType {
        &self.ty
    }

    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required || (self.default.is_none() && !self.ty.is_optional())
    }

    pub(crate) fn required_flag(&self) -> bool {
        self.required
    }

    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn set_default(&mut self, default: DefaultValue) {
        self.default = Some(default);
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("default", &self.default)
            .field("required", &self.required)
            .field(
                "validators",
                &self
                    .validators
                    .iter()
                    .map(|v| v.description())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
