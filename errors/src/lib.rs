//! # simpleconf Errors
//!
//! Error taxonomy for the configuration object layer.
//!
//! - Uses `thiserror` for structured error definitions
//! - One enum per concern: codecs, schema derivation, per-field load
//!   failures, dumping, and the facade that ties them together
//! - Per-field failures are never raised alone; they are collected into
//!   [`ValidationErrors`] keyed by dotted field path

use indexmap::IndexMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Path under which errors that concern the whole record are reported.
pub const SCHEMA_PATH: &str = "_schema";

/// Format codec errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("Malformed {format} document: {message}")]
    Format {
        format: &'static str,
        message: String,
    },

    #[error("{format} document must be a mapping at the top level, found {found}")]
    Shape {
        format: &'static str,
        found: String,
    },

    #[error("{format} cannot represent the value at {path}: {reason}")]
    Unrepresentable {
        format: &'static str,
        path: String,
        reason: String,
    },
}

impl CodecError {
    pub fn format(format: &'static str, message: impl fmt::Display) -> Self {
        Self::Format {
            format,
            message: message.to_string(),
        }
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape { .. })
    }
}

/// Schema derivation errors.
///
/// These indicate a bug in a record definition. They are raised the first
/// time a record type is used and are not meant to be retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Record {record} declares a field with an empty name")]
    EmptyFieldName { record: String },

    #[error("Record {record} declares field {field} more than once")]
    DuplicateField { record: String, field: String },

    #[error("Field {record}.{field} has an unsupported type: {reason}")]
    UnsupportedShape {
        record: String,
        field: String,
        reason: String,
    },

    #[error("Field {record}.{field} cannot use validator {validator} on a {shape} value")]
    IncompatibleValidator {
        record: String,
        field: String,
        validator: String,
        shape: String,
    },

    #[error("Default for {record}.{field} does not match its declared type: {reason}")]
    InvalidDefault {
        record: String,
        field: String,
        reason: String,
    },

    #[error("Field {record}.{field} is marked required but also has a default")]
    RequiredWithDefault { record: String, field: String },

    #[error("Field {record}.{field} uses a nested default but is not a record")]
    NestedDefaultOnNonRecord { record: String, field: String },

    #[error("Record types form a cycle: {chain}")]
    Cycle { chain: String },

    #[error("Field {record}.{field} refers to a record that failed to derive: {source}")]
    Nested {
        record: String,
        field: String,
        #[source]
        source: Box<SchemaError>,
    },

    #[error("Record {record} does not match its declared schema: {reason}")]
    RecordMismatch { record: String, reason: String },
}

impl SchemaError {
    /// The innermost error behind any `Nested` wrappers.
    pub fn root_cause(&self) -> &SchemaError {
        match self {
            Self::Nested { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// A single per-field load failure.
///
/// Always reported under a field path inside [`ValidationErrors`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("Missing data for required field.")]
    Missing,

    #[error("Not a valid {expected}.")]
    TypeMismatch { expected: String, found: String },

    #[error("{message}")]
    Constraint { message: String },

    #[error("Unknown field.")]
    Unknown,
}

impl FieldError {
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint { .. })
    }
}

/// Aggregate of every field error found during one load.
///
/// Paths keep the order in which the loader first reported them, which is
/// field declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: IndexMap<String, Vec<FieldError>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, error: FieldError) {
        self.errors.entry(path.into()).or_default().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of distinct field paths with at least one error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn errors_for(&self, path: &str) -> &[FieldError] {
        self.errors.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldError])> {
        self.errors
            .iter()
            .map(|(path, errors)| (path.as_str(), errors.as_slice()))
    }

    /// Field path to rendered messages, for user-facing diagnostics.
    pub fn messages(&self) -> IndexMap<String, Vec<String>> {
        self.errors
            .iter()
            .map(|(path, errors)| {
                (
                    path.clone(),
                    errors.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }

    /// `Ok(())` when nothing was collected, otherwise the aggregate.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed for {} field(s)", self.errors.len())?;
        for (path, errors) in &self.errors {
            write!(f, "; {path}:")?;
            for error in errors {
                write!(f, " {error}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors raised while turning a typed instance into a value tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DumpError {
    #[error("Cannot dump {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    #[error("Cannot dump {path}: the record schema does not declare this field")]
    Undeclared { path: String },

    #[error("Cannot dump {record}: instance does not serialize to a mapping (found {found})")]
    NotAMapping { record: String, found: String },

    #[error("Cannot dump {record}: {message}")]
    Serialize { record: String, message: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Errors raised while turning a value tree into a typed instance.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl LoadError {
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Schema(_) => None,
        }
    }
}

/// Facade errors, covering every stage of serialize/deserialize/save/load.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Dump(#[from] DumpError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot determine config format for {path}")]
    UnknownFormat { path: PathBuf },
}

impl From<LoadError> for ConfigError {
    fn from(error: LoadError) -> Self {
        match error {
            LoadError::Validation(errors) => Self::Validation(errors),
            LoadError::Schema(error) => Self::Schema(error),
        }
    }
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The aggregated field errors, when this is a validation failure.
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Codec(CodecError::Shape { .. }))
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Codec(CodecError::Format { .. }))
    }
}
