//! Value tree to typed instance.
//!
//! Loading walks the schema rather than the input, so every declared field
//! is visited. Failures do not stop the walk: each one is recorded under its
//! field path and the whole set is returned as one [`ValidationErrors`].

use crate::field::{DefaultValue, Field, FieldType};
use crate::path::FieldPath;
use crate::validators::message_of;
use crate::{Record, RecordSchema, UnknownFields};
use errors::{FieldError, LoadError, SchemaError, ValidationErrors};
use sc_core::{Mapping, Value};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Validates `tree` and builds a `T` from it using its cached schema.
pub fn load<T: Record>(tree: &Value) -> Result<T, LoadError> {
    let schema = T::schema()?;
    load_with(tree, &schema)
}

/// Validates `tree` against an explicit schema and builds a `T` from it.
pub fn load_with<T: DeserializeOwned>(tree: &Value, schema: &RecordSchema) -> Result<T, LoadError> {
    let normalized = load_tree(tree, schema)?;
    normalized.into_typed().map_err(|e| {
        if e.is_value_error() {
            // The tree fits the schema but not the Rust type, e.g. 70000 for
            // a u16 field.
            let mut errors = ValidationErrors::new();
            let path = e.path().unwrap_or_else(|| FieldPath::root().reported());
            errors.add(path, FieldError::constraint(sentence(e.message())));
            debug!(record = schema.name(), error = %e, "Record rejected a validated value");
            LoadError::Validation(errors)
        } else {
            LoadError::Schema(SchemaError::RecordMismatch {
                record: schema.name().to_string(),
                reason: e.to_string(),
            })
        }
    })
}

/// `invalid value: x` becomes `Invalid value: x.`
fn sentence(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

/// Validates `tree` and returns it normalized: declared fields only, in
/// declaration order, with defaults filled in.
pub fn load_tree(tree: &Value, schema: &RecordSchema) -> Result<Value, LoadError> {
    let mut loader = Loader::default();
    let normalized = loader.record(tree, schema, &FieldPath::root())?;

    if loader.failures > 0 {
        debug!(
            record = schema.name(),
            fields = loader.errors.len(),
            "Record failed validation",
        );
    }
    loader.errors.into_result()?;
    Ok(normalized.unwrap_or_default())
}

#[derive(Default)]
struct Loader {
    errors: ValidationErrors,
    failures: usize,
}

impl Loader {
    fn fail(&mut self, path: &FieldPath, error: FieldError) {
        self.failures += 1;
        self.errors.add(path.reported(), error);
    }

    fn mismatch(&mut self, path: &FieldPath, ty: &FieldType, found: &Value) {
        self.fail(path, FieldError::type_mismatch(ty.describe(), found.type_name()));
    }

    /// `None` when anything at or below `path` failed.
    fn record(
        &mut self,
        value: &Value,
        schema: &RecordSchema,
        path: &FieldPath,
    ) -> Result<Option<Value>, SchemaError> {
        let Some(input) = value.as_mapping() else {
            self.fail(path, FieldError::type_mismatch("mapping", value.type_name()));
            return Ok(None);
        };

        let before = self.failures;
        let mut out = Mapping::with_capacity(schema.fields().len());
        for field in schema.fields() {
            let field_path = path.field(field.name());
            let loaded = match input.get(field.name()) {
                Some(raw) => self.present(raw, field, &field_path)?,
                None => self.missing(field, &field_path)?,
            };
            if let Some(loaded) = loaded {
                out.insert(field.name().to_string(), loaded);
            }
        }

        if schema.unknown_fields() == UnknownFields::Reject {
            for key in input.keys().filter(|key| schema.field(key).is_none()) {
                self.fail(&path.field(key), FieldError::Unknown);
            }
        }

        Ok((self.failures == before).then_some(Value::Mapping(out)))
    }

    fn present(
        &mut self,
        raw: &Value,
        field: &Field,
        path: &FieldPath,
    ) -> Result<Option<Value>, SchemaError> {
        let Some(loaded) = self.value(raw, field.ty(), path)? else {
            return Ok(None);
        };
        if loaded.is_null() {
            return Ok(Some(loaded));
        }

        let mut valid = true;
        for validator in field.validators() {
            if let Err(error) = validator.validate(&loaded) {
                self.fail(path, FieldError::constraint(message_of(&error)));
                valid = false;
            }
        }
        Ok(valid.then_some(loaded))
    }

    fn missing(&mut self, field: &Field, path: &FieldPath) -> Result<Option<Value>, SchemaError> {
        match field.default_value() {
            Some(DefaultValue::Value(value)) => Ok(Some(value.clone())),
            Some(DefaultValue::Factory(factory)) => Ok(Some(factory())),
            Some(DefaultValue::Nested) => match field.ty().non_null() {
                FieldType::Record(nested) => {
                    self.record(&Value::empty_mapping(), &*nested.schema()?, path)
                }
                _ => Err(SchemaError::NestedDefaultOnNonRecord {
                    record: path.to_string(),
                    field: field.name().to_string(),
                }),
            },
            None if field.is_required() => {
                self.fail(path, FieldError::Missing);
                Ok(None)
            }
            None => Ok(Some(Value::Null)),
        }
    }

    fn value(
        &mut self,
        value: &Value,
        ty: &FieldType,
        path: &FieldPath,
    ) -> Result<Option<Value>, SchemaError> {
        match ty {
            FieldType::Any => Ok(Some(value.clone())),
            FieldType::Optional(_) if value.is_null() => Ok(Some(Value::Null)),
            FieldType::Optional(inner) => self.value(value, inner, path),
            FieldType::Str
            | FieldType::Int
            | FieldType::Float
            | FieldType::Bool
            | FieldType::Union(_) => {
                if ty.matches_scalar(value) {
                    Ok(Some(value.clone()))
                } else {
                    self.mismatch(path, ty, value);
                    Ok(None)
                }
            }
            FieldType::Seq(inner) => {
                let Some(items) = value.as_sequence() else {
                    self.mismatch(path, ty, value);
                    return Ok(None);
                };
                let mut out = Vec::with_capacity(items.len());
                let mut complete = true;
                for (i, item) in items.iter().enumerate() {
                    match self.value(item, inner, &path.index(i))? {
                        Some(loaded) => out.push(loaded),
                        None => complete = false,
                    }
                }
                Ok(complete.then_some(Value::Sequence(out)))
            }
            FieldType::Map(inner) => {
                let Some(map) = value.as_mapping() else {
                    self.mismatch(path, ty, value);
                    return Ok(None);
                };
                let mut out = Mapping::with_capacity(map.len());
                let mut complete = true;
                for (key, item) in map {
                    match self.value(item, inner, &path.field(key))? {
                        Some(loaded) => {
                            out.insert(key.clone(), loaded);
                        }
                        None => complete = false,
                    }
                }
                Ok(complete.then_some(Value::Mapping(out)))
            }
            FieldType::Record(nested) => self.record(value, &*nested.schema()?, path),
        }
    }
}
