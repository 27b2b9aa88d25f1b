//! Record schemas and the builder that derives them.

use crate::dump;
use crate::field::{DefaultValue, Field, FieldType};
use crate::path::FieldPath;
use errors::SchemaError;
use std::collections::HashSet;

/// What load does with keys a record does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFields {
    /// Report each as a field error.
    #[default]
    Reject,
    /// Drop them silently.
    Exclude,
}

/// Validation and transform rules for one record type.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    name: String,
    fields: Vec<Field>,
    unknown: UnknownFields,
}

impl RecordSchema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn unknown_fields(&self) -> UnknownFields {
        self.unknown
    }
}

/// Collects field descriptors for a record, then checks them in
/// [`SchemaBuilder::build`].
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<Field>,
    unknown: UnknownFields,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            unknown: UnknownFields::default(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn unknown_fields(mut self, policy: UnknownFields) -> Self {
        self.unknown = policy;
        self
    }

    /// Checks every field and resolves nested records.
    ///
    /// Nested record schemas are derived (and cached) here, so a broken
    /// nested definition or a cycle fails the outer record too.
    pub fn build(self) -> Result<RecordSchema, SchemaError> {
        let record = self.name;
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(self.fields.len());

        for mut field in self.fields {
            if field.name().is_empty() {
                return Err(SchemaError::EmptyFieldName { record });
            }
            if !seen.insert(field.name().to_string()) {
                return Err(SchemaError::DuplicateField {
                    record,
                    field: field.name().to_string(),
                });
            }

            check_shape(field.ty(), &record, field.name())?;
            resolve_records(field.ty(), &record, field.name())?;

            for validator in field.validators() {
                if !validator.accepts(field.ty()) {
                    return Err(SchemaError::IncompatibleValidator {
                        record,
                        field: field.name().to_string(),
                        validator: validator.description(),
                        shape: field.ty().describe(),
                    });
                }
            }

            if field.required_flag() && field.default_value().is_some() {
                return Err(SchemaError::RequiredWithDefault {
                    record,
                    field: field.name().to_string(),
                });
            }

            let normalized = match field.default_value() {
                Some(DefaultValue::Value(value)) => {
                    Some(conform_default(value, &field, &record)?)
                }
                Some(DefaultValue::Factory(factory)) => {
                    conform_default(&factory(), &field, &record)?;
                    None
                }
                Some(DefaultValue::Nested) => {
                    if !matches!(field.ty().non_null(), FieldType::Record(_)) {
                        return Err(SchemaError::NestedDefaultOnNonRecord {
                            record,
                            field: field.name().to_string(),
                        });
                    }
                    None
                }
                None => None,
            };
            if let Some(value) = normalized {
                field.set_default(DefaultValue::Value(value));
            }

            fields.push(field);
        }

        Ok(RecordSchema {
            name: record,
            fields,
            unknown: self.unknown,
        })
    }
}

fn conform_default(
    value: &sc_core::Value,
    field: &Field,
    record: &str,
) -> Result<sc_core::Value, SchemaError> {
    dump::conform(value, field.ty(), &FieldPath::root().field(field.name())).map_err(|e| {
        SchemaError::InvalidDefault {
            record: record.to_string(),
            field: field.name().to_string(),
            reason: e.to_string(),
        }
    })
}

fn unsupported(record: &str, field: &str, reason: impl Into<String>) -> SchemaError {
    SchemaError::UnsupportedShape {
        record: record.to_string(),
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn check_shape(ty: &FieldType, record: &str, field: &str) -> Result<(), SchemaError> {
    match ty {
        FieldType::Optional(inner) => {
            if inner.is_optional() {
                return Err(unsupported(record, field, "nested optional"));
            }
            check_shape(inner, record, field)
        }
        FieldType::Union(members) => {
            if members.len() < 2 {
                return Err(unsupported(
                    record,
                    field,
                    "a union needs at least two members",
                ));
            }
            match members.iter().find(|m| !m.is_primitive()) {
                Some(member) => Err(unsupported(
                    record,
                    field,
                    format!("union member {} is not a primitive", member.describe()),
                )),
                None => Ok(()),
            }
        }
        FieldType::Seq(inner) | FieldType::Map(inner) => check_shape(inner, record, field),
        _ => Ok(()),
    }
}

fn resolve_records(ty: &FieldType, record: &str, field: &str) -> Result<(), SchemaError> {
    match ty {
        FieldType::Record(nested) => {
            nested
                .schema()
                .map(|_| ())
                .map_err(|source| SchemaError::Nested {
                    record: record.to_string(),
                    field: field.to_string(),
                    source: Box::new(source),
                })
        }
        FieldType::Optional(inner) | FieldType::Seq(inner) | FieldType::Map(inner) => {
            resolve_records(inner, record, field)
        }
        _ => Ok(()),
    }
}
