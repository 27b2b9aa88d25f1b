//! Typed instance to value tree.
//!
//! The instance is first serialized with serde, then walked against the
//! schema: fields come out in declaration order, nested records recurse, and
//! the first value that does not fit its declared shape fails the dump.
//! Validators are not run here.

use crate::field::FieldType;
use crate::path::FieldPath;
use crate::{Record, RecordSchema};
use errors::DumpError;
use sc_core::{Mapping, Value};
use serde::Serialize;

/// Dumps `instance` using its cached schema.
pub fn dump<T: Record>(instance: &T) -> Result<Value, DumpError> {
    let schema = T::schema()?;
    dump_with(instance, &schema)
}

/// Dumps `instance` against an explicit schema.
pub fn dump_with<T: Serialize + ?Sized>(
    instance: &T,
    schema: &RecordSchema,
) -> Result<Value, DumpError> {
    let raw = Value::from_serialize(instance).map_err(|e| DumpError::Serialize {
        record: schema.name().to_string(),
        message: e.to_string(),
    })?;
    if raw.as_mapping().is_none() {
        return Err(DumpError::NotAMapping {
            record: schema.name().to_string(),
            found: raw.type_name().to_string(),
        });
    }
    conform_record(&raw, schema, &FieldPath::root())
}

fn mismatch(path: &FieldPath, expected: String, found: &str) -> DumpError {
    DumpError::TypeMismatch {
        path: path.reported(),
        expected,
        found: found.to_string(),
    }
}

fn conform_record(
    value: &Value,
    schema: &RecordSchema,
    path: &FieldPath,
) -> Result<Value, DumpError> {
    let Some(input) = value.as_mapping() else {
        return Err(mismatch(path, "mapping".to_string(), value.type_name()));
    };

    for key in input.keys() {
        if schema.field(key).is_none() {
            return Err(DumpError::Undeclared {
                path: path.field(key).reported(),
            });
        }
    }

    let mut out = Mapping::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let field_path = path.field(field.name());
        let dumped = match input.get(field.name()) {
            Some(raw) => conform(raw, field.ty(), &field_path)?,
            None if field.ty().is_optional() => Value::Null,
            None => return Err(mismatch(&field_path, field.ty().describe(), "nothing")),
        };
        out.insert(field.name().to_string(), dumped);
    }
    Ok(Value::Mapping(out))
}

/// Checks `value` against `ty`, returning it with nested records re-ordered.
pub(crate) fn conform(value: &Value, ty: &FieldType, path: &FieldPath) -> Result<Value, DumpError> {
    match ty {
        FieldType::Any => Ok(value.clone()),
        FieldType::Optional(_) if value.is_null() => Ok(Value::Null),
        FieldType::Optional(inner) => conform(value, inner, path),
        FieldType::Str | FieldType::Int | FieldType::Float | FieldType::Bool | FieldType::Union(_) => {
            if ty.matches_scalar(value) {
                Ok(value.clone())
            } else {
                Err(mismatch(path, ty.describe(), value.type_name()))
            }
        }
        FieldType::Seq(inner) => {
            let Some(items) = value.as_sequence() else {
                return Err(mismatch(path, ty.describe(), value.type_name()));
            };
            items
                .iter()
                .enumerate()
                .map(|(i, item)| conform(item, inner, &path.index(i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence)
        }
        FieldType::Map(inner) => {
            let Some(map) = value.as_mapping() else {
                return Err(mismatch(path, ty.describe(), value.type_name()));
            };
            map.iter()
                .map(|(key, item)| Ok((key.clone(), conform(item, inner, &path.field(key))?)))
                .collect::<Result<Mapping, DumpError>>()
                .map(Value::Mapping)
        }
        FieldType::Record(nested) => conform_record(value, &*nested.schema()?, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, SchemaBuilder};
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Runtime {
        debug: bool,
        #[serde(rename = "enableLogging")]
        enable_logging: bool,
    }

    impl Record for Runtime {
        fn describe(schema: SchemaBuilder) -> SchemaBuilder {
            schema
                .field(Field::new("debug", FieldType::Bool).default(true))
                .field(Field::new("enableLogging", FieldType::Bool).default(false))
        }
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct App {
        runtime: Runtime,
        ratio: f64,
        labels: BTreeMap<String, String>,
        parent: Option<String>,
    }

    impl Record for App {
        fn describe(schema: SchemaBuilder) -> SchemaBuilder {
            schema
                .field(Field::new("ratio", FieldType::Float).default(0.0))
                .field(Field::new("parent", FieldType::optional(FieldType::Str)))
                .field(Field::new("labels", FieldType::map(FieldType::Str)).default_with(Value::empty_mapping))
                .field(Field::new("runtime", FieldType::record::<Runtime>()).default_nested())
        }
    }

    #[test]
    fn test_dump_follows_declaration_order() {
        let app = App::default();
        let tree = dump(&app).unwrap();
        let keys: Vec<_> = tree.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["ratio", "parent", "labels", "runtime"]);
        assert_eq!(tree.get("parent"), Some(&Value::Null));
        let runtime = tree.get("runtime").unwrap().as_mapping().unwrap();
        assert_eq!(runtime.keys().collect::<Vec<_>>(), vec!["debug", "enableLogging"]);
    }

    #[derive(Serialize)]
    struct Drifted {
        debug: String,
        #[serde(rename = "enableLogging")]
        enable_logging: bool,
    }

    #[test]
    fn test_dump_reports_type_mismatch_path() {
        let schema = Runtime::schema().unwrap();
        let drifted = Drifted {
            debug: "yes".to_string(),
            enable_logging: false,
        };
        let err = dump_with(&drifted, &schema).unwrap_err();
        assert_eq!(
            err,
            DumpError::TypeMismatch {
                path: "debug".to_string(),
                expected: "boolean".to_string(),
                found: "string".to_string(),
            },
        );
    }

    #[derive(Serialize)]
    struct Extra {
        debug: bool,
        #[serde(rename = "enableLogging")]
        enable_logging: bool,
        verbose: bool,
    }

    #[test]
    fn test_dump_rejects_undeclared_field() {
        let schema = Runtime::schema().unwrap();
        let extra = Extra {
            debug: true,
            enable_logging: true,
            verbose: true,
        };
        let err = dump_with(&extra, &schema).unwrap_err();
        assert_eq!(
            err,
            DumpError::Undeclared {
                path: "verbose".to_string(),
            },
        );
    }

    #[test]
    fn test_dump_rejects_non_mapping() {
        let schema = Runtime::schema().unwrap();
        let err = dump_with(&vec![1, 2], &schema).unwrap_err();
        assert!(matches!(err, DumpError::NotAMapping { .. }));
    }

    #[test]
    fn test_conform_sequence_element_path() {
        let ty = FieldType::seq(FieldType::Str);
        let value = Value::from(vec![Value::from("a"), Value::from(1)]);
        let err = conform(&value, &ty, &FieldPath::root().field("bannedIps")).unwrap_err();
        assert!(matches!(err, DumpError::TypeMismatch { ref path, .. } if path == "bannedIps[1]"));
    }
}
