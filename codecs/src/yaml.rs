//! YAML codec backed by `serde_yaml`.
//!
//! A configuration document must be a mapping. Bare scalars, sequences and
//! empty documents are rejected as shape errors rather than handed on.

use crate::Codec;
use errors::CodecError;
use sc_core::{Mapping, Value};

const NAME: &str = "YAML";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlEncodeOptions {
    pub sort_keys: bool,
}

impl Default for YamlEncodeOptions {
    fn default() -> Self {
        Self { sort_keys: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YamlDecodeOptions {}

#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

impl Codec for Yaml {
    const NAME: &'static str = NAME;

    type EncodeOptions = YamlEncodeOptions;
    type DecodeOptions = YamlDecodeOptions;

    fn encode(tree: &Value, options: &YamlEncodeOptions) -> Result<String, CodecError> {
        let written = if options.sort_keys {
            serde_yaml::to_string(&tree.sorted_keys())
        } else {
            serde_yaml::to_string(tree)
        };
        written.map_err(|e| CodecError::format(NAME, e))
    }

    fn decode(text: &str, _options: &YamlDecodeOptions) -> Result<Value, CodecError> {
        if text.trim().is_empty() {
            return Err(shape("empty document"));
        }
        let document: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| CodecError::format(NAME, e))?;

        match untag(document) {
            serde_yaml::Value::Mapping(map) => from_mapping(map).map(Value::Mapping),
            other => Err(shape(yaml_type_name(&other))),
        }
    }
}

fn shape(found: &str) -> CodecError {
    CodecError::Shape {
        format: NAME,
        found: found.to_string(),
    }
}

fn untag(value: serde_yaml::Value) -> serde_yaml::Value {
    match value {
        serde_yaml::Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn yaml_type_name(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(n) if n.is_f64() => "float",
        serde_yaml::Value::Number(_) => "integer",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(tagged) => yaml_type_name(&tagged.value),
    }
}

fn from_mapping(map: serde_yaml::Mapping) -> Result<Mapping, CodecError> {
    let mut out = Mapping::with_capacity(map.len());
    for (key, value) in map {
        let key = match untag(key) {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            serde_yaml::Value::Null => "null".to_string(),
            other => return Err(shape(&format!("{} key", yaml_type_name(&other)))),
        };
        out.insert(key, from_yaml(value)?);
    }
    Ok(out)
}

fn from_yaml(value: serde_yaml::Value) -> Result<Value, CodecError> {
    Ok(match untag(value) {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(u) = n.as_u64() {
                Value::Float(u as f64)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(from_yaml)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        serde_yaml::Value::Mapping(map) => Value::Mapping(from_mapping(map)?),
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Result<Value, CodecError> {
        Yaml::decode(text, &YamlDecodeOptions::default())
    }

    #[test]
    fn test_decode_mapping() {
        let value = decode(
            r#"
server:
  httpPort: 8080
  bannedIps:
    - 10.0.0.1
runtime:
  debug: false
  ratio: 1.5
parent: ~
"#,
        )
        .unwrap();
        let server = value.get("server").unwrap();
        assert_eq!(server.get("httpPort"), Some(&Value::Integer(8080)));
        assert_eq!(
            server.get("bannedIps"),
            Some(&Value::from(vec!["10.0.0.1"])),
        );
        assert_eq!(value.get("runtime").unwrap().get("ratio"), Some(&Value::Float(1.5)));
        assert_eq!(value.get("parent"), Some(&Value::Null));
    }

    #[test]
    fn test_non_mapping_documents_are_shape_errors() {
        for text in ["just a string", "42", "- a\n- b\n", "", "~"] {
            let err = decode(text).unwrap_err();
            assert!(err.is_shape(), "{text:?} gave {err}");
        }
        assert_eq!(
            decode("").unwrap_err(),
            CodecError::Shape {
                format: "YAML",
                found: "empty document".to_string(),
            },
        );
    }

    #[test]
    fn test_scalar_keys_are_stringified() {
        let value = decode("1: one\ntrue: yes\n").unwrap();
        assert_eq!(value.get("1"), Some(&Value::from("one")));
        assert_eq!(value.get("true"), Some(&Value::from("yes")));

        let err = decode("? [a, b]\n: c\n").unwrap_err();
        assert!(err.is_shape());
    }

    #[test]
    fn test_tagged_values_decode_as_inner() {
        let value = decode("host: !env localhost\n").unwrap();
        assert_eq!(value.get("host"), Some(&Value::from("localhost")));
    }

    #[test]
    fn test_malformed() {
        let err = decode("invalid: [unmatched\n").unwrap_err();
        assert!(matches!(err, CodecError::Format { format: "YAML", .. }));
    }

    #[test]
    fn test_encode_sorts_keys_by_default() {
        let value = decode("b: 1\na: 2\n").unwrap();
        assert_eq!(Yaml::encode(&value, &YamlEncodeOptions::default()).unwrap(), "a: 2\nb: 1\n");
        assert_eq!(
            Yaml::encode(&value, &YamlEncodeOptions { sort_keys: false }).unwrap(),
            "b: 1\na: 2\n",
        );
    }

    #[test]
    fn test_encode_round_trip() {
        let value = decode("name: demo\nparent: null\nitems:\n- 1\n- two\n").unwrap();
        let encoded = Yaml::encode(&value, &YamlEncodeOptions { sort_keys: false }).unwrap();
        assert_eq!(decode(&encoded).unwrap(), value);
    }
}
