//! # simpleconf Format Codecs
//!
//! Text encoders and decoders between [`sc_core::Value`] trees and the
//! supported configuration formats.
//!
//! Codecs are stateless. Each one takes its knobs as an explicit options
//! struct and reports failures as [`errors::CodecError`].

pub mod json;
pub mod toml;
pub mod yaml;

pub use json::{Json, JsonDecodeOptions, JsonEncodeOptions};
pub use self::toml::{Toml, TomlDecodeOptions, TomlEncodeOptions};
pub use yaml::{Yaml, YamlDecodeOptions, YamlEncodeOptions};

use errors::CodecError;
use sc_core::Value;
use std::fmt;

/// A text format for value trees.
pub trait Codec: Send + Sync + 'static {
    /// Format name used in diagnostics, e.g. `JSON`.
    const NAME: &'static str;

    type EncodeOptions: Default + Clone + fmt::Debug + Send + Sync;
    type DecodeOptions: Default + Clone + fmt::Debug + Send + Sync;

    fn encode(tree: &Value, options: &Self::EncodeOptions) -> Result<String, CodecError>;

    fn decode(text: &str, options: &Self::DecodeOptions) -> Result<Value, CodecError>;
}

/// Path of the first value (depth first, document order) matching `pred`.
pub(crate) fn find_path(value: &Value, pred: &dyn Fn(&Value) -> bool) -> Option<String> {
    fn walk(value: &Value, path: &str, pred: &dyn Fn(&Value) -> bool) -> Option<String> {
        if pred(value) {
            return Some(path.to_string());
        }
        match value {
            Value::Sequence(items) => items
                .iter()
                .enumerate()
                .find_map(|(i, item)| walk(item, &format!("{path}[{i}]"), pred)),
            Value::Mapping(map) => map.iter().find_map(|(key, item)| {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                walk(item, &child, pred)
            }),
            _ => None,
        }
    }

    walk(value, "", pred).map(|path| {
        if path.is_empty() {
            errors::SCHEMA_PATH.to_string()
        } else {
            path
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_path() {
        let tree: Value = serde_json::from_str(r#"{"a": {"b": [1, null]}, "c": null}"#).unwrap();
        assert_eq!(find_path(&tree, &Value::is_null).as_deref(), Some("a.b[1]"));
        assert_eq!(find_path(&Value::Null, &Value::is_null).as_deref(), Some("_schema"));
        assert_eq!(find_path(&Value::from(1), &Value::is_null), None);
    }
}
