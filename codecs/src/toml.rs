//! TOML codec backed by the `toml` crate.
//!
//! TOML has no null. Decoding never produces [`Value::Null`], and encoding a
//! tree that contains one fails with the path of the first null found.

use crate::{Codec, find_path};
use errors::CodecError;
use sc_core::{Mapping, Value};

const NAME: &str = "TOML";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TomlEncodeOptions {
    /// Multi-line arrays and the writer's other pretty-printing rules.
    pub pretty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TomlDecodeOptions {}

#[derive(Debug, Clone, Copy, Default)]
pub struct Toml;

impl Codec for Toml {
    const NAME: &'static str = NAME;

    type EncodeOptions = TomlEncodeOptions;
    type DecodeOptions = TomlDecodeOptions;

    fn encode(tree: &Value, options: &TomlEncodeOptions) -> Result<String, CodecError> {
        if tree.as_mapping().is_none() {
            return Err(CodecError::Shape {
                format: NAME,
                found: tree.type_name().to_string(),
            });
        }
        if let Some(path) = find_path(tree, &Value::is_null) {
            return Err(CodecError::Unrepresentable {
                format: NAME,
                path,
                reason: "TOML has no null value".to_string(),
            });
        }

        let written = if options.pretty {
            toml::to_string_pretty(tree)
        } else {
            toml::to_string(tree)
        };
        written.map_err(|e| CodecError::format(NAME, e))
    }

    fn decode(text: &str, _options: &TomlDecodeOptions) -> Result<Value, CodecError> {
        let table: toml::Table = toml::from_str(text).map_err(|e| CodecError::format(NAME, e))?;
        Ok(from_table(table))
    }
}

fn from_table(table: toml::Table) -> Value {
    Value::Mapping(
        table
            .into_iter()
            .map(|(key, value)| (key, from_toml(value)))
            .collect::<Mapping>(),
    )
}

fn from_toml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Integer(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => from_table(table),
    }
}
