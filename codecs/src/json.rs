//! JSON codec backed by `serde_json`.

use crate::{Codec, find_path};
use errors::CodecError;
use sc_core::Value;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

const NAME: &str = "JSON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonEncodeOptions {
    /// Escape every non-ASCII character as `\uXXXX`.
    pub ascii_escape: bool,
    /// Spaces per nesting level; `None` writes a single line.
    pub indent: Option<usize>,
    pub sort_keys: bool,
}

impl Default for JsonEncodeOptions {
    fn default() -> Self {
        Self {
            ascii_escape: false,
            indent: Some(4),
            sort_keys: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonDecodeOptions {}

#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Codec for Json {
    const NAME: &'static str = NAME;

    type EncodeOptions = JsonEncodeOptions;
    type DecodeOptions = JsonDecodeOptions;

    fn encode(tree: &Value, options: &JsonEncodeOptions) -> Result<String, CodecError> {
        if let Some(path) = find_path(tree, &|v| matches!(v, Value::Float(f) if !f.is_finite())) {
            return Err(CodecError::Unrepresentable {
                format: NAME,
                path,
                reason: "non-finite numbers are not valid JSON".to_string(),
            });
        }

        let sorted;
        let tree = if options.sort_keys {
            sorted = tree.sorted_keys();
            &sorted
        } else {
            tree
        };

        let text = match options.indent {
            None => serde_json::to_string(tree).map_err(|e| CodecError::format(NAME, e))?,
            Some(width) => {
                let indent = vec![b' '; width];
                let mut out = Vec::new();
                let mut serializer = serde_json::Serializer::with_formatter(
                    &mut out,
                    PrettyFormatter::with_indent(&indent),
                );
                tree.serialize(&mut serializer)
                    .map_err(|e| CodecError::format(NAME, e))?;
                String::from_utf8(out).map_err(|e| CodecError::format(NAME, e))?
            }
        };

        Ok(if options.ascii_escape {
            escape_non_ascii(&text)
        } else {
            text
        })
    }

    fn decode(text: &str, _options: &JsonDecodeOptions) -> Result<Value, CodecError> {
        serde_json::from_str(text).map_err(|e| CodecError::format(NAME, e))
    }
}

/// Non-ASCII characters only ever occur inside JSON strings, so escaping the
/// rendered text is equivalent to escaping each string.
fn escape_non_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut units = [0u16; 2];
    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}
