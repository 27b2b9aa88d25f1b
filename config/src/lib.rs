//! # Config Facade
//!
//! Typed configuration records to and from JSON, TOML and YAML text and
//! files.
//!
//! This crate provides:
//! - [`ConfigCodec`], binding a record type to a format and its options
//! - The [`Serializable`] extension methods on every record type
//! - Format detection by file extension ([`save_auto`], [`load_auto`])
//! - Scoped whole-file reads and writes with optional byte-order marks
//!
//! # Best Practices
//!
//! - Validation comes from the record schema, not from the format
//! - Every field problem in a document is reported in one error
//! - Saving never truncates a file when encoding fails

pub mod codec;
pub mod file_io;
pub mod format;
pub mod serializable;

pub use codec::{ConfigCodec, JsonConfig, TomlConfig, YamlConfig};
pub use codecs::{
    Codec, Json, JsonDecodeOptions, JsonEncodeOptions, Toml, TomlDecodeOptions, TomlEncodeOptions,
    Yaml, YamlDecodeOptions, YamlEncodeOptions,
};
pub use errors::{ConfigError, FieldError, ValidationErrors};
pub use file_io::{Encoding, read_text, write_text};
pub use format::{Format, load_auto, save_auto};
pub use serializable::Serializable;
