//! # Config Codec
//!
//! Binds one record type to one text format.
//!
//! `serialize` dumps the instance through the record schema and encodes the
//! tree; `deserialize` decodes text and loads the tree through the schema,
//! so every field problem in the document is reported together.

use crate::file_io::{self, Encoding};
use codecs::{Codec, Json, Toml, Yaml};
use errors::ConfigError;
use sc_core::Value;
use schema::{Record, RecordSchema};
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Record `T` stored as format `C`.
pub struct ConfigCodec<T, C: Codec> {
    schema: Arc<RecordSchema>,
    encode: C::EncodeOptions,
    decode: C::DecodeOptions,
    encoding: Encoding,
    _record: PhantomData<fn() -> T>
}

pub type JsonConfig<T> = ConfigCodec<T, Json>;
pub type TomlConfig<T> = ConfigCodec<T, Toml>;
pub type YamlConfig<T> = ConfigCodec<T, Yaml>;

impl<T: Record, C: Codec> ConfigCodec<T, C> {
    /// Creates a codec with default options.
    ///
    /// # M-CANONICAL-DOCS
    ///
    /// ## Purpose
    /// Derives (or fetches the cached) schema of `T`. A broken record
    /// definition surfaces here as `ConfigError::Schema`.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let codec = JsonConfig::<AppConfig>::new()?;
    /// let text = codec.serialize(&AppConfig::default())?;
    /// ```
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            schema: T::schema()?,
            encode: C::EncodeOptions::default(),
            decode: C::DecodeOptions::default(),
            encoding: Encoding::default(),
            _record: PhantomData,
        })
    }

    pub fn with_encode_options(mut self, options: C::EncodeOptions) -> Self {
        self.encode = options;
        self
    }

    pub fn with_decode_options(mut self, options: C::DecodeOptions) -> Self {
        self.decode = options;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn encode_options(&self) -> &C::EncodeOptions {
        &self.encode
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The instance as a value tree, fields in declaration order.
    pub fn as_object(&self, instance: &T) -> Result<Value, ConfigError> {
        Ok(schema::dump_with(instance, &self.schema)?)
    }

    /// Validates `tree` and builds an instance from it.
    pub fn from_object(&self, tree: &Value) -> Result<T, ConfigError> {
        Ok(schema::load_with(tree, &self.schema)?)
    }

    pub fn serialize(&self, instance: &T) -> Result<String, ConfigError> {
        let tree = self.as_object(instance)?;
        Ok(C::encode(&tree, &self.encode)?)
    }

    /// Decodes `text` and loads it. Malformed text fails before any field is
    /// checked.
    pub fn deserialize(&self, text: &str) -> Result<T, ConfigError> {
        let tree = C::decode(text, &self.decode)?;
        self.from_object(&tree)
    }

    /// Writes the instance to `path`.
    ///
    /// The text is fully encoded before the file is opened, so a dump or
    /// encode failure leaves an existing file untouched.
    pub fn save(&self, path: impl AsRef<Path>, instance: &T) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = self.serialize(instance)?;
        debug!(
            record = self.schema.name(),
            format = C::NAME,
            path = %path.display(),
            "Saving config",
        );
        file_io::write_text(path, &text, self.encoding)
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<T, ConfigError> {
        let path = path.as_ref();
        debug!(
            record = self.schema.name(),
            format = C::NAME,
            path = %path.display(),
            "Loading config",
        );
        let text = file_io::read_text(path, self.encoding)?;
        self.deserialize(&text)
    }
}

impl<T, C: Codec> Clone for ConfigCodec<T, C> {
    fn clone(&self) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            encode: self.encode.clone(),
            decode: self.decode.clone(),
            encoding: self.encoding,
            _record: PhantomData,
        }
    }
}

impl<T, C: Codec> fmt::Debug for ConfigCodec<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigCodec")
            .field("record", &self.schema.name())
            .field("format", &C::NAME)
            .field("encode", &self.encode)
            .field("decode", &self.decode)
            .field("encoding", &self.encoding)
            .finish()
    }
}
