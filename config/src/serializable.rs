//! Method-style access to the facade on every record type.

use crate::codec::ConfigCodec;
use codecs::Codec;
use errors::ConfigError;
use sc_core::Value;
use schema::Record;
use std::path::Path;

/// Serialize, deserialize, save and load, available on any [`Record`].
///
/// ```rust,ignore
/// let text = profile.to_text::<Json>(&JsonEncodeOptions { indent: Some(2), ..Default::default() })?;
/// let again = UserProfile::from_text::<Json>(&text, &Default::default())?;
/// ```
pub trait Serializable: Record {
    fn to_text<C: Codec>(&self, options: &C::EncodeOptions) -> Result<String, ConfigError> {
        ConfigCodec::<Self, C>::new()?
            .with_encode_options(options.clone())
            .serialize(self)
    }

    fn from_text<C: Codec>(text: &str, options: &C::DecodeOptions) -> Result<Self, ConfigError> {
        ConfigCodec::<Self, C>::new()?
            .with_decode_options(options.clone())
            .deserialize(text)
    }

    fn save_as<C: Codec>(
        &self,
        path: impl AsRef<Path>,
        options: &C::EncodeOptions,
    ) -> Result<(), ConfigError> {
        ConfigCodec::<Self, C>::new()?
            .with_encode_options(options.clone())
            .save(path, self)
    }

    fn load_from<C: Codec>(
        path: impl AsRef<Path>,
        options: &C::DecodeOptions,
    ) -> Result<Self, ConfigError> {
        ConfigCodec::<Self, C>::new()?
            .with_decode_options(options.clone())
            .load(path)
    }

    fn as_object(&self) -> Result<Value, ConfigError> {
        Ok(schema::dump(self)?)
    }

    fn from_object(tree: &Value) -> Result<Self, ConfigError> {
        Ok(schema::load(tree)?)
    }
}

impl<T: Record> Serializable for T {}
