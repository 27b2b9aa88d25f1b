//! # Format Detection
//!
//! Picks a codec from a file extension.
//!
//! ## Supported Extensions
//! - `.json`: JSON
//! - `.toml`: TOML
//! - `.yaml`, `.yml`: YAML

use crate::codec::{JsonConfig, TomlConfig, YamlConfig};
use codecs::{Codec, Json, Toml, Yaml};
use errors::{CodecError, ConfigError};
use sc_core::Value;
use schema::Record;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Json, Format::Toml, Format::Yaml];

    /// Detects the format from the extension of `path`, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| ConfigError::UnknownFormat {
                path: path.to_path_buf(),
            })
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Json => Json::NAME,
            Format::Toml => Toml::NAME,
            Format::Yaml => Yaml::NAME,
        }
    }

    /// Decodes `text` with this format's default options.
    pub fn decode(self, text: &str) -> Result<Value, CodecError> {
        match self {
            Format::Json => Json::decode(text, &Default::default()),
            Format::Toml => Toml::decode(text, &Default::default()),
            Format::Yaml => Yaml::decode(text, &Default::default()),
        }
    }

    /// Encodes `tree` with this format's default options.
    pub fn encode(self, tree: &Value) -> Result<String, CodecError> {
        match self {
            Format::Json => Json::encode(tree, &Default::default()),
            Format::Toml => Toml::encode(tree, &Default::default()),
            Format::Yaml => Yaml::encode(tree, &Default::default()),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| {
            format!("Unsupported config format: {s} (expected json, toml, yaml or yml)")
        })
    }
}

/// Saves `instance` in the format implied by the extension of `path`.
pub fn save_auto<T: Record>(path: impl AsRef<Path>, instance: &T) -> Result<(), ConfigError> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Json => JsonConfig::<T>::new()?.save(path, instance),
        Format::Toml => TomlConfig::<T>::new()?.save(path, instance),
        Format::Yaml => YamlConfig::<T>::new()?.save(path, instance),
    }
}

/// Loads a `T` from `path`, choosing the format by extension.
pub fn load_auto<T: Record>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    match Format::from_path(path)? {
        Format::Json => JsonConfig::<T>::new()?.load(path),
        Format::Toml => TomlConfig::<T>::new()?.load(path),
        Format::Yaml => YamlConfig::<T>::new()?.load(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use testing::{CellRulesConfig, sample_cell_rules};

    #[test]
    fn test_from_path() {
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.TOML")).unwrap(), Format::Toml);
        assert_eq!(Format::from_path(Path::new("dir/a.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.yaml")).unwrap(), Format::Yaml);

        assert!(matches!(
            Format::from_path(Path::new("a.ini")),
            Err(ConfigError::UnknownFormat { .. }),
        ));
        assert!(matches!(
            Format::from_path(Path::new("Makefile")),
            Err(ConfigError::UnknownFormat { .. }),
        ));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("yaml".parse::<Format>().unwrap(), Format::Yaml);
        assert!("xml".parse::<Format>().is_err());
        assert_eq!(Format::Toml.to_string(), "TOML");
    }

    #[test]
    fn test_auto_round_trip_every_format() {
        let dir = TempDir::new().unwrap();
        let rules = sample_cell_rules();

        for name in ["rules.json", "rules.toml", "rules.yaml"] {
            let path = dir.path().join(name);
            save_auto(&path, &rules).unwrap();
            let loaded: CellRulesConfig = load_auto(&path).unwrap();
            assert_eq!(loaded, rules, "round trip through {name}");
        }
    }

    #[test]
    fn test_load_auto_detects_by_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.yml");
        fs::write(
            &path,
            "version: '2.0'\nrules:\n  a:\n    - fn: add\n      per_cell: false\n",
        )
        .unwrap();

        let loaded: CellRulesConfig = load_auto(&path).unwrap();
        assert_eq!(loaded.version, "2.0".into());
        assert_eq!(loaded.rules["a"][0].function, "add");
        assert!(!loaded.rules["a"][0].per_cell);
        assert!(loaded.globals.is_empty());
    }
}
