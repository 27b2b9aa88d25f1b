pub mod check;
pub mod convert;

use clap::{Parser, Subcommand};
use config::{ConfigError, Format};
use std::path::Path;

use crate::ux_error::{self, UxError};

#[derive(Parser)]
#[command(
    name = "simpleconf",
    author,
    version,
    about = "simpleconf - declarative configuration files in JSON, TOML and YAML",
    long_about = "Inspect and convert configuration documents.\n\nThe format of every file is \
                  detected from its extension (.json, .toml, .yaml, .yml) unless given \
                  explicitly."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Parse a configuration file and report its top-level keys")]
    Check(check::CheckArgs),

    #[command(about = "Convert a configuration file from one format to another")]
    Convert(convert::ConvertArgs),
}

/// Resolves the format of `path`, preferring an explicit choice.
pub(crate) fn resolve_format(explicit: Option<Format>, path: &Path) -> Result<Format, UxError> {
    match explicit {
        Some(format) => Ok(format),
        None => Format::from_path(path).map_err(|_| ux_error::unknown_format(path)),
    }
}

/// Maps a facade error onto the user-facing error for `path`.
pub(crate) fn explain(path: &Path, err: ConfigError) -> UxError {
    match err {
        ConfigError::Io { source, .. } => ux_error::unreadable(path, &source),
        ConfigError::UnknownFormat { .. } => ux_error::unknown_format(path),
        ConfigError::Codec(codec) => ux_error::codec_failure(path, &codec),
        other => UxError::new(other.to_string()),
    }
}
