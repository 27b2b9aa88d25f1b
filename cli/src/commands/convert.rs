//! Convert command - format conversion
//!
//! Decodes a document with one codec and encodes it with another. The value
//! tree passes through unchanged, so key order and types survive whenever
//! the target format can carry them. The output file is only written once
//! encoding has succeeded.

use anyhow::Result;
use clap::Args;
use codecs::{Codec, Json, JsonEncodeOptions, Toml, TomlEncodeOptions, Yaml, YamlEncodeOptions};
use config::{ConfigError, Encoding, Format, read_text, write_text};
use errors::CodecError;
use sc_core::Value;
use std::path::PathBuf;
use tracing::debug;

use super::{explain, resolve_format};
use crate::output;

#[derive(Args)]
pub struct ConvertArgs {
    /// Document to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Document to write
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Format of the input (defaults to its extension)
    #[arg(long)]
    pub from: Option<Format>,

    /// Format of the output (defaults to its extension)
    #[arg(long)]
    pub to: Option<Format>,

    /// JSON indentation width; 0 puts every entry on its own line without indent
    #[arg(long, default_value_t = 4, conflicts_with = "compact")]
    pub indent: usize,

    /// Write JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Escape non-ASCII characters in JSON output
    #[arg(long)]
    pub ascii: bool,

    /// Sort mapping keys (YAML output is always sorted unless --keep-order is given)
    #[arg(long, conflicts_with = "keep_order")]
    pub sort_keys: bool,

    /// Keep document key order in YAML output
    #[arg(long)]
    pub keep_order: bool,

    /// Use TOML's multi-line layout for arrays
    #[arg(long)]
    pub pretty: bool,

    /// Encoding of the input file
    #[arg(long, default_value = "utf-8")]
    pub input_encoding: Encoding,

    /// Encoding of the output file
    #[arg(long, default_value = "utf-8")]
    pub output_encoding: Encoding,
}

impl ConvertArgs {
    fn encode(&self, format: Format, tree: &Value) -> Result<String, CodecError> {
        match format {
            Format::Json => {
                let options = JsonEncodeOptions {
                    ascii_escape: self.ascii,
                    indent: (!self.compact).then_some(self.indent),
                    sort_keys: self.sort_keys,
                };
                Json::encode(tree, &options)
            }
            Format::Toml => {
                let options = TomlEncodeOptions {
                    pretty: self.pretty,
                };
                Toml::encode(tree, &options)
            }
            Format::Yaml => {
                let options = YamlEncodeOptions {
                    sort_keys: !self.keep_order,
                };
                Yaml::encode(tree, &options)
            }
        }
    }
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let formats = resolve_format(args.from, &args.input)
        .and_then(|from| resolve_format(args.to, &args.output).map(|to| (from, to)));
    let (from, to) = match formats {
        Ok(formats) => formats,
        Err(err) => {
            err.display();
            return Err(anyhow::anyhow!("Unknown format"));
        }
    };

    let tree = match read_text(&args.input, args.input_encoding)
        .and_then(|text| from.decode(&text).map_err(ConfigError::from))
    {
        Ok(tree) => tree,
        Err(err) => {
            explain(&args.input, err).display();
            return Err(anyhow::anyhow!("Conversion failed"));
        }
    };

    let written = args
        .encode(to, &tree)
        .map_err(ConfigError::from)
        .and_then(|text| write_text(&args.output, &text, args.output_encoding));
    if let Err(err) = written {
        explain(&args.output, err).display();
        return Err(anyhow::anyhow!("Conversion failed"));
    }
    debug!(input = %args.input.display(), output = %args.output.display(), %from, %to, "Converted document");

    output::success(&format!(
        "{} ({}) -> {} ({})",
        args.input.display(),
        from,
        args.output.display(),
        to,
    ));
    Ok(())
}
