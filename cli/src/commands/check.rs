//! Check command - document validation
//!
//! Decodes a configuration file with the codec for its format and reports:
//! - The detected format
//! - The number of top-level keys, and their names
//!
//! Malformed text and non-mapping documents exit with code 1.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use config::{Encoding, Format, read_text};
use sc_core::Value;
use std::path::PathBuf;
use tracing::debug;

use super::{explain, resolve_format};
use crate::{output, ux_error};

#[derive(Args)]
pub struct CheckArgs {
    /// Configuration file to check
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Format of the file: json, toml, yaml (defaults to the file extension)
    #[arg(long, short = 'f')]
    pub format: Option<Format>,

    /// Text encoding: utf-8 or utf-8-sig
    #[arg(long, default_value = "utf-8")]
    pub encoding: Encoding,

    /// List the top-level keys
    #[arg(long)]
    pub keys: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let format = match resolve_format(args.format, &args.file) {
        Ok(format) => format,
        Err(err) => {
            err.display();
            return Err(anyhow::anyhow!("Unknown format"));
        }
    };

    let tree = match read_text(&args.file, args.encoding)
        .and_then(|text| format.decode(&text).map_err(Into::into))
    {
        Ok(tree) => tree,
        Err(err) => {
            explain(&args.file, err).display();
            return Err(anyhow::anyhow!("Check failed"));
        }
    };

    let Value::Mapping(mapping) = &tree else {
        ux_error::not_a_mapping(&args.file, tree.type_name()).display();
        return Err(anyhow::anyhow!("Check failed"));
    };
    debug!(path = %args.file.display(), %format, keys = mapping.len(), "Checked document");

    if args.json {
        let report = serde_json::json!({
            "path": args.file.display().to_string(),
            "format": format.name(),
            "keys": mapping.keys().collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::success(&format!(
        "{}: valid {}, {} top-level {}",
        args.file.display(),
        format,
        mapping.len(),
        if mapping.len() == 1 { "key" } else { "keys" },
    ));

    if args.keys {
        for (key, value) in mapping {
            println!("  {} {}", key.bold(), format!("({})", value.type_name()).dimmed());
        }
    }

    Ok(())
}
