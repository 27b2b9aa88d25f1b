//! Maps of rule lists with free-form arguments, stored as TOML.

use anyhow::Result;
use config::{TomlConfig, TomlEncodeOptions};
use testing::{CellRulesConfig, sample_cell_rules, scratch_dir};

fn main() -> Result<()> {
    demos::init_tracing();
    let dir = scratch_dir()?;
    let path = dir.path().join("a.toml");

    let codec = TomlConfig::<CellRulesConfig>::new()?
        .with_encode_options(TomlEncodeOptions { pretty: true });

    let rules = sample_cell_rules();
    codec.save(&path, &rules)?;
    println!("{}", config::read_text(&path, codec.encoding())?);

    let loaded = codec.load(&path)?;
    println!("{loaded:#?}");
    anyhow::ensure!(loaded == rules, "rules changed during the round trip");

    // Sections left out of the file fall back to their defaults.
    let sparse = dir.path().join("b.toml");
    std::fs::write(&sparse, "version = 2\n\n[[rules.only]]\nfn = \"noop\"\n")?;
    println!("{:#?}", codec.load(&sparse)?);
    Ok(())
}
