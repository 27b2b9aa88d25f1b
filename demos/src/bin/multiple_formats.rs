//! The same nested application config through JSON, TOML and YAML.

use anyhow::Result;
use config::{Codec, ConfigCodec, Json, JsonEncodeOptions, Toml, Yaml};
use std::path::Path;
use testing::{AppConfig, sample_app_config, scratch_dir};

fn round_trip<C: Codec>(codec: &ConfigCodec<AppConfig, C>, path: &Path) -> Result<()> {
    let config = sample_app_config();

    let serialized = codec.serialize(&config)?;
    println!("--- {} ---\n{serialized}", C::NAME);

    let parsed = codec.deserialize(&serialized)?;
    println!("{parsed:?}");

    codec.save(path, &parsed)?;
    let loaded = codec.load(path)?;
    println!("{loaded:?}");

    anyhow::ensure!(loaded == config, "{} round trip changed the config", C::NAME);
    Ok(())
}

fn main() -> Result<()> {
    demos::init_tracing();
    let dir = scratch_dir()?;

    let json = ConfigCodec::<AppConfig, Json>::new()?.with_encode_options(JsonEncodeOptions {
        indent: Some(2),
        ..Default::default()
    });
    round_trip(&json, &dir.path().join("test.json"))?;

    round_trip(&ConfigCodec::<AppConfig, Toml>::new()?, &dir.path().join("test.toml"))?;
    round_trip(&ConfigCodec::<AppConfig, Yaml>::new()?, &dir.path().join("test.yaml"))?;
    Ok(())
}
