//! Build a profile, write it out as JSON and read it back three ways.

use anyhow::Result;
use config::{Json, JsonConfig, JsonEncodeOptions};
use testing::{IntOrStr, UserProfile, scratch_dir};
use tracing::info;

fn main() -> Result<()> {
    demos::init_tracing();

    let mut profile = UserProfile {
        name: "Tom".to_string(),
        uid: IntOrStr::Str(uuid::Uuid::new_v4().simple().to_string()),
        email: "tom@gmail.com".to_string(),
        ..UserProfile::default()
    };
    profile.tags.extend(["Engineer".to_string(), "Artist".to_string()]);

    let codec = JsonConfig::<UserProfile>::new()?.with_encode_options(JsonEncodeOptions {
        indent: Some(2),
        ..Default::default()
    });

    let serialized = codec.serialize(&profile)?;
    println!("{serialized}");

    let dir = scratch_dir()?;
    let path = dir.path().join("demo_profile.json");
    codec.save(&path, &profile)?;
    info!("Saved profile to {}", path.display());

    let from_text = codec.deserialize(&serialized)?;
    println!("{from_text:?}");

    let from_file = codec.load(&path)?;
    println!("{from_file:?}");

    let via_trait = <UserProfile as config::Serializable>::load_from::<Json>(&path, &Default::default())?;

    anyhow::ensure!(
        profile.uid == from_text.uid && from_text.uid == from_file.uid && from_file.uid == via_trait.uid,
        "uid changed during the round trip",
    );
    Ok(())
}
