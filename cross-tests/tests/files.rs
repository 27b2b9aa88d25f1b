use config::{
    ConfigError, Encoding, Format, JsonConfig, JsonEncodeOptions, Serializable, TomlConfig,
    YamlConfig, load_auto, save_auto,
};
use std::fs;
use testing::{AppConfig, ProjectConfig, UserProfile, sample_app_config, scratch_dir};

#[test]
fn save_then_load_in_every_format() {
    let dir = scratch_dir().unwrap();
    let config = sample_app_config();

    let json = dir.path().join("test.json");
    JsonConfig::<AppConfig>::new()
        .unwrap()
        .with_encode_options(JsonEncodeOptions {
            indent: Some(2),
            ..Default::default()
        })
        .save(&json, &config)
        .unwrap();
    let text = fs::read_to_string(&json).unwrap();
    assert!(text.starts_with("{\n  \"environment\""));
    let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["server"]["bannedIps"][0], "999.999.999.999");
    assert_eq!(JsonConfig::<AppConfig>::new().unwrap().load(&json).unwrap(), config);

    let toml = dir.path().join("test.toml");
    let codec = TomlConfig::<AppConfig>::new().unwrap();
    codec.save(&toml, &config).unwrap();
    assert_eq!(codec.load(&toml).unwrap(), config);

    let yaml = dir.path().join("test.yaml");
    let codec = YamlConfig::<AppConfig>::new().unwrap();
    codec.save(&yaml, &config).unwrap();
    let doc: serde_yaml::Value = serde_yaml::from_str(&fs::read_to_string(&yaml).unwrap()).unwrap();
    let user = doc
        .get("mysql")
        .and_then(|m| m.get("user"))
        .and_then(serde_yaml::Value::as_str);
    assert_eq!(user, Some("root"));
    assert_eq!(codec.load(&yaml).unwrap(), config);
}

#[test]
fn saving_twice_replaces_the_file() {
    let dir = scratch_dir().unwrap();
    let path = dir.path().join("profile.json");
    let codec = JsonConfig::<UserProfile>::new().unwrap();

    let mut profile = UserProfile {
        name: "Tom".to_string(),
        tags: vec!["Engineer".to_string(), "Artist".to_string()],
        ..UserProfile::default()
    };
    codec.save(&path, &profile).unwrap();

    profile.tags.clear();
    codec.save(&path, &profile).unwrap();
    assert_eq!(codec.load(&path).unwrap(), profile);
}

#[test]
fn loading_a_missing_file_is_an_io_error() {
    let dir = scratch_dir().unwrap();
    let path = dir.path().join("absent.yaml");

    match YamlConfig::<AppConfig>::new().unwrap().load(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn invalid_file_contents_report_every_field() {
    let dir = scratch_dir().unwrap();
    let path = dir.path().join("project.json");
    fs::write(&path, r#"{"version": 1, "install_requires": [1, "toml"]}"#).unwrap();

    let err = ProjectConfig::load_from::<config::Json>(&path, &Default::default()).unwrap_err();
    assert_eq!(err.validation().unwrap().len(), 3);
}

#[test]
fn byte_order_mark_round_trip() {
    let dir = scratch_dir().unwrap();
    let path = dir.path().join("bom.yaml");
    let codec = YamlConfig::<AppConfig>::new()
        .unwrap()
        .with_encoding(Encoding::Utf8Sig);

    codec.save(&path, &sample_app_config()).unwrap();
    assert_eq!(&fs::read(&path).unwrap()[..3], b"\xEF\xBB\xBF");
    assert_eq!(codec.load(&path).unwrap(), sample_app_config());
}

#[test]
fn format_follows_the_extension() {
    let dir = scratch_dir().unwrap();
    let config = sample_app_config();

    for name in ["app.json", "app.toml", "app.yaml", "app.YML"] {
        let path = dir.path().join(name);
        save_auto(&path, &config).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let tree = Format::from_path(&path).unwrap().decode(&text).unwrap();
        assert_eq!(tree.get("environment").and_then(|v| v.as_str()), Some("local"));

        let loaded: AppConfig = load_auto(&path).unwrap();
        assert_eq!(loaded, config, "{name}");
    }

    let err = save_auto(dir.path().join("app.ini"), &config).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownFormat { .. }));
    assert!(!dir.path().join("app.ini").exists());
}
