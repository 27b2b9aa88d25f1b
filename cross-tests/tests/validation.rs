use config::{ConfigError, JsonConfig, TomlConfig, YamlConfig};
use errors::FieldError;
use testing::{AppConfig, CellRulesConfig, ProjectConfig, User};

fn json_errors(text: &str) -> errors::ValidationErrors {
    match JsonConfig::<ProjectConfig>::new().unwrap().deserialize(text) {
        Err(ConfigError::Validation(errors)) => errors,
        other => panic!("expected validation errors, got {other:?}"),
    }
}

#[test]
fn every_field_problem_is_reported_at_once() {
    let errors = json_errors(r#"{"version": 1, "install_requires": [1, "toml"]}"#);

    assert_eq!(errors.len(), 3, "{errors}");
    assert_eq!(
        errors.paths().collect::<Vec<_>>(),
        vec!["name", "version", "install_requires[0]"],
    );
    assert_eq!(errors.errors_for("name"), &[FieldError::Missing]);
    assert!(errors.errors_for("version")[0].is_type_mismatch());
    assert!(errors.errors_for("install_requires[0]")[0].is_type_mismatch());
}

#[test]
fn missing_required_field_alone() {
    let errors = json_errors("{}");
    let messages = errors.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages["name"], vec!["Missing data for required field."]);
}

#[test]
fn strings_are_never_coerced_from_numbers() {
    let errors = json_errors(r#"{"name": "demo", "version": 1}"#);
    assert_eq!(errors.messages()["version"], vec!["Not a valid string."]);

    let project = JsonConfig::<ProjectConfig>::new()
        .unwrap()
        .deserialize(r#"{"name": "demo", "version": "1.0"}"#)
        .unwrap();
    assert_eq!(project.version, "1.0");
    assert_eq!(project.license, "MIT");
}

#[test]
fn empty_documents_load_defaults_in_every_format() {
    assert_eq!(
        JsonConfig::<AppConfig>::new().unwrap().deserialize("{}").unwrap(),
        AppConfig::default(),
    );
    assert_eq!(
        TomlConfig::<AppConfig>::new().unwrap().deserialize("").unwrap(),
        AppConfig::default(),
    );
    assert_eq!(
        YamlConfig::<AppConfig>::new().unwrap().deserialize("{}").unwrap(),
        AppConfig::default(),
    );
    assert_eq!(
        JsonConfig::<CellRulesConfig>::new()
            .unwrap()
            .deserialize("{}")
            .unwrap(),
        CellRulesConfig::default(),
    );
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = YamlConfig::<AppConfig>::new()
        .unwrap()
        .deserialize("server:\n  httpPort: 9000\nmysql:\n  user: root\n")
        .unwrap();
    assert_eq!(config.server.http_port, 9000);
    assert_eq!(config.server.domain, "localhost");
    assert_eq!(config.mysql.user, "root");
    assert_eq!(config.mysql.host, "localhost");
    assert!(config.runtime.debug);
}

#[test]
fn nested_errors_carry_dotted_paths() {
    let err = JsonConfig::<AppConfig>::new()
        .unwrap()
        .deserialize(
            r#"{
                "server": {"httpPort": "80", "bannedIps": [1, "10.0.0.1", false]},
                "runtime": {"debug": "yes"},
                "mysql": 5
            }"#
        )
        .unwrap_err();
    let messages = err.validation().unwrap().messages();

    assert_eq!(messages["server.httpPort"], vec!["Not a valid integer."]);
    assert_eq!(messages["server.bannedIps[0]"], vec!["Not a valid string."]);
    assert_eq!(messages["server.bannedIps[2]"], vec!["Not a valid string."]);
    assert_eq!(messages["runtime.debug"], vec!["Not a valid boolean."]);
    assert_eq!(messages["mysql"], vec!["Not a valid mapping."]);
    assert!(!messages.contains_key("server.bannedIps[1]"));
}

#[test]
fn map_values_report_under_their_key() {
    let err = JsonConfig::<CellRulesConfig>::new()
        .unwrap()
        .deserialize(r#"{"version": 1.5, "rules": {"a": [{"fn": "add", "per_cell": "no"}, {}]}}"#)
        .unwrap_err();
    let messages = err.validation().unwrap().messages();

    assert_eq!(messages["version"], vec!["Not a valid string | integer."]);
    assert_eq!(messages["rules.a[0].per_cell"], vec!["Not a valid boolean."]);
    assert_eq!(messages["rules.a[1].fn"], vec!["Missing data for required field."]);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = JsonConfig::<User>::new()
        .unwrap()
        .deserialize(r#"{"name": "tom", "nickname": "t"}"#)
        .unwrap_err();
    assert_eq!(err.validation().unwrap().messages()["nickname"], vec!["Unknown field."]);
}

#[test]
fn range_validator_runs_on_load() {
    let codec = JsonConfig::<User>::new().unwrap();

    let user = codec.deserialize(r#"{"name": "tom", "age": 18}"#).unwrap();
    assert_eq!(user.age, 18);
    assert_eq!(codec.deserialize(r#"{"name": "tom"}"#).unwrap().age, 18);

    let err = codec.deserialize(r#"{"name": "tom", "age": 100}"#).unwrap_err();
    let errors = err.validation().unwrap();
    assert!(errors.errors_for("age")[0].is_constraint());
    assert_eq!(
        errors.errors_for("age")[0].to_string(),
        "Must be greater than or equal to 18 and less than or equal to 60.",
    );
}

#[test]
fn yaml_documents_must_be_mappings() {
    let codec = YamlConfig::<AppConfig>::new().unwrap();
    for text in ["just a string", "- a\n- b\n", ""] {
        let err = codec.deserialize(text).unwrap_err();
        assert!(err.is_shape(), "{text:?} gave {err}");
        assert!(err.validation().is_none());
    }
}

#[test]
fn json_non_mapping_reports_under_schema_path() {
    let err = JsonConfig::<AppConfig>::new()
        .unwrap()
        .deserialize("[1, 2]")
        .unwrap_err();
    assert_eq!(
        err.validation().unwrap().messages()["_schema"],
        vec!["Not a valid mapping."],
    );
}

#[test]
fn malformed_text_is_a_format_error() {
    assert!(
        JsonConfig::<AppConfig>::new()
            .unwrap()
            .deserialize("{\"server\": ")
            .unwrap_err()
            .is_format(),
    );
    assert!(
        TomlConfig::<AppConfig>::new()
            .unwrap()
            .deserialize("[server")
            .unwrap_err()
            .is_format(),
    );
    assert!(
        YamlConfig::<AppConfig>::new()
            .unwrap()
            .deserialize("server: [1, 2")
            .unwrap_err()
            .is_format(),
    );
}
