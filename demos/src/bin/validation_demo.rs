//! What load reports for documents that do not fit their record.

use anyhow::Result;
use config::{ConfigError, JsonConfig};
use testing::{ProjectConfig, User};

fn report<T: std::fmt::Debug>(label: &str, result: Result<T, ConfigError>) {
    match result {
        Ok(value) => println!("{label}: ok {value:?}"),
        Err(ConfigError::Validation(errors)) => {
            println!("{label}:");
            for (path, messages) in errors.messages() {
                println!("  {path}: {}", messages.join(" "));
            }
        }
        Err(other) => println!("{label}: {other}"),
    }
}

fn main() -> Result<()> {
    demos::init_tracing();

    let projects = JsonConfig::<ProjectConfig>::new()?;

    // "name" has no default.
    report("missing name", projects.deserialize("{}"));

    // "version" is a string field; numbers are not converted.
    report(
        "numeric version",
        projects.deserialize(r#"{"name": "demo", "version": 1}"#),
    );

    // Every element of "install_requires" must be a string.
    report(
        "numeric requirement",
        projects.deserialize(r#"{"name": "demo", "version": "1.0", "install_requires": [1, "toml"]}"#),
    );

    // "age" must lie between 18 and 60.
    let users = JsonConfig::<User>::new()?;
    report("user aged 18", users.deserialize(r#"{"name": "tom", "age": 18}"#));
    report("user aged 100", users.deserialize(r#"{"name": "tom", "age": 100}"#));

    Ok(())
}
