//! Shared fixtures for simpleconf tests and demos.
//!
//! Provides:
//! - Sample record types covering nested records, unions, validators and
//!   free-form values
//! - Populated sample instances
//! - Scratch directories for file round trips, removed on drop

mod fixtures;

pub use fixtures::*;
use tempfile::TempDir;

/// A fresh temporary directory, deleted when the handle is dropped.
pub fn scratch_dir() -> std::io::Result<TempDir> {
    let dir = tempfile::Builder::new().prefix("simpleconf-").tempdir()?;
    tracing::debug!("Created scratch directory {}", dir.path().display());
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::Record;

    #[test]
    fn test_fixture_schemas_derive() {
        assert!(AppConfig::schema().is_ok());
        assert!(UserProfile::schema().is_ok());
        assert!(ProjectConfig::schema().is_ok());
        assert!(User::schema().is_ok());
        assert!(CellRulesConfig::schema().is_ok());
    }

    fn load_empty<T: Record>() -> T {
        schema::load(&sc_core::Value::empty_mapping()).unwrap()
    }

    #[test]
    fn test_empty_mapping_loads_as_default() {
        assert_eq!(load_empty::<AppConfig>(), AppConfig::default());
        assert_eq!(load_empty::<ServerConfig>(), ServerConfig::default());
        assert_eq!(load_empty::<RuntimeConfig>(), RuntimeConfig::default());
        assert_eq!(load_empty::<MySqlConfig>(), MySqlConfig::default());
        assert_eq!(load_empty::<UserProfile>(), UserProfile::default());
        assert_eq!(load_empty::<CellRulesConfig>(), CellRulesConfig::default());
    }

    #[test]
    fn test_required_name_is_the_only_gap() {
        let tree: sc_core::Value = [("name", "demo")].into_iter().collect();

        let project: ProjectConfig = schema::load(&tree).unwrap();
        assert_eq!(project, ProjectConfig::new("demo"));

        let user: User = schema::load(&tree).unwrap();
        assert_eq!(user, User { name: "demo".to_string(), age: 18 });

        let tree: sc_core::Value = [("fn", "demo")].into_iter().collect();
        let rule: CellRule = schema::load(&tree).unwrap();
        assert_eq!(rule, CellRule::new("demo"));

        for err in [
            schema::load::<ProjectConfig>(&sc_core::Value::empty_mapping()).unwrap_err(),
            schema::load::<User>(&sc_core::Value::empty_mapping()).unwrap_err(),
        ] {
            let errors = err.validation().unwrap();
            assert_eq!(errors.len(), 1);
            assert!(errors.errors_for("name")[0].is_missing());
        }
    }

    #[test]
    fn test_scratch_dir_is_removed_on_drop() {
        let dir = scratch_dir().unwrap();
        let path = dir.path().to_path_buf();
        assert!(path.exists());
        drop(dir);
        assert!(!path.exists());
    }
}
