use indexmap::IndexMap;
use sc_core::{Mapping, Value};
use schema::validators::Range;
use schema::{Field, FieldType, Record, SchemaBuilder};
use serde::{Deserialize, Serialize};

/// An integer or a string, kept in whichever form it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntOrStr {
    Int(i64),
    Str(String),
}

impl From<i64> for IntOrStr {
    fn from(value: i64) -> Self {
        IntOrStr::Int(value)
    }
}

impl From<&str> for IntOrStr {
    fn from(value: &str) -> Self {
        IntOrStr::Str(value.to_string())
    }
}

impl From<String> for IntOrStr {
    fn from(value: String) -> Self {
        IntOrStr::Str(value)
    }
}

fn int_or_str() -> FieldType {
    FieldType::union([FieldType::Str, FieldType::Int])
}

fn string_list() -> FieldType {
    FieldType::seq(FieldType::Str)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub http_port: i64,
    pub websocket_port: i64,
    pub domain: String,
    pub password: String,
    pub banned_ips: Vec<String>,
    pub banned_client_ids: Vec<String>,
    pub banned_hostnames: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            websocket_port: 8080,
            domain: "localhost".to_string(),
            password: String::new(),
            banned_ips: Vec::new(),
            banned_client_ids: Vec::new(),
            banned_hostnames: Vec::new(),
        }
    }
}

impl Record for ServerConfig {
    fn describe(schema: SchemaBuilder) -> SchemaBuilder {
        schema
            .field(Field::new("httpPort", FieldType::Int).default(8080))
            .field(Field::new("websocketPort", FieldType::Int).default(8080))
            .field(Field::new("domain", FieldType::Str).default("localhost"))
            .field(Field::new("password", FieldType::Str).default(""))
            .field(Field::new("bannedIps", string_list()).default_with(Value::empty_sequence))
            .field(Field::new("bannedClientIds", string_list()).default_with(Value::empty_sequence))
            .field(Field::new("bannedHostnames", string_list()).default_with(Value::empty_sequence))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub debug: bool,
    pub enable_logging: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            debug: true,
            enable_logging: false,
        }
    }
}

impl Record for RuntimeConfig {
    fn describe(schema: SchemaBuilder) -> SchemaBuilder {
        schema
            .field(Field::new("debug", FieldType::Bool).default(true))
            .field(Field::new("enableLogging", FieldType::Bool).default(false))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MySqlConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for MySqlConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            user: String::new(),
            password: String::new(),
            database: String::new(),
        }
    }
}

impl Record for MySqlConfig {
    fn describe(schema: SchemaBuilder) -> SchemaBuilder {
        schema
            .field(Field::new("host", FieldType::Str).default("localhost"))
            .field(Field::new("user", FieldType::Str).default(""))
            .field(Field::new("password", FieldType::Str).default(""))
            .field(Field::new("database", FieldType::Str).default(""))
    }
}

/// Application config with three nested sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub server: ServerConfig,
    pub mysql: MySqlConfig,
    pub runtime: RuntimeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            server: ServerConfig::default(),
            mysql: MySqlConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl Record for AppConfig {
    fn describe(schema: SchemaBuilder) -> SchemaBuilder {
        schema
            .field(Field::new("environment", FieldType::Str).default("local"))
            .field(Field::new("server", FieldType::record::<ServerConfig>()).default_nested())
            .field(Field::new("mysql", FieldType::record::<MySqlConfig>()).default_nested())
            .field(Field::new("runtime", FieldType::record::<RuntimeConfig>()).default_nested())
    }
}

/// `AppConfig::default()` with a few fields changed in every section.
pub fn sample_app_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.runtime.debug = true;
    config.mysql.user = "root".to_string();
    config.mysql.password = "password".to_string();
    config.mysql.database = "test_db".to_string();
    config.server.banned_ips.push("999.999.999.999".to_string());
    config
        .server
        .banned_client_ids
        .push("df3453rewr349543utff".to_string());
    config
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub uid: IntOrStr,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
    pub tags: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            uid: IntOrStr::Int(-1),
            email: String::new(),
            password: String::new(),
            is_admin: false,
            tags: Vec::new(),
        }
    }
}

impl Record for UserProfile {
    fn describe(schema: SchemaBuilder) -> SchemaBuilder {
        schema
            .field(Field::new("name", FieldType::Str).default(""))
            .field(Field::new("uid", int_or_str()).default(-1))
            .field(Field::new("email", FieldType::Str).default(""))
            .field(Field::new("password", FieldType::Str).default(""))
            .field(Field::new("is_admin", FieldType::Bool).default(false))
            .field(Field::new("tags", string_list()).default_with(Value::empty_sequence))
    }
}

/// Package metadata; only `name` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub description: String,
    pub author: String,
    pub author_email: String,
    pub license: String,
    pub version: String,
    pub install_requires: Vec<String>,
}

impl ProjectConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: "<description>".to_string(),
            author: "<author>".to_string(),
            author_email: "<email>".to_string(),
            license: "MIT".to_string(),
            version: "0.1".to_string(),
            install_requires: Vec::new(),
        }
    }
}

impl Record for ProjectConfig {
    fn describe(schema: SchemaBuilder) -> SchemaBuilder {
        schema
            .field(Field::new("name", FieldType::Str).doc("Distribution name"))
            .field(Field::new("description", FieldType::Str).default("<description>"))
            .field(Field::new("author", FieldType::Str).default("<author>"))
            .field(Field::new("author_email", FieldType::Str).default("<email>"))
            .field(Field::new("license", FieldType::Str).default("MIT"))
            .field(Field::new("version", FieldType::Str).default("0.1"))
            .field(Field::new("install_requires", string_list()).default_with(Value::empty_sequence))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub age: i64,
}

impl Record for User {
    fn describe(schema: SchemaBuilder) -> SchemaBuilder {
        schema
            .field(Field::new("name", FieldType::Str))
            .field(
                Field::new("age", FieldType::Int)
                    .default(18)
                    .validate(Range::new(18, 60)),
            )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRule {
    #[serde(rename = "fn")]
    pub function: String,
    pub args: Vec<Value>,
    pub kwargs: Mapping,
    pub per_cell: bool,
}

impl CellRule {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            args: Vec::new(),
            kwargs: Mapping::new(),
            per_cell: true,
        }
    }
}

impl Record for CellRule {
    fn describe(schema: SchemaBuilder) -> SchemaBuilder {
        schema
            .field(Field::new("fn", FieldType::Str))
            .field(Field::new("args", FieldType::seq(FieldType::Any)).default_with(Value::empty_sequence))
            .field(Field::new("kwargs", FieldType::map(FieldType::Any)).default_with(Value::empty_mapping))
            .field(Field::new("per_cell", FieldType::Bool).default(true))
    }
}

/// Named lists of cell rules plus free-form globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRulesConfig {
    pub version: IntOrStr,
    pub globals: Mapping,
    pub rules: IndexMap<String, Vec<CellRule>>,
}

impl Default for CellRulesConfig {
    fn default() -> Self {
        Self {
            version: IntOrStr::Int(1),
            globals: Mapping::new(),
            rules: IndexMap::new(),
        }
    }
}

impl Record for CellRulesConfig {
    fn describe(schema: SchemaBuilder) -> SchemaBuilder {
        schema
            .field(Field::new("version", int_or_str()).default(1))
            .field(Field::new("globals", FieldType::map(FieldType::Any)).default_with(Value::empty_mapping))
            .field(
                Field::new(
                    "rules",
                    FieldType::map(FieldType::seq(FieldType::record::<CellRule>())),
                )
                .default_with(Value::empty_mapping),
            )
    }
}

pub fn sample_cell_rules() -> CellRulesConfig {
    let rule = |per_cell: bool| CellRule {
        args: vec![Value::from(1), Value::from(2)],
        kwargs: [("c".to_string(), Value::from(3))].into_iter().collect(),
        per_cell,
        ..CellRule::new("add")
    };

    let mut rules = IndexMap::new();
    rules.insert("a".to_string(), vec![rule(false), rule(true)]);
    rules.insert("b".to_string(), vec![rule(true)]);

    CellRulesConfig {
        version: IntOrStr::from("1.0"),
        globals: [
            ("a".to_string(), Value::from(1)),
            ("b".to_string(), Value::from(2)),
        ]
        .into_iter()
        .collect(),
        rules,
    }
}
