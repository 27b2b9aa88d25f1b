use errors::SchemaError;
use schema::{Field, FieldType, Record, SchemaBuilder, derive, is_cached};
use serde::{Deserialize, Serialize};
use serial_test::serial;
use std::sync::Arc;
use std::thread;
use testing::{AppConfig, ServerConfig};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Quota {
    limit: i64,
}

impl Record for Quota {
    fn describe(schema: SchemaBuilder) -> SchemaBuilder {
        schema.field(Field::new("limit", FieldType::Int).default(100))
    }
}

#[test]
#[serial]
fn concurrent_first_use_yields_one_schema() {
    let schemas: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8).map(|_| scope.spawn(derive::<Quota>)).collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect()
    });

    assert!(is_cached::<Quota>());
    let cached = Quota::schema().unwrap();
    assert!(schemas.iter().all(|schema| Arc::ptr_eq(schema, &cached)));
}

#[test]
#[serial]
fn memoized_schema_behaves_like_the_first() {
    let first = AppConfig::schema().unwrap();
    let second = AppConfig::schema().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // Nested records are cached as a side effect of deriving the parent.
    assert!(is_cached::<ServerConfig>());

    let codec = config::JsonConfig::<AppConfig>::new().unwrap();
    let text = codec.serialize(&AppConfig::default()).unwrap();
    for _ in 0..3 {
        assert_eq!(codec.deserialize(&text).unwrap(), AppConfig::default());
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Broken {
    port: i64,
}

impl Record for Broken {
    fn describe(schema: SchemaBuilder) -> SchemaBuilder {
        schema.field(Field::new("port", FieldType::Int).default("eighty"))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HoldsBroken {
    inner: Broken,
}

impl Record for HoldsBroken {
    fn describe(schema: SchemaBuilder) -> SchemaBuilder {
        schema.field(Field::new("inner", FieldType::record::<Broken>()))
    }
}

#[test]
fn broken_record_surfaces_when_the_codec_is_built() {
    let err = config::JsonConfig::<HoldsBroken>::new().unwrap_err();
    match err {
        config::ConfigError::Schema(SchemaError::Nested { field, source, .. }) => {
            assert_eq!(field, "inner");
            assert!(matches!(*source, SchemaError::InvalidDefault { .. }));
        }
        other => panic!("expected a schema error, got {other:?}"),
    }
    assert!(!is_cached::<Broken>());
    assert!(!is_cached::<HoldsBroken>());
}
