//! Process-wide schema cache.
//!
//! Schemas are derived on first use of a record type and kept for the life
//! of the process, keyed by `TypeId`. Derivation runs outside the lock; if
//! two threads derive the same record concurrently, the first insert wins
//! and the other result is dropped (both are equal).

use crate::{Record, RecordSchema, SchemaBuilder};
use errors::SchemaError;
use parking_lot::RwLock;
use std::any::{TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::debug;

static SCHEMAS: LazyLock<RwLock<HashMap<TypeId, Arc<RecordSchema>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

thread_local! {
    // Records whose derivation is running on this thread, outermost first.
    static IN_PROGRESS: RefCell<Vec<(TypeId, &'static str)>> = const { RefCell::new(Vec::new()) };
}

/// Pops the in-progress entry even if `describe` panics.
struct InProgress;

impl InProgress {
    fn enter(type_id: TypeId, name: &'static str) -> Result<Self, SchemaError> {
        IN_PROGRESS.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().position(|(id, _)| *id == type_id) {
                let mut chain: Vec<&str> = stack[pos..].iter().map(|(_, name)| *name).collect();
                chain.push(name);
                return Err(SchemaError::Cycle {
                    chain: chain.join(" -> "),
                });
            }
            stack.push((type_id, name));
            Ok(InProgress)
        })
    }
}

impl Drop for InProgress {
    fn drop(&mut self) {
        IN_PROGRESS.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// The schema of `T`, deriving and caching it on first use.
pub fn derive<T: Record>() -> Result<Arc<RecordSchema>, SchemaError> {
    let type_id = TypeId::of::<T>();
    if let Some(schema) = SCHEMAS.read().get(&type_id) {
        return Ok(Arc::clone(schema));
    }

    let name = short_type_name::<T>();
    let schema = {
        let _guard = InProgress::enter(type_id, name)?;
        debug!(record = name, "Deriving record schema");
        Arc::new(T::describe(SchemaBuilder::new(name)).build()?)
    };

    let mut cache = SCHEMAS.write();
    let cached = cache.entry(type_id).or_insert_with(|| Arc::clone(&schema));
    if !Arc::ptr_eq(cached, &schema) {
        debug!(record = name, "Discarding redundant schema derivation");
    }
    Ok(Arc::clone(cached))
}

/// Whether `T`'s schema has already been derived.
pub fn is_cached<T: Record>() -> bool {
    SCHEMAS.read().contains_key(&TypeId::of::<T>())
}

/// Type name without its module path, e.g. `ServerConfig`.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let base_end = full.find('<').unwrap_or(full.len());
    let start = full[..base_end].rfind("::").map_or(0, |pos| pos + 2);
    &full[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, FieldType};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Leaf {
        value: i64,
    }

    impl Record for Leaf {
        fn describe(schema: SchemaBuilder) -> SchemaBuilder {
            schema.field(Field::new("value", FieldType::Int).default(0))
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Ouroboros {
        tail: Option<Box<Ouroboros>>,
    }

    impl Record for Ouroboros {
        fn describe(schema: SchemaBuilder) -> SchemaBuilder {
            schema.field(Field::new(
                "tail",
                FieldType::optional(FieldType::record::<Ouroboros>()),
            ))
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Ping {
        pong: Option<Box<Pong>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Pong {
        ping: Option<Box<Ping>>,
    }

    impl Record for Ping {
        fn describe(schema: SchemaBuilder) -> SchemaBuilder {
            schema.field(Field::new("pong", FieldType::optional(FieldType::record::<Pong>())))
        }
    }

    impl Record for Pong {
        fn describe(schema: SchemaBuilder) -> SchemaBuilder {
            schema.field(Field::new("ping", FieldType::optional(FieldType::record::<Ping>())))
        }
    }

    #[test]
    fn test_derive_is_memoized() {
        let first = derive::<Leaf>().unwrap();
        assert!(is_cached::<Leaf>());
        let second = derive::<Leaf>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "Leaf");
    }

    #[test]
    fn test_self_cycle_is_rejected() {
        let err = derive::<Ouroboros>().unwrap_err();
        match err.root_cause() {
            SchemaError::Cycle { chain } => assert_eq!(chain, "Ouroboros -> Ouroboros"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!is_cached::<Ouroboros>());
    }

    #[test]
    fn test_mutual_cycle_is_rejected() {
        let err = derive::<Ping>().unwrap_err();
        assert!(matches!(err.root_cause(), SchemaError::Cycle { chain } if chain == "Ping -> Pong -> Ping"));
        assert!(!is_cached::<Pong>());
        // The in-progress stack is unwound after a failure.
        assert!(derive::<Leaf>().is_ok());
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<Leaf>(), "Leaf");
        assert_eq!(short_type_name::<i64>(), "i64");
    }
}
