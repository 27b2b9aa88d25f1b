//! # simpleconf Schema Engine
//!
//! Record schemas describe how a typed configuration record maps onto a
//! [`sc_core::Value`] tree and which rules the tree must satisfy.
//!
//! - A record type implements [`Record`] and lists its fields once in
//!   [`Record::describe`]
//! - The first call to [`Record::schema`] checks the description and caches
//!   it for the life of the process
//! - [`dump`] turns an instance into a tree; [`load`] validates a tree and
//!   turns it back into an instance, reporting every problem at once

mod builder;
mod dump;
mod field;
mod load;
mod path;
pub mod registry;
pub mod validators;

pub use builder::{RecordSchema, SchemaBuilder, UnknownFields};
pub use dump::{dump, dump_with};
pub use field::{DefaultValue, Field, FieldType, RecordRef};
pub use load::{load, load_tree, load_with};
pub use path::FieldPath;
pub use registry::{derive, is_cached};
pub use validators::Validator;

use errors::SchemaError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// A configuration record with a declared schema.
///
/// ```ignore
/// impl Record for ServerConfig {
///     fn describe(schema: SchemaBuilder) -> SchemaBuilder {
///         schema
///             .field(Field::new("httpPort", FieldType::Int).default(8080))
///             .field(Field::new("bannedIps", FieldType::seq(FieldType::Str)).default_with(Value::empty_sequence))
///     }
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned + 'static {
    /// Adds this record's fields, in serialization order.
    fn describe(schema: SchemaBuilder) -> SchemaBuilder;

    /// The checked schema, derived on first use.
    fn schema() -> Result<Arc<RecordSchema>, SchemaError> {
        registry::derive::<Self>()
    }
}
