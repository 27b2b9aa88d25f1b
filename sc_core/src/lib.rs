//! # simpleconf Core
//!
//! The generic value tree every other simpleconf crate speaks.
//!
//! Codecs turn text into a [`Value`] and back; the schema engine turns a
//! [`Value`] into a typed record and back. Nothing in this crate validates:
//! a [`Value`] is purely structural.

pub mod bridge;
pub mod value;

pub use bridge::{BridgeError, BridgeErrorKind, from_value, to_value};
pub use value::{Mapping, Value};
