//! The document model queried by the path engine.
//!
//! A [`Value`] is an owned JSON tree. Documents are built by an external
//! deserializer (usually `serde_json`) and are treated as read-only by the
//! query engine, so a single tree can be shared freely across threads.

mod de;
mod ser;
pub mod value;

pub use value::{Map, Value, ValueKind};
