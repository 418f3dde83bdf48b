//! A small JSONPath engine and a harness for measuring it.
//!
//! The engine lives in the workspace crates and is re-exported here:
//!
//! - [`Value`]: the in-memory document model (`jsonpick-types`)
//! - [`compile`], [`evaluate`], [`locate`], [`query`], [`PathCache`]: the
//!   path compiler, evaluator and query facade (`jsonpick-jpath`)
//! - [`executor`]: sequential and thread-pool executors (`jsonpick-executor`)
//!
//! The [`bench`] module fires many concurrent evaluations of one path against
//! one document and records wall time and resident memory, the way the
//! `jsonpick bench` command does.

pub mod bench;
pub mod commands;
pub mod error;

pub use error::BenchError;

pub use jsonpick_executor as executor;
pub use jsonpick_jpath::{
    CacheStats, CompiledPath, JPathError, Located, MatchSet, NormalizedPath, PathCache,
    PathElement, Selector, compile, evaluate, locate, query,
};
pub use jsonpick_types::{Map, Value, ValueKind};
