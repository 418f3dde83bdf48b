//! A small JSONPath engine.
//!
//! A path expression is compiled once into an immutable [`CompiledPath`] and
//! can then be evaluated against any number of documents, from any number of
//! threads. Evaluation never fails: a path that matches nothing yields an
//! empty [`MatchSet`]. Only compiling malformed text is an error.
//!
//! ```
//! use jsonpick_jpath::{PathCache, compile, evaluate};
//! use jsonpick_types::Value;
//!
//! let text = r#"{"10": {"errors": [{"description": "boom"}]}}"#;
//! let doc: Value = serde_json::from_str(text).unwrap();
//! let plan = compile("10.errors.0.description").unwrap();
//! assert_eq!(evaluate(&plan, &doc).first().and_then(Value::as_str), Some("boom"));
//!
//! let cache = PathCache::new();
//! assert_eq!(cache.query(&doc, "..description").unwrap().len(), 1);
//! ```

pub mod ast;
pub mod cache;
pub mod engine;
pub mod error;
mod parser;

// --- Public API ---
pub use ast::{CompiledPath, NormalizedPath, PathElement, Selector};
pub use cache::{CacheStats, PathCache, query};
pub use engine::{Located, MatchSet, evaluate, locate};
pub use error::JPathError;
pub use parser::compile;
