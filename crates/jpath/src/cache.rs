//! One-shot and cached query entry points.
use crate::ast::CompiledPath;
use crate::engine::{Located, MatchSet, evaluate, locate};
use crate::error::JPathError;
use crate::parser::compile;
use jsonpick_types::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Compiles `path` and evaluates it against `document` in one call, without
/// caching the plan.
pub fn query<'a>(document: &'a Value, path: &str) -> Result<MatchSet<'a>, JPathError> {
    let plan = compile(path)?;
    Ok(evaluate(&plan, document))
}

/// A snapshot of a [`PathCache`]'s counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Maps literal path strings to their compiled plans.
///
/// Plans are compiled lazily on first use and kept for the cache's lifetime;
/// path text is immutable so an entry never goes stale. Lookups take a read
/// lock, and the write lock is only held to publish a new plan, so many
/// threads can query through one cache at once.
#[derive(Debug, Default)]
pub struct PathCache {
    plans: RwLock<HashMap<String, Arc<CompiledPath>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached plan for `path`, compiling and caching it first if
    /// needed. Syntax errors are returned and nothing is cached.
    pub fn get_or_compile(&self, path: &str) -> Result<Arc<CompiledPath>, JPathError> {
        // The map only ever holds fully built plans, so a poisoned lock is
        // still safe to read.
        if let Some(plan) = self
            .plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::trace!("Path cache hit for '{}'", path);
            return Ok(Arc::clone(plan));
        }

        let compiled = Arc::new(compile(path)?);
        self.misses.fetch_add(1, Ordering::Relaxed);
        log::debug!("Path cache miss for '{}', compiled {}", path, compiled);

        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have published the same path in the meantime;
        // keep the first plan so every caller shares one instance.
        let plan = plans.entry(path.to_string()).or_insert(compiled);
        Ok(Arc::clone(plan))
    }

    /// Evaluates `path` against `document` through the cache.
    pub fn query<'a>(&self, document: &'a Value, path: &str) -> Result<MatchSet<'a>, JPathError> {
        let plan = self.get_or_compile(path)?;
        Ok(evaluate(&plan, document))
    }

    /// Like [`PathCache::query`], but also reports where each match was found.
    pub fn locate<'a>(
        &self,
        document: &'a Value,
        path: &str,
    ) -> Result<Vec<Located<'a>>, JPathError> {
        let plan = self.get_or_compile(path)?;
        Ok(locate(&plan, document))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.plans.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_one_shot() {
        let data = Value::from(json!({ "customer": { "name": "ACME" } }));
        let matches = query(&data, "customer.name").unwrap();
        assert_eq!(matches.first(), Some(&Value::from("ACME")));
    }

    #[test]
    fn test_query_propagates_syntax_error() {
        let data = Value::Null;
        assert!(query(&data, "").unwrap_err().is_syntax());
        assert!(query(&data, "[").unwrap_err().is_syntax());
    }

    #[test]
    fn test_cache_compiles_once_per_path() {
        let cache = PathCache::new();
        let data = Value::from(json!({ "a": [1, 2, 3] }));

        for _ in 0..5 {
            assert_eq!(cache.query(&data, "a.*").unwrap().len(), 3);
        }
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 4,
                misses: 1,
                entries: 1
            }
        );

        let first = cache.get_or_compile("a.*").unwrap();
        let second = cache.get_or_compile("a.*").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_cache_keys_on_literal_text() {
        let cache = PathCache::new();
        let data = Value::from(json!({ "a": 1 }));
        cache.query(&data, "a").unwrap();
        cache.query(&data, "$.a").unwrap();
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("$.a"));
        assert_eq!(
            *cache.get_or_compile("a").unwrap(),
            *cache.get_or_compile("$.a").unwrap()
        );
    }

    #[test]
    fn test_failed_compile_is_not_cached() {
        let cache = PathCache::new();
        assert!(cache.get_or_compile("a[").is_err());
        assert!(cache.is_empty());
        assert!(!cache.contains("a["));
    }

    #[test]
    fn test_cache_locate() {
        let cache = PathCache::new();
        let data = Value::from(json!({ "a": [ { "b": 1 } ] }));
        let located = cache.locate(&data, "a[0].b").unwrap();
        assert_eq!(located[0].path.to_string(), "$['a'][0]['b']");
        assert_eq!(located[0].value, &Value::Number(1.0));
    }
}
