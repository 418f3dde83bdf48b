//! Executor implementations for fanning query workloads out across threads.
//!
//! The query engine itself is synchronous; concurrency belongs to the caller.
//! These executors are how the benchmark harness fires many evaluations of
//! the same plan against the same document at once.
//!
//! ## Available Executors
//!
//! - [`RayonExecutor`]: Work-stealing thread pool (feature: `rayon`)
//! - [`SyncExecutor`]: Sequential execution on the calling thread
//!
//! ## Usage
//!
//! ```
//! use jsonpick_executor::{Executor, ExecutorImpl, SyncExecutor};
//!
//! let executor = ExecutorImpl::Sync(SyncExecutor::new());
//! let results = executor.execute_all(vec![1, 2, 3], |x| x * 2);
//! assert_eq!(results, vec![2, 4, 6]);
//! ```

#[cfg(feature = "rayon")]
mod rayon_executor;

#[cfg(feature = "rayon")]
pub use rayon_executor::RayonExecutor;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Failed to build thread pool: {0}")]
    PoolBuild(String),
}

/// Runs a batch of independent tasks and collects their results.
///
/// Results are returned in input order, whatever order the tasks ran in.
pub trait Executor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static;

    fn execute_all_fallible<T, R, E, F>(&self, items: Vec<T>, f: F) -> Vec<Result<R, E>>
    where
        T: Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
        F: Fn(T) -> Result<R, E> + Send + Sync + Clone + 'static,
    {
        self.execute_all(items, f)
    }

    /// The number of tasks that can run at the same time.
    fn parallelism(&self) -> usize;

    /// A human-readable name for reports and logs.
    fn name(&self) -> &'static str;
}

/// Runs every task on the calling thread, in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncExecutor;

impl SyncExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SyncExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        items.into_iter().map(f).collect()
    }

    fn parallelism(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "SyncExecutor"
    }
}

/// A type-erased executor that wraps concrete executor implementations.
///
/// Since the `Executor` trait has generic methods, it cannot be used as a trait object
/// (`dyn Executor`). This enum provides a workaround by holding concrete executor types
/// and delegating method calls to them.
#[derive(Clone, Debug)]
pub enum ExecutorImpl {
    /// Sequential executor (no parallelism)
    Sync(SyncExecutor),

    /// Rayon work-stealing thread pool executor
    #[cfg(feature = "rayon")]
    Rayon(RayonExecutor),
}

impl ExecutorImpl {
    /// Picks the parallel executor with `threads` workers when available,
    /// falling back to sequential execution for a single thread.
    pub fn with_threads(threads: usize) -> Result<Self, ExecutorError> {
        if threads <= 1 {
            return Ok(ExecutorImpl::Sync(SyncExecutor::new()));
        }
        #[cfg(feature = "rayon")]
        {
            Ok(ExecutorImpl::Rayon(RayonExecutor::with_threads(threads)?))
        }
        #[cfg(not(feature = "rayon"))]
        {
            log::warn!(
                "rayon feature disabled; running {} requested threads sequentially",
                threads
            );
            Ok(ExecutorImpl::Sync(SyncExecutor::new()))
        }
    }
}

impl Executor for ExecutorImpl {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        match self {
            ExecutorImpl::Sync(exec) => exec.execute_all(items, f),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.execute_all(items, f),
        }
    }

    fn execute_all_fallible<T, R, E, F>(&self, items: Vec<T>, f: F) -> Vec<Result<R, E>>
    where
        T: Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
        F: Fn(T) -> Result<R, E> + Send + Sync + Clone + 'static,
    {
        match self {
            ExecutorImpl::Sync(exec) => exec.execute_all_fallible(items, f),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.execute_all_fallible(items, f),
        }
    }

    fn parallelism(&self) -> usize {
        match self {
            ExecutorImpl::Sync(exec) => exec.parallelism(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.parallelism(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ExecutorImpl::Sync(exec) => exec.name(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Rayon(exec) => exec.name(),
        }
    }
}

impl Default for ExecutorImpl {
    fn default() -> Self {
        #[cfg(feature = "rayon")]
        {
            ExecutorImpl::Rayon(RayonExecutor::new())
        }
        #[cfg(not(feature = "rayon"))]
        {
            ExecutorImpl::Sync(SyncExecutor::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_executor_keeps_order() {
        let executor = SyncExecutor::new();
        assert_eq!(executor.execute_all(vec![3, 1, 2], |x| x + 1), vec![4, 2, 3]);
        assert_eq!(executor.parallelism(), 1);
    }

    #[test]
    fn test_single_thread_request_is_sequential() {
        let executor = ExecutorImpl::with_threads(1).unwrap();
        assert_eq!(executor.name(), "SyncExecutor");
    }

    #[test]
    fn test_fallible_results_keep_position() {
        let executor = ExecutorImpl::Sync(SyncExecutor::new());
        let results: Vec<Result<i32, &str>> = executor.execute_all_fallible(vec![1, 0, 2], |x| {
            if x == 0 { Err("zero") } else { Ok(x) }
        });
        assert_eq!(results, vec![Ok(1), Err("zero"), Ok(2)]);
    }
}
