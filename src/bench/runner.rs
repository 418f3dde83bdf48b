use super::config::{BenchConfig, Strategy};
use super::memory::{MemoryMonitor, MemoryUsage};
use crate::commands::load_document;
use crate::error::BenchError;
use jsonpick_executor::{Executor, ExecutorImpl};
use jsonpick_jpath::{JPathError, PathCache, compile, evaluate, query};
use jsonpick_types::Value;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The outcome of one measured batch.
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub strategy: Strategy,
    pub path: String,
    pub tasks: usize,
    pub executor: &'static str,
    pub threads: usize,
    pub elapsed: Duration,
    /// Matches returned by a single task.
    pub matches: usize,
    /// False if any task returned a different number of matches.
    pub consistent: bool,
    pub memory: MemoryUsage,
}

impl BenchReport {
    pub fn per_task(&self) -> Duration {
        match u32::try_from(self.tasks.max(1)) {
            Ok(tasks) => self.elapsed / tasks,
            Err(_) => self.elapsed.div_f64(self.tasks as f64),
        }
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<11} '{}' x{} on {} ({} threads): total {:.6}s, {} match(es)",
            self.strategy,
            self.path,
            self.tasks,
            self.executor,
            self.threads,
            self.elapsed.as_secs_f64(),
            self.matches,
        )?;
        if !self.consistent {
            f.write_str(" [INCONSISTENT]")?;
        }
        write!(
            f,
            ", rss {:.2} MB, peak {:.2} MB (+{:.2} MB)",
            self.memory.current_mb(),
            self.memory.peak_mb(),
            self.memory.peak_delta_mb(),
        )
    }
}

/// Runs `tasks` evaluations of `path` against `document` on `executor` and
/// measures the batch.
///
/// Syntax errors are reported before anything is timed, whatever the strategy.
pub fn run_and_measure(
    strategy: Strategy,
    document: &Arc<Value>,
    path: &str,
    tasks: usize,
    executor: &ExecutorImpl,
    sample_interval: Duration,
) -> Result<BenchReport, BenchError> {
    let plan = Arc::new(compile(path)?);
    let cache = Arc::new(PathCache::new());
    let items: Vec<usize> = (0..tasks).collect();

    log::debug!(
        "Running {} x{} for '{}' on {}",
        strategy,
        tasks,
        path,
        executor.name()
    );

    let monitor = MemoryMonitor::start(sample_interval);
    let start = Instant::now();
    let results: Vec<Result<usize, JPathError>> = match strategy {
        Strategy::OneShot => {
            let document = Arc::clone(document);
            let path = path.to_string();
            executor.execute_all_fallible(items, move |_| query(&document, &path).map(|m| m.len()))
        }
        Strategy::Cached => {
            let document = Arc::clone(document);
            let path = path.to_string();
            let cache = Arc::clone(&cache);
            executor.execute_all_fallible(items, move |_| {
                cache.query(&document, &path).map(|m| m.len())
            })
        }
        Strategy::Precompiled => {
            let document = Arc::clone(document);
            let plan = Arc::clone(&plan);
            executor.execute_all(items, move |_| Ok(evaluate(&plan, &document).len()))
        }
    };
    let elapsed = start.elapsed();
    let memory = monitor.stop();

    let counts = results.into_iter().collect::<Result<Vec<usize>, JPathError>>()?;
    let matches = counts.first().copied().unwrap_or(0);
    let consistent = counts.iter().all(|&c| c == matches);
    if strategy == Strategy::Cached {
        log::debug!("Cache after run: {:?}", cache.stats());
    }

    Ok(BenchReport {
        strategy,
        path: path.to_string(),
        tasks,
        executor: executor.name(),
        threads: executor.parallelism(),
        elapsed,
        matches,
        consistent,
        memory,
    })
}

/// Loads the configured document and measures every combination of task
/// count, path and strategy, in that nesting order.
pub fn run(config: &BenchConfig) -> Result<Vec<BenchReport>, BenchError> {
    config.validate().map_err(BenchError::Config)?;

    let document = Arc::new(load_document(&config.document)?);
    let executor = ExecutorImpl::with_threads(config.threads)?;
    log::info!(
        "Benchmarking {} path(s) with {} on {} thread(s)",
        config.paths.len(),
        executor.name(),
        executor.parallelism()
    );

    let mut reports = Vec::new();
    for &tasks in &config.task_counts {
        log::info!("run tasks={} start", tasks);
        for path in &config.paths {
            for &strategy in &config.strategies {
                let report = run_and_measure(
                    strategy,
                    &document,
                    path,
                    tasks,
                    &executor,
                    config.sample_interval,
                )?;
                log::info!("{}", report);
                reports.push(report);
            }
        }
        log::info!("run tasks={} end", tasks);
    }
    Ok(reports)
}
