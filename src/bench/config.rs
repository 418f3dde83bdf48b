use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// The same lookup written in each of the dialects the engine accepts.
pub const DEFAULT_PATHS: [&str; 3] = [
    "10.errors.113.description",
    "[10].errors.[113].description",
    "[10].errors[113].description",
];

/// How each task obtains its query plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Strategy {
    /// Compile and evaluate inside every task.
    OneShot,
    /// Go through one `PathCache` shared by all tasks of the run.
    Cached,
    /// Compile once before the clock starts and share the plan.
    Precompiled,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::OneShot, Strategy::Cached, Strategy::Precompiled];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::OneShot => "one-shot",
            Strategy::Cached => "cached",
            Strategy::Precompiled => "precompiled",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Everything one `jsonpick bench` invocation measures.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub document: PathBuf,
    pub paths: Vec<String>,
    /// Each entry is one batch size; `[1, 1000]` gives a cold single call and
    /// a loaded run.
    pub task_counts: Vec<usize>,
    pub threads: usize,
    pub strategies: Vec<Strategy>,
    pub sample_interval: Duration,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            document: PathBuf::from("big.json"),
            paths: DEFAULT_PATHS.iter().map(|p| p.to_string()).collect(),
            task_counts: vec![1, 1000],
            threads: num_cpus::get(),
            strategies: Strategy::ALL.to_vec(),
            sample_interval: Duration::from_millis(10),
        }
    }
}

impl BenchConfig {
    pub fn with_document(mut self, document: impl Into<PathBuf>) -> Self {
        self.document = document.into();
        self
    }

    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_task_counts(mut self, task_counts: Vec<usize>) -> Self {
        self.task_counts = task_counts;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    /// Rejects configurations that would measure nothing.
    pub fn validate(&self) -> Result<(), String> {
        if self.paths.is_empty() {
            return Err("at least one path is required".to_string());
        }
        if self.task_counts.is_empty() || self.task_counts.contains(&0) {
            return Err("task counts must be non-empty and positive".to_string());
        }
        if self.threads == 0 {
            return Err("thread count must be positive".to_string());
        }
        if self.strategies.is_empty() {
            return Err("at least one strategy is required".to_string());
        }
        if self.sample_interval.is_zero() {
            return Err("memory sample interval must be positive".to_string());
        }
        Ok(())
    }
}
