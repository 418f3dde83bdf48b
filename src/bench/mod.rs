//! Measures the engine under concurrent load.
//!
//! A run fans `tasks` evaluations of one path against one shared document out
//! over an executor, timing the whole batch and sampling resident memory on a
//! background thread while it runs.

mod config;
mod memory;
mod runner;

pub use config::{BenchConfig, DEFAULT_PATHS, Strategy};
pub use memory::{MemoryMonitor, MemoryUsage};
pub use runner::{BenchReport, run, run_and_measure};
