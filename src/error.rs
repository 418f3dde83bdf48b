// src/error.rs
use jsonpick_executor::ExecutorError;
use jsonpick_jpath::JPathError;
use thiserror::Error;

/// Errors surfaced by the command line tool and the benchmark harness.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path error: {0}")]
    Path(#[from] JPathError),

    #[error("Executor error: {0}")]
    Executor(#[from] ExecutorError),

    #[error("Invalid benchmark configuration: {0}")]
    Config(String),
}
