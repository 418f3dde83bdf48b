use clap::{Parser, Subcommand};
use jsonpick::bench::{self, BenchConfig, Strategy};
use jsonpick::commands::{load_document, query_lines};
use jsonpick::BenchError;
use std::path::PathBuf;
use std::time::Duration;

// Many short-lived match vectors are allocated per task under load.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Query JSON documents with path expressions and measure the engine.
#[derive(Parser, Debug)]
#[command(name = "jsonpick", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every match of PATH in FILE, one JSON value per line.
    Query {
        file: PathBuf,
        path: String,
        /// Prefix each match with its normalized path.
        #[arg(long)]
        paths: bool,
    },
    /// Time concurrent evaluations of one or more paths against FILE.
    Bench {
        file: PathBuf,
        /// Path expression to measure (repeatable).
        #[arg(long = "path")]
        paths: Vec<String>,
        /// Number of evaluations per batch (repeatable).
        #[arg(long = "tasks")]
        task_counts: Vec<usize>,
        /// Worker threads (defaults to the number of CPUs).
        #[arg(long)]
        threads: Option<usize>,
        /// How each task gets its plan (repeatable; defaults to all).
        #[arg(long = "strategy", value_enum)]
        strategies: Vec<Strategy>,
        /// Memory sampling interval in milliseconds.
        #[arg(long, default_value_t = 10)]
        sample_ms: u64,
    },
}

fn main() -> Result<(), BenchError> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Query { file, path, paths } => {
            let document = load_document(&file)?;
            for line in query_lines(&document, &path, paths)? {
                println!("{}", line);
            }
        }
        Command::Bench {
            file,
            paths,
            task_counts,
            threads,
            strategies,
            sample_ms,
        } => {
            let mut config = BenchConfig::default()
                .with_document(file)
                .with_sample_interval(Duration::from_millis(sample_ms));
            if !paths.is_empty() {
                config = config.with_paths(paths);
            }
            if !task_counts.is_empty() {
                config = config.with_task_counts(task_counts);
            }
            if let Some(threads) = threads {
                config = config.with_threads(threads);
            }
            if !strategies.is_empty() {
                config = config.with_strategies(strategies);
            }

            for report in bench::run(&config)? {
                println!("{}", report);
            }
        }
    }
    Ok(())
}
