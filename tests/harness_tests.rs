mod common;

use common::TestResult;
use common::fixtures::keyed_report;
use jsonpick::bench::{self, BenchConfig, Strategy};
use jsonpick::commands::{load_document, query_lines};
use jsonpick::BenchError;
use std::io::Write;
use std::time::Duration;

fn write_report() -> Result<tempfile::NamedTempFile, Box<dyn std::error::Error>> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(keyed_report().to_string().as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_load_document_round_trips_fixture() -> TestResult {
    let file = write_report()?;
    let loaded = load_document(file.path())?;
    assert_eq!(loaded, keyed_report());
    Ok(())
}

#[test]
fn test_load_document_reports_bad_json() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(b"{ not json")?;
    assert!(matches!(load_document(file.path()), Err(BenchError::Json(_))));
    assert!(matches!(
        load_document(file.path().with_extension("missing")),
        Err(BenchError::Io(_))
    ));
    Ok(())
}

#[test]
fn test_query_lines_against_loaded_file() -> TestResult {
    let file = write_report()?;
    let document = load_document(file.path())?;
    assert_eq!(query_lines(&document, "10.errors.113.description", false)?, vec!["\"boom\""]);
    assert_eq!(
        query_lines(&document, "[10].status", true)?,
        vec!["$['10']['status']\t\"failed\""]
    );
    Ok(())
}

#[test]
fn test_bench_run_covers_every_combination() -> TestResult {
    let file = write_report()?;
    let config = BenchConfig::default()
        .with_document(file.path())
        .with_task_counts(vec![1, 50])
        .with_threads(4)
        .with_sample_interval(Duration::from_millis(1));

    let reports = bench::run(&config)?;
    assert_eq!(reports.len(), 2 * config.paths.len() * Strategy::ALL.len());
    for report in &reports {
        assert_eq!(report.matches, 1, "{}", report);
        assert!(report.consistent, "{}", report);
        assert!(report.memory.peak >= report.memory.current);
    }
    assert_eq!(reports.iter().filter(|r| r.tasks == 50).count(), reports.len() / 2);
    Ok(())
}

#[test]
fn test_bench_run_stops_on_bad_path() -> TestResult {
    let file = write_report()?;
    let config = BenchConfig::default()
        .with_document(file.path())
        .with_paths(["10.errors[", "10"])
        .with_task_counts(vec![1])
        .with_threads(1);
    assert!(matches!(bench::run(&config), Err(BenchError::Path(_))));
    Ok(())
}
