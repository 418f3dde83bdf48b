//! Shared logic behind the `jsonpick` subcommands.
use crate::error::BenchError;
use jsonpick_jpath::{compile, evaluate, locate};
use jsonpick_types::Value;
use std::fs;
use std::path::Path;

/// Reads and parses a JSON document from disk.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value, BenchError> {
    let path = path.as_ref();
    log::debug!("Loading document from {}", path.display());
    let text = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&text)?;
    Ok(document)
}

/// Renders the matches of `path` one per line as compact JSON. With
/// `with_paths`, each line is prefixed by the match's normalized path and a tab.
pub fn query_lines(
    document: &Value,
    path: &str,
    with_paths: bool,
) -> Result<Vec<String>, BenchError> {
    let plan = compile(path)?;
    let lines = if with_paths {
        locate(&plan, document)
            .into_iter()
            .map(|m| format!("{}\t{}", m.path, m.value))
            .collect()
    } else {
        evaluate(&plan, document)
            .into_iter()
            .map(Value::to_string)
            .collect()
    };
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_lines_plain_and_with_paths() {
        let doc = Value::from(json!({ "a": [ { "b": 1 }, { "b": "two" } ] }));
        assert_eq!(query_lines(&doc, "a.*.b", false).unwrap(), vec!["1", "\"two\""]);
        assert_eq!(
            query_lines(&doc, "a.*.b", true).unwrap(),
            vec!["$['a'][0]['b']\t1", "$['a'][1]['b']\t\"two\""]
        );
    }

    #[test]
    fn test_query_lines_reports_syntax_errors() {
        let doc = Value::Null;
        assert!(matches!(
            query_lines(&doc, "a[", false),
            Err(BenchError::Path(_))
        ));
    }
}
