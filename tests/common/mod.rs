pub mod fixtures;

use jsonpick::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Build a document from a `json!` literal.
pub fn doc(value: serde_json::Value) -> Value {
    Value::from(value)
}

/// The elements of a `json!` array literal, as document values.
pub fn values(items: serde_json::Value) -> Vec<Value> {
    match Value::from(items) {
        Value::Array(items) => items,
        other => vec![other],
    }
}
