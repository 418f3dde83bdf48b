use jsonpick::Value;
use serde_json::json;

/// A validation report keyed by record number, mirroring the lookup
/// `10.errors.113.description`: object key `"10"`, then an array of 114 errors.
pub fn keyed_report() -> Value {
    let mut errors: Vec<serde_json::Value> = (0..113)
        .map(|i| json!({ "code": i, "description": format!("error {}", i) }))
        .collect();
    errors.push(json!({ "code": 113, "description": "boom" }));
    Value::from(json!({
        "9": { "errors": [] },
        "10": { "errors": errors, "status": "failed" }
    }))
}

/// The same report stored as a top-level array of eleven records.
pub fn array_report() -> Value {
    let records: Vec<serde_json::Value> = (0..11)
        .map(|r| {
            let errors: Vec<serde_json::Value> = (0..114)
                .map(|i| json!({ "description": format!("record {} error {}", r, i) }))
                .collect();
            json!({ "errors": errors })
        })
        .collect();
    Value::from(serde_json::Value::Array(records))
}

/// The classic bookstore document.
pub fn store() -> Value {
    Value::from(json!({
        "store": {
            "book": [
                {
                    "category": "reference",
                    "author": "Nigel Rees",
                    "title": "Sayings of the Century",
                    "price": 8.95
                },
                {
                    "category": "fiction",
                    "author": "Evelyn Waugh",
                    "title": "Sword of Honour",
                    "price": 12.99
                },
                {
                    "category": "fiction",
                    "author": "Herman Melville",
                    "title": "Moby Dick",
                    "isbn": "0-553-21311-3",
                    "price": 8.99
                },
                {
                    "category": "fiction",
                    "author": "J. R. R. Tolkien",
                    "title": "The Lord of the Rings",
                    "isbn": "0-395-19395-8",
                    "price": 22.99
                }
            ],
            "bicycle": { "color": "red", "price": 19.95 }
        },
        "expensive": 10
    }))
}
