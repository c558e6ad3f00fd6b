#![allow(missing_docs, dead_code)]

use std::{cell::RefCell, rc::Rc};

use jsonview::{Context, Value, ViewError};

pub const ORIGINAL: &str = r#"
{
    "request": {
        "filename": "example.rs",
        "retries": 3,
        "issued": "2025-03-14T09:26:53Z",
        "options": {
            "opt_level": "2",
            "features": ["serde", "tokio"]
        }
    },
    "matrix": [[1, 2], [3, 4]],
    "mixed": ["s", {"k": "v"}, null, ["u"], 1e20]
}"#;

pub fn decode(text: &str) -> Value {
    serde_json::from_str(text).expect("valid JSON")
}

pub fn encode(value: &Value) -> String {
    serde_json::to_string(value).expect("encodable value")
}

/// A context that records what it is told.
pub fn collecting() -> (Context, Rc<RefCell<Vec<ViewError>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (
        Context::with_handler(move |err| sink.borrow_mut().push(err)),
        seen,
    )
}
