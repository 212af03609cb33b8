//! JSON output formatting.

use serde::Serialize;
use serde_json::{json, Value};

/// Envelope printed for `--json`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: u8,
    pub result: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Format a value as JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Format an aborted command as a JSON error envelope.
pub fn format_error(status: u8, message: &str) -> String {
    let value: Value = json!({
        "status": status,
        "name": "Error",
        "message": message,
    });
    format_json(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_empty_warnings() {
        let text = format_json(&Envelope {
            status: 0,
            result: json!({ "ok": true }),
            warnings: Vec::new(),
        });
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({ "status": 0, "result": { "ok": true } }));
    }

    #[test]
    fn error_envelope() {
        let value: Value = serde_json::from_str(&format_error(1, "boom")).unwrap();
        assert_eq!(value["status"], 1);
        assert_eq!(value["message"], "boom");
    }
}
