//! Output formatting functions.

pub mod json;
pub mod pretty;

use orguser_core::batch::ExitStatus;
use serde::Serialize;

pub use json::Envelope;

/// What a command produced: a JSON payload, its text rendering, warnings
/// and the exit status.
#[derive(Debug)]
pub struct Report<T: Serialize> {
    pub status: ExitStatus,
    pub result: T,
    pub text: String,
    pub warnings: Vec<String>,
}

impl<T: Serialize> Report<T> {
    /// Format the report for the chosen output mode.
    ///
    /// Returns `(stdout, stderr)` text.
    pub fn render(&self, as_json: bool) -> (String, String) {
        if as_json {
            let envelope = Envelope {
                status: self.status.code(),
                result: &self.result,
                warnings: self.warnings.clone(),
            };
            (json::format_json(&envelope), String::new())
        } else {
            let warnings = self
                .warnings
                .iter()
                .map(|w| format!("Warning: {w}"))
                .collect::<Vec<_>>()
                .join("\n");
            (self.text.clone(), warnings)
        }
    }
}
