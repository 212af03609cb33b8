use super::AggregateResult;

/// Process exit status derived from an aggregate outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every pairing succeeded (or there were none).
    Success,
    /// Every pairing failed.
    Failure,
    /// Some pairings succeeded and some failed.
    PartialSuccess,
}

impl ExitStatus {
    /// Maps `(any successes, any failures)` to a status.
    pub fn from_flags(has_successes: bool, has_failures: bool) -> Self {
        match (has_successes, has_failures) {
            (true, true) => ExitStatus::PartialSuccess,
            (false, true) => ExitStatus::Failure,
            _ => ExitStatus::Success,
        }
    }

    /// Numeric process exit code.
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::PartialSuccess => 68,
        }
    }
}

impl From<&AggregateResult> for ExitStatus {
    fn from(result: &AggregateResult) -> Self {
        ExitStatus::from_flags(!result.successes.is_empty(), !result.failures.is_empty())
    }
}
