use serde::{Deserialize, Serialize};

/// A pairing that reached its intended end state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessRecord {
    /// Label the caller supplied (alias or username).
    #[serde(rename = "name")]
    pub target: String,
    pub value: String,
    /// The remote side reported the change as already present.
    #[serde(skip)]
    pub already_applied: bool,
}

/// A pairing that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    #[serde(rename = "name")]
    pub target: String,
    pub message: String,
}

/// The result of one (target, item) pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(SuccessRecord),
    Failure(FailureRecord),
}

impl Outcome {
    pub fn success(target: impl Into<String>, value: impl Into<String>) -> Self {
        Outcome::Success(SuccessRecord {
            target: target.into(),
            value: value.into(),
            already_applied: false,
        })
    }

    pub fn already_applied(target: impl Into<String>, value: impl Into<String>) -> Self {
        Outcome::Success(SuccessRecord {
            target: target.into(),
            value: value.into(),
            already_applied: true,
        })
    }

    pub fn failure(target: impl Into<String>, message: impl Into<String>) -> Self {
        Outcome::Failure(FailureRecord {
            target: target.into(),
            message: message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Successes and failures of one command invocation, in pairing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub successes: Vec<SuccessRecord>,
    pub failures: Vec<FailureRecord>,
}

impl AggregateResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an outcome to the matching sequence.
    pub fn push(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success(s) => self.successes.push(s),
            Outcome::Failure(f) => self.failures.push(f),
        }
    }

    /// Appends every outcome of `other`, keeping its order.
    pub fn merge(&mut self, other: AggregateResult) {
        self.successes.extend(other.successes);
        self.failures.extend(other.failures);
    }

    /// Total number of outcomes.
    pub fn len(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Successes whose change had already been applied remotely.
    pub fn already_applied(&self) -> impl Iterator<Item = &SuccessRecord> {
        self.successes.iter().filter(|s| s.already_applied)
    }
}

impl FromIterator<Outcome> for AggregateResult {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut result = AggregateResult::new();
        for outcome in iter {
            result.push(outcome);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collect_splits_outcomes_in_order() {
        let result: AggregateResult = vec![
            Outcome::success("u1", "PS1"),
            Outcome::failure("u2", "boom"),
            Outcome::already_applied("u3", "PS1"),
        ]
        .into_iter()
        .collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result.successes[0].target, "u1");
        assert_eq!(result.successes[1].target, "u3");
        assert_eq!(result.failures[0].message, "boom");
        assert_eq!(result.already_applied().count(), 1);
    }

    #[test]
    fn serializes_with_name_keys() {
        let result: AggregateResult = vec![
            Outcome::success("u1", "PS1"),
            Outcome::failure("u2", "not found in target org"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "successes": [{ "name": "u1", "value": "PS1" }],
                "failures": [{ "name": "u2", "message": "not found in target org" }],
            })
        );
    }

    #[test]
    fn merge_appends_after_existing() {
        let mut first: AggregateResult = vec![Outcome::success("a", "1")].into_iter().collect();
        let second: AggregateResult = vec![Outcome::success("b", "2"), Outcome::failure("c", "x")]
            .into_iter()
            .collect();
        first.merge(second);
        let targets: Vec<_> = first.successes.iter().map(|s| s.target.as_str()).collect();
        assert_eq!(targets, vec!["a", "b"]);
        assert_eq!(first.failures.len(), 1);
    }
}
