use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};

use crate::identity::{AliasResolver, AliasStore};
use crate::platform::PlatformError;

use super::{AggregateResult, Outcome};

/// One remote effectful call, performed once per (target, item) pairing.
#[async_trait]
pub trait RemoteOperation: Send + Sync {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    /// Performs the call for an already-resolved username and returns the
    /// value to report on success.
    async fn invoke(&self, username: &str, item: &str) -> Result<String, PlatformError>;

    /// Whether a remote error message means the change is already in place.
    fn is_already_applied(&self, _message: &str) -> bool {
        false
    }

    /// Rewrites a failure message before it is reported.
    fn describe_failure(&self, error: &PlatformError) -> String {
        error.to_string()
    }
}

/// Fans a [`RemoteOperation`] out over `targets × items`.
#[derive(Debug, Clone)]
pub struct BatchAggregator<S> {
    resolver: AliasResolver<S>,
    concurrency: usize,
}

impl<S: AliasStore> BatchAggregator<S> {
    /// Creates an aggregator running up to `concurrency` pairings at once.
    pub fn new(resolver: AliasResolver<S>, concurrency: usize) -> Self {
        Self {
            resolver,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs every pairing and collects one outcome per pairing.
    ///
    /// Pairings are ordered targets outer, items inner, and the result keeps
    /// that order regardless of completion order.
    pub async fn run<O>(&self, targets: &[String], items: &[String], op: &O) -> AggregateResult
    where
        O: RemoteOperation + ?Sized,
    {
        let pairings: Vec<(&str, &str)> = targets
            .iter()
            .flat_map(|t| items.iter().map(move |i| (t.as_str(), i.as_str())))
            .collect();

        tracing::debug!(
            operation = op.name(),
            pairings = pairings.len(),
            concurrency = self.concurrency,
            "Running batch"
        );

        stream::iter(pairings)
            .map(|(target, item)| self.invoke_one(op, target, item))
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect()
    }

    async fn invoke_one<O>(&self, op: &O, target: &str, item: &str) -> Outcome
    where
        O: RemoteOperation + ?Sized,
    {
        let username = self.resolver.resolve(target);
        run_pairing(op, target, &username, item).await
    }
}

/// Invokes `op` once and classifies the result.
///
/// `label` is what the caller supplied and is what the outcome reports;
/// `username` is what the remote call acts on.
pub async fn run_pairing<O>(op: &O, label: &str, username: &str, item: &str) -> Outcome
where
    O: RemoteOperation + ?Sized,
{
    match op.invoke(username, item).await {
        Ok(value) => {
            tracing::debug!(operation = op.name(), label, item, "Pairing succeeded");
            Outcome::success(label, value)
        }
        Err(error) if op.is_already_applied(&error.message()) => {
            tracing::warn!(
                operation = op.name(),
                label,
                item,
                "Already applied, treating as success"
            );
            Outcome::already_applied(label, item)
        }
        Err(error) => {
            tracing::debug!(operation = op.name(), label, item, %error, "Pairing failed");
            Outcome::failure(label, op.describe_failure(&error))
        }
    }
}
