//! Partial-success batch operations.
//!
//! A [`BatchAggregator`] runs one [`RemoteOperation`] per (target, item)
//! pairing, captures every per-pairing error as a [`FailureRecord`] and maps
//! the collected [`AggregateResult`] to an [`ExitStatus`].

mod aggregator;
mod exit;
mod types;

pub use aggregator::{run_pairing, BatchAggregator, RemoteOperation};
pub use exit::ExitStatus;
pub use types::{AggregateResult, FailureRecord, Outcome, SuccessRecord};
