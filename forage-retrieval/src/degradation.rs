//! Degradation policy over the coordinator's outcome.
//!
//! Partial failure is normal operation: fusion proceeds over the surviving
//! subset and the response is flagged as degraded. Only the total-loss
//! cases become hard errors — a zero-length success is never returned
//! silently.

use tracing::warn;

use forage_core::models::{BackendKind, BackendResult};
use forage_core::{RetrievalError, RetrieveResult};

/// Aggregate health of one coordinator round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineHealth {
    /// Every backend answered (possibly with zero hits — `Empty` and
    /// ok-with-zero-items are equivalent and are not failures).
    AllOk,
    /// At least one backend answered and at least one failed.
    Degraded { failed: Vec<BackendKind> },
    /// Every backend timed out or errored.
    AllFailed,
}

/// Classify the backend results.
pub fn assess(results: &[BackendResult]) -> PipelineHealth {
    let failed: Vec<BackendKind> = results
        .iter()
        .filter(|r| r.status.is_failure())
        .map(|r| r.backend)
        .collect();

    if failed.is_empty() {
        PipelineHealth::AllOk
    } else if failed.len() == results.len() {
        PipelineHealth::AllFailed
    } else {
        PipelineHealth::Degraded { failed }
    }
}

/// Apply the policy: error out on total failure, otherwise report whether
/// the ranking will be produced from a degraded subset.
pub fn ensure_viable(results: &[BackendResult]) -> RetrieveResult<bool> {
    match assess(results) {
        PipelineHealth::AllOk => Ok(false),
        PipelineHealth::Degraded { failed } => {
            warn!(failed = ?failed, "proceeding with degraded backend subset");
            Ok(true)
        }
        PipelineHealth::AllFailed => Err(RetrievalError::AllBackendsFailed {
            attempted: results.len(),
        }),
    }
}
