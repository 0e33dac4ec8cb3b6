use async_trait::async_trait;

use crate::errors::BackendError;
use crate::models::{BackendKind, BackendQuery, RankedItem};

/// One independent source of ranked results, implemented once per backend
/// type over the external store.
///
/// Requirements on implementors:
/// - respect `query.timeout` as a deadline hint and propagate it to the
///   underlying store client where possible (the coordinator enforces the
///   hard deadline regardless);
/// - return `Ok(vec![])` on zero hits, never an error;
/// - return items ranked best-first with correct 1-based `rank` fields;
/// - be safe for concurrent use: adapter-held connection pools are shared
///   across simultaneous queries.
#[async_trait]
pub trait IRetriever: Send + Sync {
    /// Which backend slot this adapter fills.
    fn kind(&self) -> BackendKind;

    /// Execute one search against the backing store.
    async fn search(&self, query: &BackendQuery) -> Result<Vec<RankedItem>, BackendError>;
}
