//! # forage-backends
//!
//! In-memory reference implementations of the `IRetriever` contract, one
//! per backend kind. They make the pipeline runnable and testable without
//! external stores; production deployments replace them with adapters over
//! a real vector store, keyword index, and graph database.
//!
//! All indexes are build-then-share: populated before the pipeline starts,
//! immutable afterwards, so searches need no locks.

mod graph;
mod keyword;
mod vector;

pub use graph::{Community, EntityGraph, GraphGlobalIndex, GraphLocalIndex};
pub use keyword::InMemoryKeywordIndex;
pub use vector::InMemoryVectorIndex;

use forage_core::models::{BackendKind, DocumentPayload, RankedItem};

/// Turn scored hits into ranked items: best-first, deterministic on score
/// ties by doc id, capped at `limit`, ranks assigned 1-based.
fn to_ranked_items(
    mut scored: Vec<(String, DocumentPayload, f64)>,
    backend: BackendKind,
    limit: usize,
) -> Vec<RankedItem> {
    scored.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
    scored
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (doc_id, payload, native_score))| RankedItem {
            doc_id,
            backend,
            rank: i + 1,
            native_score,
            payload,
        })
        .collect()
}
