use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::payload::DocumentPayload;

/// The four retrieval backend types consulted by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Dense-vector similarity search.
    Vector,
    /// Sparse keyword / full-text index.
    Keyword,
    /// Local graph-entity lookup (entities named in the query + neighbors).
    GraphLocal,
    /// Global graph-community lookup (community summaries).
    GraphGlobal,
}

impl BackendKind {
    /// All backend kinds, in the fixed order results are reported in.
    pub const ALL: [BackendKind; 4] = [
        BackendKind::Vector,
        BackendKind::Keyword,
        BackendKind::GraphLocal,
        BackendKind::GraphGlobal,
    ];

    /// Stable snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Vector => "vector",
            BackendKind::Keyword => "keyword",
            BackendKind::GraphLocal => "graph_local",
            BackendKind::GraphGlobal => "graph_global",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The search request handed to one backend, derived from the query and its
/// intent classification.
#[derive(Debug, Clone)]
pub struct BackendQuery {
    pub backend: BackendKind,
    /// Search text; may differ from the raw query text after expansion.
    pub text: String,
    /// Logical collection / tenant to search within.
    pub namespace: String,
    /// How many results the backend should return at most.
    pub limit: usize,
    /// Deadline for this backend call. The coordinator enforces it; adapters
    /// should also propagate it to their store client where possible.
    pub timeout: Duration,
}

/// One retrieval hit from a single backend.
#[derive(Debug, Clone)]
pub struct RankedItem {
    /// Document / chunk identifier, the fusion key.
    pub doc_id: String,
    pub backend: BackendKind,
    /// 1-based rank within this backend's result list.
    pub rank: usize,
    /// Backend-native relevance score. Kept for diagnostics only; fusion
    /// arithmetic never reads it.
    pub native_score: f64,
    pub payload: DocumentPayload,
}

/// Outcome status of one backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendStatus {
    Ok,
    /// The backend answered with zero hits. Not a failure: a graph backend
    /// legitimately returns nothing for a purely factual query.
    Empty,
    Timeout,
    Error,
}

impl BackendStatus {
    /// Timeout and Error count as failures; Ok and Empty do not.
    pub fn is_failure(&self) -> bool {
        matches!(self, BackendStatus::Timeout | BackendStatus::Error)
    }
}

/// The ordered result list of one backend, with its status and latency.
#[derive(Debug, Clone)]
pub struct BackendResult {
    pub backend: BackendKind,
    pub status: BackendStatus,
    /// Empty whenever status is not `Ok`.
    pub items: Vec<RankedItem>,
    pub latency: Duration,
}

impl BackendResult {
    /// Whether this result contributes items to fusion.
    pub fn contributes(&self) -> bool {
        self.status == BackendStatus::Ok && !self.items.is_empty()
    }
}
