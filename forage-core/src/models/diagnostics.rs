use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::backend::{BackendKind, BackendStatus};
use crate::intent::QueryIntent;

/// Per-backend call record, one per consulted backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendCallDiagnostics {
    pub backend: BackendKind,
    pub status: BackendStatus,
    pub latency_ms: u64,
    pub result_count: usize,
}

/// What happened during one pipeline invocation. Returned alongside the
/// ranked context so the caller can decide on its own fallback behavior and
/// operators can build monitoring on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDiagnostics {
    pub query_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub intent: QueryIntent,
    pub intent_confidence: f64,
    pub backends: Vec<BackendCallDiagnostics>,
    /// True when at least one backend failed and the ranking was produced
    /// from the surviving subset.
    pub degraded: bool,
    /// False when the fused order was passed through unreranked.
    pub rerank_applied: bool,
    pub total_latency_ms: u64,
}

impl PipelineDiagnostics {
    /// Statuses of all failed backends, for quick inspection.
    pub fn failed_backends(&self) -> Vec<BackendKind> {
        self.backends
            .iter()
            .filter(|b| b.status.is_failure())
            .map(|b| b.backend)
            .collect()
    }
}
