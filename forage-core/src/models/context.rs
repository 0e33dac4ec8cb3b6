use serde::{Deserialize, Serialize};

use super::backend::BackendKind;
use super::payload::DocumentPayload;

/// One entry of the final ranked context returned to the caller.
///
/// Fused score and provenance are carried for explainability and citation;
/// once the reranker has run, its score alone determines the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextItem {
    pub doc_id: String,
    pub payload: DocumentPayload,
    pub fused_score: f64,
    /// `None` when the reranker was skipped or unavailable and the fused
    /// order was passed through.
    pub rerank_score: Option<f64>,
    /// Backends that surfaced this document.
    pub sources: Vec<BackendKind>,
}
