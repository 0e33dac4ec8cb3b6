use super::backend::BackendKind;
use super::payload::DocumentPayload;

/// One backend's contribution to a fused candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendContribution {
    pub backend: BackendKind,
    /// 1-based rank the document held in that backend's list.
    pub rank: usize,
}

/// A document after RRF fusion, keyed by `doc_id`.
#[derive(Debug, Clone)]
pub struct FusedCandidate {
    pub doc_id: String,
    /// Fused RRF score (higher = more relevant). Strictly increases with the
    /// number of corroborating backends, all else equal.
    pub score: f64,
    /// Which backends returned this document, and at which rank.
    pub contributions: Vec<BackendContribution>,
    pub payload: DocumentPayload,
}

impl FusedCandidate {
    /// Backends that contributed to this candidate, in contribution order.
    pub fn sources(&self) -> Vec<BackendKind> {
        self.contributions.iter().map(|c| c.backend).collect()
    }
}
