/// Reranker errors. Non-fatal: the ranking stage passes the fused order
/// through unmodified when the rerank model cannot be consulted.
#[derive(Debug, thiserror::Error)]
pub enum RerankError {
    #[error("rerank model unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("rerank call exceeded its deadline after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("rerank model returned {got} scores for {expected} passages")]
    ScoreCountMismatch { expected: usize, got: usize },
}

impl RerankError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        RerankError::Unavailable {
            reason: reason.into(),
        }
    }
}
