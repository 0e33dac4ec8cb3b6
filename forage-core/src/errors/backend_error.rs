/// Per-backend retrieval errors. Non-fatal: the coordinator records them in
/// the backend's `BackendResult.status` and continues with the siblings.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend call exceeded its deadline after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("backend unavailable: {reason}")]
    Unavailable { reason: String },
}

impl BackendError {
    /// Convenience constructor for store-level failures.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        BackendError::Unavailable {
            reason: reason.into(),
        }
    }
}
