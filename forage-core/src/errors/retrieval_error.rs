/// Errors surfaced to the pipeline's caller. The caller sees either a ranked
/// context (possibly flagged as degraded) or one of these — never a raw
/// transport error from an individual store.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("invalid query: {reason}")]
    InvalidQuery { reason: String },

    #[error("all {attempted} retrieval backends failed")]
    AllBackendsFailed { attempted: usize },

    #[error("no results found for query")]
    NoResults,

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl RetrievalError {
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        RetrievalError::InvalidQuery {
            reason: reason.into(),
        }
    }
}
