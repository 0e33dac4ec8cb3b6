use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::backend::BackendKind;

/// Which backend subset a query may consult. `Hybrid` (the default) allows
/// every backend enabled in the config; the other modes restrict further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalMode {
    Hybrid,
    VectorOnly,
    KeywordOnly,
    GraphOnly,
}

impl RetrievalMode {
    /// Whether this mode permits consulting the given backend.
    pub fn allows(&self, kind: BackendKind) -> bool {
        match self {
            RetrievalMode::Hybrid => true,
            RetrievalMode::VectorOnly => kind == BackendKind::Vector,
            RetrievalMode::KeywordOnly => kind == BackendKind::Keyword,
            RetrievalMode::GraphOnly => {
                matches!(kind, BackendKind::GraphLocal | BackendKind::GraphGlobal)
            }
        }
    }
}

/// An immutable retrieval request. Constructed once by the caller; the
/// pipeline never mutates it.
#[derive(Debug, Clone)]
pub struct Query {
    /// Correlation id for log events belonging to this call.
    pub id: Uuid,
    pub text: String,
    /// Logical collection / tenant to search within.
    pub namespace: String,
    /// Caller-supplied mode override. `None` means `Hybrid`.
    pub mode: Option<RetrievalMode>,
    /// Caller-supplied result cap. `None` falls back to the configured
    /// rerank top-k.
    pub top_k: Option<usize>,
}

impl Query {
    pub fn new(text: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            namespace: namespace.into(),
            mode: None,
            top_k: None,
        }
    }

    pub fn with_mode(mut self, mode: RetrievalMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Effective mode: the override, or `Hybrid`.
    pub fn mode(&self) -> RetrievalMode {
        self.mode.unwrap_or(RetrievalMode::Hybrid)
    }
}
