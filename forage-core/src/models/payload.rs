use serde::{Deserialize, Serialize};

/// Content payload attached to a retrieval hit. Opaque to the fusion engine;
/// only the reranker and the downstream answer stage look inside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPayload {
    /// The chunk text scored by the rerank model.
    pub text: String,
    /// Optional pointer back to the source document, for citation.
    pub source: Option<String>,
}

impl DocumentPayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
