use async_trait::async_trait;

use crate::models::IntentClassification;

/// Text-classification capability behind the intent stage. Rule-based,
/// embedding-similarity, and trained-model implementations are all valid.
///
/// Classification failure is never fatal to retrieval: an implementation
/// whose underlying model is unavailable must return
/// [`IntentClassification::balanced`] rather than hang or panic. The engine
/// additionally caps the call at the configured classifier budget and
/// substitutes the balanced classification on overrun.
#[async_trait]
pub trait IClassifier: Send + Sync {
    async fn classify(&self, query_text: &str) -> IntentClassification;
}
