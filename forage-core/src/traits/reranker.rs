use async_trait::async_trait;

use crate::errors::RerankError;

/// Pairwise relevance model behind the rerank stage: scores (query,
/// passage) pairs jointly for higher precision than the first-pass
/// retrieval scores. One batched call per query.
///
/// Errors are absorbed by the ranking stage (fused order passes through);
/// implementations should fail fast rather than block past their deadline.
#[async_trait]
pub trait IReranker: Send + Sync {
    /// Score each passage against the query. Must return exactly one score
    /// per passage, in input order.
    async fn score(&self, query: &str, passages: &[String]) -> Result<Vec<f64>, RerankError>;
}
