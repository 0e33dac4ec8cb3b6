//! Reranking stage: cross-encoder scoring of the fused candidate pool.
//!
//! Operates only on the capped pool from fusion, never on raw backend
//! results, so its cost stays roughly constant regardless of corpus size.
//! The reranker is a quality enhancement, never a hard dependency: on model
//! error or timeout the fused order passes through unmodified.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use forage_core::models::{ContextItem, FusedCandidate};
use forage_core::traits::IReranker;
use forage_core::RerankError;

/// The ranking stage. Holds the optional rerank model and its deadline.
pub struct RankingStage {
    reranker: Option<Arc<dyn IReranker>>,
    timeout: Duration,
}

impl RankingStage {
    pub fn new(reranker: Option<Arc<dyn IReranker>>, timeout: Duration) -> Self {
        Self { reranker, timeout }
    }

    /// Rank the fused candidates and cap to `top_k`.
    ///
    /// Returns the ranked context and whether reranking was actually
    /// applied. Without a model (or on failure) the fused order is kept and
    /// `rerank_score` stays `None`.
    pub async fn rank(
        &self,
        query_text: &str,
        candidates: Vec<FusedCandidate>,
        top_k: usize,
    ) -> (Vec<ContextItem>, bool) {
        let Some(reranker) = &self.reranker else {
            return (pass_through(candidates, top_k), false);
        };
        if candidates.is_empty() {
            return (Vec::new(), false);
        }

        match self.score_pool(reranker.as_ref(), query_text, &candidates).await {
            Ok(scores) => {
                let mut ranked: Vec<(FusedCandidate, f64)> =
                    candidates.into_iter().zip(scores).collect();
                // Rerank score is authoritative; the sort is stable, so
                // exact ties keep their fused order.
                ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
                ranked.truncate(top_k);

                let items = ranked
                    .into_iter()
                    .map(|(c, score)| ContextItem {
                        doc_id: c.doc_id.clone(),
                        sources: c.sources(),
                        fused_score: c.score,
                        rerank_score: Some(score),
                        payload: c.payload,
                    })
                    .collect();
                (items, true)
            }
            Err(e) => {
                warn!(error = %e, "rerank unavailable; passing fused order through");
                (pass_through(candidates, top_k), false)
            }
        }
    }

    async fn score_pool(
        &self,
        reranker: &dyn IReranker,
        query_text: &str,
        candidates: &[FusedCandidate],
    ) -> Result<Vec<f64>, RerankError> {
        let passages: Vec<String> = candidates
            .iter()
            .map(|c| c.payload.text.clone())
            .collect();

        let scores = tokio::time::timeout(self.timeout, reranker.score(query_text, &passages))
            .await
            .map_err(|_| RerankError::Timeout {
                elapsed_ms: self.timeout.as_millis() as u64,
            })??;

        if scores.len() != passages.len() {
            return Err(RerankError::ScoreCountMismatch {
                expected: passages.len(),
                got: scores.len(),
            });
        }

        debug!(scored = scores.len(), "rerank batch complete");
        Ok(scores)
    }
}

/// Fused order pass-through: no rerank scores, order untouched.
fn pass_through(candidates: Vec<FusedCandidate>, top_k: usize) -> Vec<ContextItem> {
    candidates
        .into_iter()
        .take(top_k)
        .map(|c| ContextItem {
            doc_id: c.doc_id.clone(),
            sources: c.sources(),
            fused_score: c.score,
            rerank_score: None,
            payload: c.payload,
        })
        .collect()
}
