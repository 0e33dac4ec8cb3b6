//! RetrievalPipeline: orchestrates the full hybrid retrieval pipeline.
//!
//! query → intent classification → parallel fan-out → RRF fusion →
//! rerank → ranked context + diagnostics.
//!
//! One pipeline instance serves many concurrent queries; each invocation
//! owns its own data exclusively and nothing here holds shared mutable
//! state, so no locks are needed. Cancelling the returned future (e.g. a
//! caller-level deadline) aborts the in-flight backend tasks and yields no
//! partial results.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use forage_core::config::RetrievalConfig;
use forage_core::constants::MAX_QUERY_CHARS;
use forage_core::models::{
    BackendCallDiagnostics, BackendKind, BackendQuery, ContextItem, IntentClassification,
    PipelineDiagnostics, Query,
};
use forage_core::traits::{IClassifier, IReranker, IRetriever};
use forage_core::{RetrievalError, RetrieveResult};

use crate::coordinator;
use crate::degradation;
use crate::expansion;
use crate::fusion;
use crate::intent::RuleClassifier;
use crate::ranking::RankingStage;

/// The public pipeline entry point consumed by the answer-generation stage.
pub struct RetrievalPipeline {
    backends: HashMap<BackendKind, Arc<dyn IRetriever>>,
    classifier: Arc<dyn IClassifier>,
    ranking: RankingStage,
    config: RetrievalConfig,
}

impl RetrievalPipeline {
    /// Create a pipeline with the rule-based classifier and no reranker.
    /// Backends are registered with [`with_backend`](Self::with_backend).
    pub fn new(config: RetrievalConfig) -> Self {
        let classifier = Arc::new(RuleClassifier::from_config(&config));
        let ranking = RankingStage::new(None, config.rerank_timeout());
        Self {
            backends: HashMap::new(),
            classifier,
            ranking,
            config,
        }
    }

    /// Register a backend adapter for its `kind()` slot. Registering the
    /// same kind twice replaces the earlier adapter.
    pub fn with_backend(mut self, retriever: Arc<dyn IRetriever>) -> Self {
        self.backends.insert(retriever.kind(), retriever);
        self
    }

    /// Replace the intent classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn IClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Attach a rerank model.
    pub fn with_reranker(mut self, reranker: Arc<dyn IReranker>) -> Self {
        self.ranking = RankingStage::new(Some(reranker), self.config.rerank_timeout());
        self
    }

    /// Run the full pipeline for one query.
    ///
    /// Returns the ranked context together with per-call diagnostics, or one
    /// of the typed errors from the taxonomy — never a raw transport error
    /// from an individual store.
    pub async fn retrieve_context(
        &self,
        query: &Query,
    ) -> RetrieveResult<(Vec<ContextItem>, PipelineDiagnostics)> {
        let started = Instant::now();
        let started_at = Utc::now();

        validate(query)?;

        // Step 1: Classify intent, under its fixed budget. Overrun or a
        // misbehaving classifier falls back to the balanced classification;
        // classification failure is never fatal to retrieval.
        let classification = match tokio::time::timeout(
            self.config.classifier_budget(),
            self.classifier.classify(&query.text),
        )
        .await
        {
            Ok(c) => c,
            Err(_) => {
                warn!(query_id = %query.id, "classifier over budget; using balanced weights");
                IntentClassification::balanced(self.config.candidate_pool)
            }
        };
        debug!(
            query_id = %query.id,
            intent = %classification.category,
            confidence = classification.confidence,
            "classified intent"
        );

        // Step 2: Optionally expand the search text for recall. Graph
        // lookups keep the raw text; expansion targets the term-matching
        // backends.
        let search_text = if self.config.query_expansion {
            expansion::expand(&query.text)
        } else {
            query.text.clone()
        };

        // Step 3: Fan out to every enabled backend concurrently.
        let queries = self.backend_queries(query, &classification, &search_text);
        if queries.is_empty() {
            return Err(RetrievalError::InvalidConfig {
                reason: "no retrieval backends enabled for this query".into(),
            });
        }
        let results = coordinator::dispatch(&self.backends, queries).await;

        // Step 4: Degradation policy — partial failure proceeds flagged,
        // total failure is a hard error.
        let degraded = degradation::ensure_viable(&results)?;

        // Step 5: Fuse the surviving ranked lists.
        let candidates = fusion::fuse(
            &results,
            &classification.backend_weights,
            self.config.rrf_k,
            classification.candidate_pool_size,
        );
        if candidates.is_empty() {
            // All backends answered but none had anything: an explicit
            // signal, not a silent empty success.
            return Err(RetrievalError::NoResults);
        }
        debug!(
            query_id = %query.id,
            candidates = candidates.len(),
            "fusion complete"
        );

        // Step 6: Rerank (or pass the fused order through).
        let top_k = query.top_k.unwrap_or(self.config.rerank_top_k);
        let (items, rerank_applied) =
            self.ranking.rank(&query.text, candidates, top_k).await;

        let diagnostics = PipelineDiagnostics {
            query_id: query.id,
            started_at,
            intent: classification.category,
            intent_confidence: classification.confidence,
            backends: results
                .iter()
                .map(|r| BackendCallDiagnostics {
                    backend: r.backend,
                    status: r.status,
                    latency_ms: r.latency.as_millis() as u64,
                    result_count: r.items.len(),
                })
                .collect(),
            degraded,
            rerank_applied,
            total_latency_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            query_id = %query.id,
            results = items.len(),
            degraded,
            rerank_applied,
            total_latency_ms = diagnostics.total_latency_ms,
            "retrieval complete"
        );

        Ok((items, diagnostics))
    }

    /// Build one `BackendQuery` per backend permitted by config flags, the
    /// query's mode override, and adapter registration.
    fn backend_queries(
        &self,
        query: &Query,
        classification: &IntentClassification,
        search_text: &str,
    ) -> Vec<BackendQuery> {
        self.config
            .enabled_backends()
            .into_iter()
            .filter(|&kind| query.mode().allows(kind))
            .filter(|kind| self.backends.contains_key(kind))
            .map(|kind| {
                let text = match kind {
                    BackendKind::Vector | BackendKind::Keyword => search_text.to_string(),
                    BackendKind::GraphLocal | BackendKind::GraphGlobal => query.text.clone(),
                };
                BackendQuery {
                    backend: kind,
                    text,
                    namespace: query.namespace.clone(),
                    limit: classification.candidate_pool_size,
                    timeout: self.config.backend(kind).timeout(),
                }
            })
            .collect()
    }
}

fn validate(query: &Query) -> RetrieveResult<()> {
    if query.text.trim().is_empty() {
        return Err(RetrievalError::invalid_query("empty query text"));
    }
    if query.text.chars().count() > MAX_QUERY_CHARS {
        return Err(RetrievalError::invalid_query(format!(
            "query exceeds {MAX_QUERY_CHARS} characters"
        )));
    }
    Ok(())
}
