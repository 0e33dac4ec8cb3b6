//! Shared test fixtures: builders for backend results and scripted
//! implementations of the retrieval contracts.
//!
//! `ScriptedRetriever` and `ScriptedReranker` let tests dictate latency and
//! outcome per backend, which is how the latency-bound, partial-failure,
//! and rerank-fallback scenarios are driven.

use std::time::Duration;

use async_trait::async_trait;

use forage_core::models::{
    BackendKind, BackendQuery, BackendResult, BackendStatus, DocumentPayload, RankedItem,
};
use forage_core::traits::{IReranker, IRetriever};
use forage_core::{BackendError, RerankError};

/// Build a ranked item with a synthetic payload derived from the doc id.
pub fn item(doc_id: &str, backend: BackendKind, rank: usize) -> RankedItem {
    RankedItem {
        doc_id: doc_id.to_string(),
        backend,
        rank,
        native_score: 1.0 / rank as f64,
        payload: DocumentPayload::new(format!("content of {doc_id}")),
    }
}

/// Build an `Ok` backend result from an ordered list of doc ids.
pub fn ok_result(backend: BackendKind, doc_ids: &[&str]) -> BackendResult {
    let items = doc_ids
        .iter()
        .enumerate()
        .map(|(i, id)| item(id, backend, i + 1))
        .collect();
    BackendResult {
        backend,
        status: BackendStatus::Ok,
        items,
        latency: Duration::from_millis(5),
    }
}

/// Build a failed or empty backend result.
pub fn status_result(backend: BackendKind, status: BackendStatus) -> BackendResult {
    BackendResult {
        backend,
        status,
        items: Vec::new(),
        latency: Duration::from_millis(5),
    }
}

/// What a scripted backend does when called.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    /// Return these doc ids as ranks 1..=n (capped at the query limit).
    Hits(Vec<String>),
    /// Return zero hits.
    Empty,
    /// Fail with `BackendError::Unavailable`.
    Fail(String),
}

/// An `IRetriever` that sleeps for a fixed delay, then produces its
/// scripted outcome.
pub struct ScriptedRetriever {
    kind: BackendKind,
    delay: Duration,
    outcome: ScriptedOutcome,
}

impl ScriptedRetriever {
    pub fn new(kind: BackendKind, delay: Duration, outcome: ScriptedOutcome) -> Self {
        Self {
            kind,
            delay,
            outcome,
        }
    }

    /// A fast backend returning the given doc ids.
    pub fn hits(kind: BackendKind, doc_ids: &[&str]) -> Self {
        Self::new(
            kind,
            Duration::ZERO,
            ScriptedOutcome::Hits(doc_ids.iter().map(|s| s.to_string()).collect()),
        )
    }

    /// A fast backend that always fails.
    pub fn failing(kind: BackendKind) -> Self {
        Self::new(
            kind,
            Duration::ZERO,
            ScriptedOutcome::Fail("scripted failure".into()),
        )
    }

    /// A fast backend with zero hits.
    pub fn empty(kind: BackendKind) -> Self {
        Self::new(kind, Duration::ZERO, ScriptedOutcome::Empty)
    }
}

#[async_trait]
impl IRetriever for ScriptedRetriever {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn search(&self, query: &BackendQuery) -> Result<Vec<RankedItem>, BackendError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.outcome {
            ScriptedOutcome::Hits(ids) => Ok(ids
                .iter()
                .take(query.limit)
                .enumerate()
                .map(|(i, id)| item(id, self.kind, i + 1))
                .collect()),
            ScriptedOutcome::Empty => Ok(Vec::new()),
            ScriptedOutcome::Fail(reason) => Err(BackendError::unavailable(reason.clone())),
        }
    }
}

/// An `IReranker` that sleeps for a fixed delay, then either fails or
/// scores passages by position from a fixed list (cycled if shorter than
/// the batch).
pub struct ScriptedReranker {
    scores: Option<Vec<f64>>,
    delay: Duration,
    short_by: usize,
}

impl ScriptedReranker {
    /// Scores passage `i` with `scores[i % scores.len()]`.
    pub fn with_scores(scores: Vec<f64>) -> Self {
        Self {
            scores: Some(scores),
            delay: Duration::ZERO,
            short_by: 0,
        }
    }

    /// Always returns `RerankError::Unavailable`.
    pub fn failing() -> Self {
        Self {
            scores: None,
            delay: Duration::ZERO,
            short_by: 0,
        }
    }

    /// Scores every passage 1.0, but only after sleeping for `delay`.
    pub fn slow(delay: Duration) -> Self {
        Self {
            scores: Some(vec![1.0]),
            delay,
            short_by: 0,
        }
    }

    /// Returns `count` fewer scores than passages, simulating a model
    /// that mangles the batch.
    pub fn short_by(count: usize) -> Self {
        Self {
            scores: Some(vec![1.0]),
            delay: Duration::ZERO,
            short_by: count,
        }
    }
}

#[async_trait]
impl IReranker for ScriptedReranker {
    async fn score(&self, _query: &str, passages: &[String]) -> Result<Vec<f64>, RerankError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.scores {
            Some(scores) => Ok((0..passages.len().saturating_sub(self.short_by))
                .map(|i| scores[i % scores.len()])
                .collect()),
            None => Err(RerankError::unavailable("scripted failure")),
        }
    }
}
