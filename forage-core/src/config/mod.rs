//! Retrieval pipeline configuration.
//!
//! Loaded once per process (TOML or defaults) and passed into each pipeline
//! invocation as an immutable snapshot — never a package-level mutable
//! singleton, so concurrent queries stay isolated.

pub mod defaults;

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{RetrievalError, RetrieveResult};
use crate::models::BackendKind;

/// Per-backend settings: rollout flag plus its own call deadline. Backends
/// do not share one budget — a slow graph lookup must not starve the vector
/// lookup of time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub enabled: bool,
    pub timeout_ms: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: defaults::DEFAULT_BACKEND_TIMEOUT_MS,
        }
    }
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Full retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub vector: BackendSettings,
    pub keyword: BackendSettings,
    pub graph_local: BackendSettings,
    pub graph_global: BackendSettings,
    /// RRF smoothing constant.
    pub rrf_k: u32,
    /// Candidate pool size when no per-intent override applies.
    pub candidate_pool: usize,
    /// Per-intent candidate pool overrides. Key is the intent name
    /// (e.g. "navigation"); unknown keys are ignored.
    pub candidate_pool_overrides: HashMap<String, usize>,
    /// Classifier confidence required before intent-specific weights
    /// replace the balanced set.
    pub confidence_threshold: f64,
    /// Final result cap after reranking.
    pub rerank_top_k: usize,
    pub rerank_timeout_ms: u64,
    pub classifier_budget_ms: u64,
    /// Synonym expansion of the search text for recall.
    pub query_expansion: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            vector: BackendSettings::default(),
            keyword: BackendSettings::default(),
            graph_local: BackendSettings::default(),
            graph_global: BackendSettings::default(),
            rrf_k: defaults::DEFAULT_RRF_K,
            candidate_pool: defaults::DEFAULT_CANDIDATE_POOL,
            candidate_pool_overrides: HashMap::new(),
            confidence_threshold: defaults::DEFAULT_CONFIDENCE_THRESHOLD,
            rerank_top_k: defaults::DEFAULT_RERANK_TOP_K,
            rerank_timeout_ms: defaults::DEFAULT_RERANK_TIMEOUT_MS,
            classifier_budget_ms: defaults::DEFAULT_CLASSIFIER_BUDGET_MS,
            query_expansion: false,
        }
    }
}

impl RetrievalConfig {
    /// Parse from a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> RetrieveResult<Self> {
        toml::from_str(s).map_err(|e| RetrievalError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// Settings for one backend kind.
    pub fn backend(&self, kind: BackendKind) -> &BackendSettings {
        match kind {
            BackendKind::Vector => &self.vector,
            BackendKind::Keyword => &self.keyword,
            BackendKind::GraphLocal => &self.graph_local,
            BackendKind::GraphGlobal => &self.graph_global,
        }
    }

    /// Backend kinds enabled by configuration, in fixed order.
    pub fn enabled_backends(&self) -> Vec<BackendKind> {
        BackendKind::ALL
            .into_iter()
            .filter(|&k| self.backend(k).enabled)
            .collect()
    }

    /// Candidate pool for one intent, honoring overrides and the hard cap.
    pub fn candidate_pool_for(&self, intent: crate::intent::QueryIntent) -> usize {
        self.candidate_pool_overrides
            .get(intent.as_str())
            .copied()
            .unwrap_or(self.candidate_pool)
            .min(crate::constants::MAX_CANDIDATE_POOL)
    }

    pub fn rerank_timeout(&self) -> Duration {
        Duration::from_millis(self.rerank_timeout_ms)
    }

    pub fn classifier_budget(&self) -> Duration {
        Duration::from_millis(self.classifier_budget_ms)
    }
}
