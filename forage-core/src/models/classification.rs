use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::backend::BackendKind;
use crate::intent::QueryIntent;

/// Produced once per query by the intent classifier. Drives fusion weights
/// and per-backend candidate counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentClassification {
    pub category: QueryIntent,
    /// Classifier confidence in [0.0, 1.0].
    pub confidence: f64,
    /// Non-negative fusion weight per backend. Missing entries mean 0.
    pub backend_weights: HashMap<BackendKind, f64>,
    /// How many candidates each backend is asked for.
    pub candidate_pool_size: usize,
}

impl IntentClassification {
    /// The balanced fallback: every backend weighted 1.0. Used when the
    /// classifier is unavailable, over budget, or below the confidence
    /// threshold — low-confidence skew is worse than no skew.
    pub fn balanced(candidate_pool_size: usize) -> Self {
        Self {
            category: QueryIntent::Factual,
            confidence: 0.0,
            backend_weights: Self::balanced_weights(),
            candidate_pool_size,
        }
    }

    /// Uniform weight map over all backends.
    pub fn balanced_weights() -> HashMap<BackendKind, f64> {
        BackendKind::ALL.iter().map(|&b| (b, 1.0)).collect()
    }

    /// Weight for one backend; 0.0 if absent from the map.
    pub fn weight(&self, backend: BackendKind) -> f64 {
        self.backend_weights.get(&backend).copied().unwrap_or(0.0)
    }
}
