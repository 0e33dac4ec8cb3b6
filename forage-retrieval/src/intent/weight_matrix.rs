//! Intent → backend weight matrix.
//!
//! Each intent has a fusion weight per backend. A weight of 1.0 is neutral;
//! >1.0 promotes, <1.0 demotes. Weights are static defaults; they apply only
//! above the confidence threshold (see `RuleClassifier`).

use std::collections::HashMap;

use forage_core::intent::QueryIntent;
use forage_core::models::{BackendKind, IntentClassification};

/// Weight matrix: intent → (backend → fusion weight).
pub struct WeightMatrix {
    weights: HashMap<QueryIntent, HashMap<BackendKind, f64>>,
}

impl WeightMatrix {
    /// Create with hardcoded default weights.
    pub fn default_weights() -> Self {
        let mut weights = HashMap::new();

        // Factual: specific facts live in chunks; vector + keyword carry it.
        weights.insert(
            QueryIntent::Factual,
            Self::build_map(&[
                (BackendKind::Vector, 1.0),
                (BackendKind::Keyword, 1.0),
                (BackendKind::GraphLocal, 0.4),
                (BackendKind::GraphGlobal, 0.2),
            ]),
        );

        // Procedural: step-by-step content is textual; graphs add little.
        weights.insert(
            QueryIntent::Procedural,
            Self::build_map(&[
                (BackendKind::Vector, 1.0),
                (BackendKind::Keyword, 0.8),
                (BackendKind::GraphLocal, 0.3),
                (BackendKind::GraphGlobal, 0.3),
            ]),
        );

        // Comparison: community summaries contrast entities well.
        weights.insert(
            QueryIntent::Comparison,
            Self::build_map(&[
                (BackendKind::Vector, 0.8),
                (BackendKind::Keyword, 0.6),
                (BackendKind::GraphLocal, 0.6),
                (BackendKind::GraphGlobal, 1.0),
            ]),
        );

        // Recommendation: breadth over precision; global context matters.
        weights.insert(
            QueryIntent::Recommendation,
            Self::build_map(&[
                (BackendKind::Vector, 0.9),
                (BackendKind::Keyword, 0.5),
                (BackendKind::GraphLocal, 0.5),
                (BackendKind::GraphGlobal, 1.0),
            ]),
        );

        // Navigation: the entity graph knows where things are.
        weights.insert(
            QueryIntent::Navigation,
            Self::build_map(&[
                (BackendKind::Vector, 0.5),
                (BackendKind::Keyword, 0.8),
                (BackendKind::GraphLocal, 1.2),
                (BackendKind::GraphGlobal, 0.2),
            ]),
        );

        Self { weights }
    }

    /// Weight vector for one intent. Unknown intents get the balanced set.
    pub fn weights_for(&self, intent: QueryIntent) -> HashMap<BackendKind, f64> {
        self.weights
            .get(&intent)
            .cloned()
            .unwrap_or_else(IntentClassification::balanced_weights)
    }

    fn build_map(entries: &[(BackendKind, f64)]) -> HashMap<BackendKind, f64> {
        entries.iter().copied().collect()
    }
}

impl Default for WeightMatrix {
    fn default() -> Self {
        Self::default_weights()
    }
}
