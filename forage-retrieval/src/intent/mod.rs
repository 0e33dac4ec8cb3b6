//! Intent classification: rules → category + confidence → fusion weights.
//!
//! The rule-based [`RuleClassifier`] is the default implementation of the
//! `IClassifier` contract. Embedding-similarity or trained-model classifiers
//! can replace it behind the same trait.

pub mod rules;
pub mod weight_matrix;

use std::collections::HashMap;

use async_trait::async_trait;

use forage_core::config::RetrievalConfig;
use forage_core::intent::QueryIntent;
use forage_core::models::IntentClassification;
use forage_core::traits::IClassifier;

use self::rules::RuleSet;
use self::weight_matrix::WeightMatrix;

/// Rule-based intent classifier.
///
/// Intent-specific weights are applied only when confidence reaches the
/// configured threshold; below it the balanced set is used, because
/// low-confidence skew is worse than no skew.
pub struct RuleClassifier {
    rules: RuleSet,
    matrix: WeightMatrix,
    confidence_threshold: f64,
    /// Candidate pool per intent, resolved from config at construction.
    pools: HashMap<QueryIntent, usize>,
    /// Pool used by the balanced fallback.
    default_pool: usize,
}

impl RuleClassifier {
    pub fn from_config(config: &RetrievalConfig) -> Self {
        let pools = QueryIntent::ALL
            .iter()
            .map(|&i| (i, config.candidate_pool_for(i)))
            .collect();

        Self {
            rules: RuleSet::default_rules(),
            matrix: WeightMatrix::default_weights(),
            confidence_threshold: config.confidence_threshold,
            pools,
            default_pool: config.candidate_pool,
        }
    }

    fn pool_for(&self, intent: QueryIntent) -> usize {
        self.pools.get(&intent).copied().unwrap_or(self.default_pool)
    }
}

#[async_trait]
impl IClassifier for RuleClassifier {
    async fn classify(&self, query_text: &str) -> IntentClassification {
        let (category, confidence) = self.rules.detect(query_text);

        let backend_weights = if confidence >= self.confidence_threshold {
            self.matrix.weights_for(category)
        } else {
            IntentClassification::balanced_weights()
        };

        IntentClassification {
            category,
            confidence,
            backend_weights,
            candidate_pool_size: self.pool_for(category),
        }
    }
}
