//! Sparse keyword adapter: term-frequency scoring with document-frequency
//! damping, a minimal stand-in for a real full-text index.

use std::collections::HashMap;

use async_trait::async_trait;

use forage_core::models::{BackendKind, BackendQuery, DocumentPayload, RankedItem};
use forage_core::traits::IRetriever;
use forage_core::BackendError;

use crate::to_ranked_items;

struct KeywordDoc {
    doc_id: String,
    namespace: String,
    payload: DocumentPayload,
    /// Term → occurrence count within the document.
    terms: HashMap<String, usize>,
}

/// In-memory inverted keyword index.
pub struct InMemoryKeywordIndex {
    docs: Vec<KeywordDoc>,
    /// Term → number of documents containing it.
    doc_freq: HashMap<String, usize>,
}

impl InMemoryKeywordIndex {
    pub fn new() -> Self {
        Self {
            docs: Vec::new(),
            doc_freq: HashMap::new(),
        }
    }

    pub fn insert(
        &mut self,
        doc_id: impl Into<String>,
        namespace: impl Into<String>,
        payload: DocumentPayload,
    ) {
        let mut terms: HashMap<String, usize> = HashMap::new();
        for token in tokenize(&payload.text) {
            *terms.entry(token).or_default() += 1;
        }
        for term in terms.keys() {
            *self.doc_freq.entry(term.clone()).or_default() += 1;
        }
        self.docs.push(KeywordDoc {
            doc_id: doc_id.into(),
            namespace: namespace.into(),
            payload,
            terms,
        });
    }

    fn idf(&self, term: &str) -> f64 {
        let df = self.doc_freq.get(term).copied().unwrap_or(0);
        if df == 0 {
            return 0.0;
        }
        (1.0 + self.docs.len() as f64 / df as f64).ln()
    }
}

impl Default for InMemoryKeywordIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IRetriever for InMemoryKeywordIndex {
    fn kind(&self) -> BackendKind {
        BackendKind::Keyword
    }

    async fn search(&self, query: &BackendQuery) -> Result<Vec<RankedItem>, BackendError> {
        let query_terms = tokenize(&query.text);

        let scored: Vec<(String, DocumentPayload, f64)> = self
            .docs
            .iter()
            .filter(|d| d.namespace == query.namespace)
            .filter_map(|d| {
                let score: f64 = query_terms
                    .iter()
                    .map(|t| d.terms.get(t).copied().unwrap_or(0) as f64 * self.idf(t))
                    .sum();
                (score > 0.0).then(|| (d.doc_id.clone(), d.payload.clone(), score))
            })
            .collect();

        Ok(to_ranked_items(scored, BackendKind::Keyword, query.limit))
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() > 1)
        .map(str::to_lowercase)
        .collect()
}
