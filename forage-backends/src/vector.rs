//! Dense-vector adapter: cosine similarity over stored embeddings.
//!
//! Embedding generation is an external collaborator; the index takes an
//! embedder function for query text and precomputed embeddings for
//! documents.

use async_trait::async_trait;

use forage_core::models::{BackendKind, BackendQuery, DocumentPayload, RankedItem};
use forage_core::traits::IRetriever;
use forage_core::BackendError;

use crate::to_ranked_items;

type Embedder = Box<dyn Fn(&str) -> Vec<f32> + Send + Sync>;

struct VectorDoc {
    doc_id: String,
    namespace: String,
    payload: DocumentPayload,
    embedding: Vec<f32>,
}

/// Flat in-memory cosine index.
pub struct InMemoryVectorIndex {
    embedder: Embedder,
    docs: Vec<VectorDoc>,
}

impl InMemoryVectorIndex {
    pub fn new(embedder: impl Fn(&str) -> Vec<f32> + Send + Sync + 'static) -> Self {
        Self {
            embedder: Box::new(embedder),
            docs: Vec::new(),
        }
    }

    pub fn insert(
        &mut self,
        doc_id: impl Into<String>,
        namespace: impl Into<String>,
        payload: DocumentPayload,
        embedding: Vec<f32>,
    ) {
        self.docs.push(VectorDoc {
            doc_id: doc_id.into(),
            namespace: namespace.into(),
            payload,
            embedding,
        });
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[async_trait]
impl IRetriever for InMemoryVectorIndex {
    fn kind(&self) -> BackendKind {
        BackendKind::Vector
    }

    async fn search(&self, query: &BackendQuery) -> Result<Vec<RankedItem>, BackendError> {
        let query_embedding = (self.embedder)(&query.text);

        let scored: Vec<(String, DocumentPayload, f64)> = self
            .docs
            .iter()
            .filter(|d| d.namespace == query.namespace)
            .map(|d| {
                let score = cosine(&query_embedding, &d.embedding);
                (d.doc_id.clone(), d.payload.clone(), score)
            })
            .filter(|(_, _, score)| *score > 0.0)
            .collect();

        Ok(to_ranked_items(scored, BackendKind::Vector, query.limit))
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        dot += x as f64 * y as f64;
        norm_a += (x as f64).powi(2);
        norm_b += (y as f64).powi(2);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
