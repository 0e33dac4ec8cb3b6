//! Graph adapters over a shared entity graph.
//!
//! `GraphLocalIndex` answers from entities named in the query plus their
//! one-hop neighborhood. `GraphGlobalIndex` answers from precomputed
//! community summaries keyed by topic keywords. Entity/relationship
//! extraction and community detection happen at ingestion time, outside
//! this crate.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use petgraph::graph::{NodeIndex, UnGraph};

use forage_core::models::{BackendKind, BackendQuery, DocumentPayload, RankedItem};
use forage_core::traits::IRetriever;
use forage_core::BackendError;

use crate::to_ranked_items;

/// Direct entity mentions outscore neighborhood hits.
const DIRECT_HIT_SCORE: f64 = 1.0;
const NEIGHBOR_HIT_SCORE: f64 = 0.5;

struct EntityDoc {
    doc_id: String,
    namespace: String,
    payload: DocumentPayload,
}

/// Undirected entity graph with documents attached to entities.
pub struct EntityGraph {
    graph: UnGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
    docs: HashMap<String, Vec<EntityDoc>>,
}

impl EntityGraph {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            nodes: HashMap::new(),
            docs: HashMap::new(),
        }
    }

    /// Add an entity node; idempotent. Entity names are matched
    /// case-insensitively against query text.
    pub fn add_entity(&mut self, name: impl Into<String>) {
        let name = name.into().to_lowercase();
        if !self.nodes.contains_key(&name) {
            let idx = self.graph.add_node(name.clone());
            self.nodes.insert(name, idx);
        }
    }

    /// Relate two entities. Unknown entities are added first.
    pub fn relate(&mut self, a: &str, b: &str) {
        self.add_entity(a);
        self.add_entity(b);
        let (ia, ib) = (self.nodes[&a.to_lowercase()], self.nodes[&b.to_lowercase()]);
        if self.graph.find_edge(ia, ib).is_none() {
            self.graph.add_edge(ia, ib, ());
        }
    }

    /// Attach a document chunk to an entity.
    pub fn attach_doc(
        &mut self,
        entity: &str,
        doc_id: impl Into<String>,
        namespace: impl Into<String>,
        payload: DocumentPayload,
    ) {
        self.add_entity(entity);
        self.docs
            .entry(entity.to_lowercase())
            .or_default()
            .push(EntityDoc {
                doc_id: doc_id.into(),
                namespace: namespace.into(),
                payload,
            });
    }

    /// Entities whose name occurs in the query text.
    fn mentioned_entities(&self, query_text: &str) -> Vec<&str> {
        let lower = query_text.to_lowercase();
        self.nodes
            .keys()
            .filter(|name| lower.contains(name.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// One-hop neighbor entity names.
    fn neighbors(&self, entity: &str) -> Vec<&str> {
        let Some(&idx) = self.nodes.get(entity) else {
            return Vec::new();
        };
        self.graph
            .neighbors(idx)
            .map(|n| self.graph[n].as_str())
            .collect()
    }
}

impl Default for EntityGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Local graph lookup: documents attached to mentioned entities and their
/// immediate neighborhood.
pub struct GraphLocalIndex {
    graph: Arc<EntityGraph>,
}

impl GraphLocalIndex {
    pub fn new(graph: Arc<EntityGraph>) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl IRetriever for GraphLocalIndex {
    fn kind(&self) -> BackendKind {
        BackendKind::GraphLocal
    }

    async fn search(&self, query: &BackendQuery) -> Result<Vec<RankedItem>, BackendError> {
        // doc_id → (payload, best score seen).
        let mut hits: HashMap<String, (DocumentPayload, f64)> = HashMap::new();
        let mut record = |docs: &[EntityDoc], score: f64| {
            for doc in docs.iter().filter(|d| d.namespace == query.namespace) {
                hits.entry(doc.doc_id.clone())
                    .and_modify(|(_, s)| *s = s.max(score))
                    .or_insert((doc.payload.clone(), score));
            }
        };

        for entity in self.graph.mentioned_entities(&query.text) {
            if let Some(docs) = self.graph.docs.get(entity) {
                record(docs, DIRECT_HIT_SCORE);
            }
            for neighbor in self.graph.neighbors(entity) {
                if let Some(docs) = self.graph.docs.get(neighbor) {
                    record(docs, NEIGHBOR_HIT_SCORE);
                }
            }
        }

        let scored = hits
            .into_iter()
            .map(|(doc_id, (payload, score))| (doc_id, payload, score))
            .collect();
        Ok(to_ranked_items(scored, BackendKind::GraphLocal, query.limit))
    }
}

/// One precomputed community summary.
pub struct Community {
    pub id: String,
    pub namespace: String,
    /// Topic keywords the community is about, lowercase.
    pub keywords: Vec<String>,
    /// The summary text returned as the hit payload.
    pub summary: DocumentPayload,
}

/// Global graph lookup: community summaries matched by keyword overlap
/// with the query.
pub struct GraphGlobalIndex {
    communities: Vec<Community>,
}

impl GraphGlobalIndex {
    pub fn new(communities: Vec<Community>) -> Self {
        Self { communities }
    }
}

#[async_trait]
impl IRetriever for GraphGlobalIndex {
    fn kind(&self) -> BackendKind {
        BackendKind::GraphGlobal
    }

    async fn search(&self, query: &BackendQuery) -> Result<Vec<RankedItem>, BackendError> {
        let lower = query.text.to_lowercase();

        let scored: Vec<(String, DocumentPayload, f64)> = self
            .communities
            .iter()
            .filter(|c| c.namespace == query.namespace && !c.keywords.is_empty())
            .filter_map(|c| {
                let overlap = c.keywords.iter().filter(|k| lower.contains(k.as_str())).count();
                (overlap > 0).then(|| {
                    let score = overlap as f64 / c.keywords.len() as f64;
                    (c.id.clone(), c.summary.clone(), score)
                })
            })
            .collect();

        Ok(to_ranked_items(scored, BackendKind::GraphGlobal, query.limit))
    }
}
