//! Reciprocal Rank Fusion: score = Σ weight[backend] · 1/(rank + k)
//!
//! Merges the per-backend ranked lists into one ranking using ranks, never
//! backend-native scores, so no score normalization across heterogeneous
//! retrieval methods is needed. Backends that did not return `Ok` contribute
//! nothing; the surviving weights are NOT renormalized — absolute
//! contribution shrinking when a backend is missing is the intended
//! degradation behavior, and config-disabled backends are treated the same
//! way.

use std::collections::HashMap;

use forage_core::models::{
    BackendContribution, BackendKind, BackendResult, DocumentPayload, FusedCandidate,
};

/// Fuse per-backend ranked lists into one ranked candidate list.
///
/// Deterministic given identical inputs: equal fused scores are broken by
/// contributing-backend count descending, then document id ascending. The
/// output is capped to `pool_size` to bound reranking cost.
pub fn fuse(
    results: &[BackendResult],
    weights: &HashMap<BackendKind, f64>,
    k: u32,
    pool_size: usize,
) -> Vec<FusedCandidate> {
    struct Acc {
        score: f64,
        contributions: Vec<BackendContribution>,
        payload: DocumentPayload,
    }

    let mut by_doc: HashMap<String, Acc> = HashMap::new();

    // Input order is the coordinator's fixed backend order, so per-document
    // float accumulation order is deterministic too.
    for result in results.iter().filter(|r| r.contributes()) {
        let weight = weights.get(&result.backend).copied().unwrap_or(0.0);
        for item in &result.items {
            let rrf = weight * 1.0 / (item.rank as f64 + k as f64);
            by_doc
                .entry(item.doc_id.clone())
                .and_modify(|acc| {
                    acc.score += rrf;
                    acc.contributions.push(BackendContribution {
                        backend: result.backend,
                        rank: item.rank,
                    });
                })
                .or_insert_with(|| Acc {
                    score: rrf,
                    contributions: vec![BackendContribution {
                        backend: result.backend,
                        rank: item.rank,
                    }],
                    payload: item.payload.clone(),
                });
        }
    }

    let mut candidates: Vec<FusedCandidate> = by_doc
        .into_iter()
        .map(|(doc_id, acc)| FusedCandidate {
            doc_id,
            score: acc.score,
            contributions: acc.contributions,
            payload: acc.payload,
        })
        .collect();

    // Score descending, then corroboration descending, then doc id
    // ascending — a total order, so the output is reproducible.
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.contributions.len().cmp(&a.contributions.len()))
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });

    candidates.truncate(pool_size);
    candidates
}
