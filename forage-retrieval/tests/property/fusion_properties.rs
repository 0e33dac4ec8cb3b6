//! Property tests for the RRF fusion engine: corroboration monotonicity,
//! determinism, and pool capping over synthetic backend result sets.

use std::collections::HashMap;

use proptest::prelude::*;

use forage_core::models::{BackendKind, BackendResult, IntentClassification};
use forage_retrieval::fusion;
use test_fixtures::ok_result;

/// Build a backend result from raw indices: dedup preserving order, ids
/// drawn from a small shared universe so overlap across backends is common.
fn result_from_indices(backend: BackendKind, indices: &[u8]) -> BackendResult {
    let mut seen: Vec<String> = Vec::new();
    for &i in indices {
        let id = format!("doc{:02}", i % 20);
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    let refs: Vec<&str> = seen.iter().map(String::as_str).collect();
    ok_result(backend, &refs)
}

fn arb_results() -> impl Strategy<Value = Vec<BackendResult>> {
    (
        prop::collection::vec(any::<u8>(), 0..15),
        prop::collection::vec(any::<u8>(), 0..15),
        prop::collection::vec(any::<u8>(), 0..15),
        prop::collection::vec(any::<u8>(), 0..15),
    )
        .prop_map(|(v, k, gl, gg)| {
            vec![
                result_from_indices(BackendKind::Vector, &v),
                result_from_indices(BackendKind::Keyword, &k),
                result_from_indices(BackendKind::GraphLocal, &gl),
                result_from_indices(BackendKind::GraphGlobal, &gg),
            ]
        })
}

/// A ranked list with `rank_offset` padding documents followed by `doc`.
fn padded_list(rank_offset: usize, doc: &str) -> Vec<String> {
    let mut list: Vec<String> = (0..rank_offset).map(|i| format!("pad{i:02}")).collect();
    list.push(doc.to_string());
    list
}

proptest! {
    /// Corroboration monotonicity: a document at rank r in backend A alone
    /// scores strictly less than the same-ranked document would with a
    /// second backend also listing it at rank r, for any positive weight
    /// on the second backend.
    #[test]
    fn appearing_in_a_second_backend_strictly_raises_the_score(
        rank_offset in 0usize..30,
        weight_a in 0.1f64..2.0,
        weight_b in 0.1f64..2.0,
        k in 1u32..120,
    ) {
        let list = padded_list(rank_offset, "target");
        let refs: Vec<&str> = list.iter().map(String::as_str).collect();

        let mut weights = HashMap::new();
        weights.insert(BackendKind::Vector, weight_a);
        weights.insert(BackendKind::Keyword, weight_b);

        let solo_results = vec![ok_result(BackendKind::Vector, &refs)];
        let duo_results = vec![
            ok_result(BackendKind::Vector, &refs),
            ok_result(BackendKind::Keyword, &refs),
        ];

        let score_of = |results: &[BackendResult]| {
            fusion::fuse(results, &weights, k, 200)
                .into_iter()
                .find(|c| c.doc_id == "target")
                .map(|c| c.score)
                .unwrap()
        };

        let solo = score_of(&solo_results);
        let duo = score_of(&duo_results);

        let r = rank_offset as f64 + 1.0;
        prop_assert!((solo - weight_a / (r + k as f64)).abs() < 1e-12);
        prop_assert!((duo - (weight_a + weight_b) / (r + k as f64)).abs() < 1e-12);
        prop_assert!(duo > solo);
    }

    /// Same fusion round: doc in one backend at rank r versus doc in two
    /// backends at rank r — the corroborated doc strictly wins under equal
    /// weights.
    #[test]
    fn same_rank_two_backends_beats_one(
        rank_offset in 0usize..30,
        k in 1u32..120,
    ) {
        let solo_list = padded_list(rank_offset, "solo");
        let duo_list = padded_list(rank_offset, "duo");
        let solo_refs: Vec<&str> = solo_list.iter().map(String::as_str).collect();
        let duo_refs: Vec<&str> = duo_list.iter().map(String::as_str).collect();

        let results = vec![
            ok_result(BackendKind::Vector, &solo_refs),
            ok_result(BackendKind::Keyword, &duo_refs),
            ok_result(BackendKind::GraphLocal, &duo_refs),
        ];

        let fused = fusion::fuse(
            &results,
            &IntentClassification::balanced_weights(),
            k,
            200,
        );
        let score = |id: &str| fused.iter().find(|c| c.doc_id == id).map(|c| c.score);

        prop_assert!(score("duo").unwrap() > score("solo").unwrap());
    }

    /// Fusing identical inputs twice yields identical ordered output,
    /// scores included.
    #[test]
    fn fusion_is_deterministic(results in arb_results(), k in 1u32..120) {
        let weights = IntentClassification::balanced_weights();
        let a = fusion::fuse(&results, &weights, k, 200);
        let b = fusion::fuse(&results, &weights, k, 200);

        let flat = |v: &[forage_core::models::FusedCandidate]| -> Vec<(String, f64, usize)> {
            v.iter()
                .map(|c| (c.doc_id.clone(), c.score, c.contributions.len()))
                .collect()
        };
        prop_assert_eq!(flat(&a), flat(&b));
    }

    /// Output never exceeds the pool cap and scores are monotonically
    /// non-increasing.
    #[test]
    fn fused_output_is_capped_and_sorted(
        results in arb_results(),
        pool in 1usize..30,
    ) {
        let fused = fusion::fuse(
            &results,
            &IntentClassification::balanced_weights(),
            60,
            pool,
        );
        prop_assert!(fused.len() <= pool);
        for pair in fused.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
