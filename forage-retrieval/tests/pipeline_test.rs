//! End-to-end pipeline scenarios: parallelism, degradation, rerank
//! fallback, and the error taxonomy at the caller boundary.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use forage_core::config::RetrievalConfig;
use forage_core::models::{
    BackendKind, BackendStatus, ContextItem, IntentClassification, Query, RetrievalMode,
};
use forage_core::traits::IClassifier;
use forage_core::RetrievalError;
use forage_retrieval::RetrievalPipeline;
use test_fixtures::{ScriptedOutcome, ScriptedRetriever, ScriptedReranker};

fn full_pipeline(config: RetrievalConfig) -> RetrievalPipeline {
    RetrievalPipeline::new(config)
        .with_backend(Arc::new(ScriptedRetriever::hits(
            BackendKind::Vector,
            &["doc1", "doc2", "doc3"],
        )))
        .with_backend(Arc::new(ScriptedRetriever::hits(
            BackendKind::Keyword,
            &["doc3", "doc1", "doc4"],
        )))
        .with_backend(Arc::new(ScriptedRetriever::hits(
            BackendKind::GraphLocal,
            &["doc5"],
        )))
        .with_backend(Arc::new(ScriptedRetriever::empty(BackendKind::GraphGlobal)))
}

#[tokio::test]
async fn happy_path_returns_ranked_context_and_diagnostics() {
    let pipeline = full_pipeline(RetrievalConfig::default());
    let query = Query::new("What is BGE-M3?", "default");

    let (items, diagnostics) = pipeline.retrieve_context(&query).await.unwrap();

    assert!(!items.is_empty());
    // doc1 (vector rank 1, keyword rank 2) tops doc3 (vector rank 3,
    // keyword rank 1) under equal-sum RRF; both outrank single-backend hits.
    assert_eq!(items[0].doc_id, "doc1");
    assert_eq!(items[1].doc_id, "doc3");
    assert_eq!(items[0].sources.len(), 2);

    assert!(!diagnostics.degraded);
    assert!(!diagnostics.rerank_applied);
    assert_eq!(diagnostics.backends.len(), 4);
    let graph_global = diagnostics
        .backends
        .iter()
        .find(|b| b.backend == BackendKind::GraphGlobal)
        .unwrap();
    // Zero hits from a backend is Empty, not a failure.
    assert_eq!(graph_global.status, BackendStatus::Empty);
}

#[tokio::test(start_paused = true)]
async fn backend_calls_run_in_parallel_not_sequentially() {
    // Vector sleeps 500ms; the other three answer in 10ms; per-backend
    // timeout is 1000ms. Total latency must track the slowest backend,
    // not the 530ms sum.
    let slow = ScriptedRetriever::new(
        BackendKind::Vector,
        Duration::from_millis(500),
        ScriptedOutcome::Hits(vec!["slow_doc".into()]),
    );
    let fast = |kind, doc: &str| {
        ScriptedRetriever::new(
            kind,
            Duration::from_millis(10),
            ScriptedOutcome::Hits(vec![doc.to_string()]),
        )
    };

    let pipeline = RetrievalPipeline::new(RetrievalConfig::default())
        .with_backend(Arc::new(slow))
        .with_backend(Arc::new(fast(BackendKind::Keyword, "k")))
        .with_backend(Arc::new(fast(BackendKind::GraphLocal, "gl")))
        .with_backend(Arc::new(fast(BackendKind::GraphGlobal, "gg")));

    let started = tokio::time::Instant::now();
    let (items, diagnostics) = pipeline
        .retrieve_context(&Query::new("parallel check", "default"))
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed >= Duration::from_millis(500));
    assert!(
        elapsed < Duration::from_millis(530),
        "coordinator ran sequentially: {elapsed:?}"
    );
    assert_eq!(items.len(), 4);
    assert!(!diagnostics.degraded);
}

#[tokio::test(start_paused = true)]
async fn slow_backend_times_out_without_starving_siblings() {
    let mut config = RetrievalConfig::default();
    config.graph_local.timeout_ms = 50;

    let stuck = ScriptedRetriever::new(
        BackendKind::GraphLocal,
        Duration::from_millis(200),
        ScriptedOutcome::Hits(vec!["never".into()]),
    );
    let pipeline = RetrievalPipeline::new(config)
        .with_backend(Arc::new(ScriptedRetriever::hits(
            BackendKind::Vector,
            &["doc1"],
        )))
        .with_backend(Arc::new(stuck));

    let (items, diagnostics) = pipeline
        .retrieve_context(&Query::new("timeout isolation", "default"))
        .await
        .unwrap();

    assert!(items.iter().all(|i| i.doc_id != "never"));
    assert!(diagnostics.degraded);
    let graph_local = diagnostics
        .backends
        .iter()
        .find(|b| b.backend == BackendKind::GraphLocal)
        .unwrap();
    assert_eq!(graph_local.status, BackendStatus::Timeout);
}

#[tokio::test]
async fn partial_failure_proceeds_with_surviving_subset() {
    let pipeline = RetrievalPipeline::new(RetrievalConfig::default())
        .with_backend(Arc::new(ScriptedRetriever::hits(
            BackendKind::Vector,
            &["doc1", "doc2"],
        )))
        .with_backend(Arc::new(ScriptedRetriever::hits(
            BackendKind::Keyword,
            &["doc2", "doc3"],
        )))
        .with_backend(Arc::new(ScriptedRetriever::failing(BackendKind::GraphLocal)))
        .with_backend(Arc::new(ScriptedRetriever::hits(
            BackendKind::GraphGlobal,
            &["doc4"],
        )));

    let (items, diagnostics) = pipeline
        .retrieve_context(&Query::new("partial failure", "default"))
        .await
        .unwrap();

    assert!(!items.is_empty());
    assert!(diagnostics.degraded);
    assert_eq!(diagnostics.failed_backends(), vec![BackendKind::GraphLocal]);
}

#[tokio::test]
async fn all_backends_failed_is_a_hard_error() {
    let pipeline = RetrievalPipeline::new(RetrievalConfig::default())
        .with_backend(Arc::new(ScriptedRetriever::failing(BackendKind::Vector)))
        .with_backend(Arc::new(ScriptedRetriever::failing(BackendKind::Keyword)))
        .with_backend(Arc::new(ScriptedRetriever::failing(BackendKind::GraphLocal)))
        .with_backend(Arc::new(ScriptedRetriever::failing(BackendKind::GraphGlobal)));

    let err = pipeline
        .retrieve_context(&Query::new("all fail", "default"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RetrievalError::AllBackendsFailed { attempted: 4 }
    ));
}

#[tokio::test]
async fn all_backends_empty_is_an_explicit_no_results_error() {
    let pipeline = RetrievalPipeline::new(RetrievalConfig::default())
        .with_backend(Arc::new(ScriptedRetriever::empty(BackendKind::Vector)))
        .with_backend(Arc::new(ScriptedRetriever::empty(BackendKind::Keyword)))
        .with_backend(Arc::new(ScriptedRetriever::empty(BackendKind::GraphLocal)))
        .with_backend(Arc::new(ScriptedRetriever::empty(BackendKind::GraphGlobal)));

    let err = pipeline
        .retrieve_context(&Query::new("nothing anywhere", "default"))
        .await
        .unwrap_err();

    assert!(matches!(err, RetrievalError::NoResults));
}

fn doc_order(items: &[ContextItem]) -> Vec<String> {
    items.iter().map(|i| i.doc_id.clone()).collect()
}

#[tokio::test]
async fn rerank_failure_passes_fused_order_through() {
    let query = Query::new("test", "default");

    // Fused order without any reranker.
    let baseline = full_pipeline(RetrievalConfig::default());
    let (expected, _) = baseline.retrieve_context(&query).await.unwrap();

    // Same pipeline, reranker forced to error.
    let degraded_rerank = full_pipeline(RetrievalConfig::default())
        .with_reranker(Arc::new(ScriptedReranker::failing()));
    let (items, diagnostics) = degraded_rerank.retrieve_context(&query).await.unwrap();

    assert_eq!(doc_order(&items), doc_order(&expected));
    assert!(!diagnostics.rerank_applied);
    assert!(items.iter().all(|i| i.rerank_score.is_none()));
}

#[tokio::test(start_paused = true)]
async fn rerank_timeout_passes_fused_order_through() {
    let query = Query::new("test", "default");

    let baseline = full_pipeline(RetrievalConfig::default());
    let (expected, _) = baseline.retrieve_context(&query).await.unwrap();

    // A model that sleeps far past the 2000ms rerank deadline.
    let stuck_rerank = full_pipeline(RetrievalConfig::default())
        .with_reranker(Arc::new(ScriptedReranker::slow(Duration::from_secs(60))));
    let (items, diagnostics) = stuck_rerank.retrieve_context(&query).await.unwrap();

    assert_eq!(doc_order(&items), doc_order(&expected));
    assert!(!diagnostics.rerank_applied);
    assert!(items.iter().all(|i| i.rerank_score.is_none()));
}

#[tokio::test]
async fn rerank_score_count_mismatch_passes_fused_order_through() {
    let query = Query::new("test", "default");

    let baseline = full_pipeline(RetrievalConfig::default());
    let (expected, _) = baseline.retrieve_context(&query).await.unwrap();

    // A model that returns one score too few for the batch.
    let mangled_rerank = full_pipeline(RetrievalConfig::default())
        .with_reranker(Arc::new(ScriptedReranker::short_by(1)));
    let (items, diagnostics) = mangled_rerank.retrieve_context(&query).await.unwrap();

    assert_eq!(doc_order(&items), doc_order(&expected));
    assert!(!diagnostics.rerank_applied);
    assert!(items.iter().all(|i| i.rerank_score.is_none()));
}

#[tokio::test]
async fn reranker_order_is_authoritative_when_it_succeeds() {
    // Reverse the fused order by scoring later passages higher.
    let pipeline = RetrievalPipeline::new(RetrievalConfig::default())
        .with_backend(Arc::new(ScriptedRetriever::hits(
            BackendKind::Vector,
            &["doc1", "doc2", "doc3"],
        )))
        .with_reranker(Arc::new(ScriptedReranker::with_scores(vec![
            0.1, 0.5, 0.9,
        ])));

    let (items, diagnostics) = pipeline
        .retrieve_context(&Query::new("rerank wins", "default"))
        .await
        .unwrap();

    assert!(diagnostics.rerank_applied);
    assert_eq!(items[0].doc_id, "doc3");
    assert_eq!(items[0].rerank_score, Some(0.9));
    // Fused score is retained for explainability.
    assert!(items[0].fused_score > 0.0);
}

#[tokio::test]
async fn empty_query_is_invalid() {
    let pipeline = full_pipeline(RetrievalConfig::default());
    let err = pipeline
        .retrieve_context(&Query::new("   ", "default"))
        .await
        .unwrap_err();
    assert!(matches!(err, RetrievalError::InvalidQuery { .. }));
}

#[tokio::test]
async fn mode_override_restricts_consulted_backends() {
    let pipeline = full_pipeline(RetrievalConfig::default());
    let query = Query::new("vector only please", "default").with_mode(RetrievalMode::VectorOnly);

    let (items, diagnostics) = pipeline.retrieve_context(&query).await.unwrap();

    assert_eq!(diagnostics.backends.len(), 1);
    assert_eq!(diagnostics.backends[0].backend, BackendKind::Vector);
    assert!(items.iter().all(|i| i.sources == vec![BackendKind::Vector]));
}

#[tokio::test]
async fn config_disabled_backend_is_never_consulted() {
    let mut config = RetrievalConfig::default();
    config.keyword.enabled = false;

    let pipeline = full_pipeline(config);
    let (_, diagnostics) = pipeline
        .retrieve_context(&Query::new("staged rollout", "default"))
        .await
        .unwrap();

    assert!(diagnostics
        .backends
        .iter()
        .all(|b| b.backend != BackendKind::Keyword));
    assert_eq!(diagnostics.backends.len(), 3);
}

#[tokio::test]
async fn caller_top_k_caps_the_ranked_context() {
    let ids: Vec<String> = (0..20).map(|i| format!("doc{i:02}")).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let pipeline = RetrievalPipeline::new(RetrievalConfig::default())
        .with_backend(Arc::new(ScriptedRetriever::hits(BackendKind::Vector, &refs)));

    let query = Query::new("top k cap", "default").with_top_k(3);
    let (items, _) = pipeline.retrieve_context(&query).await.unwrap();
    assert_eq!(items.len(), 3);
}

struct StuckClassifier;

#[async_trait]
impl IClassifier for StuckClassifier {
    async fn classify(&self, _query_text: &str) -> IntentClassification {
        // Far past the classifier budget.
        tokio::time::sleep(Duration::from_secs(3600)).await;
        IntentClassification::balanced(1)
    }
}

#[tokio::test(start_paused = true)]
async fn classifier_over_budget_falls_back_to_balanced() {
    let pipeline = full_pipeline(RetrievalConfig::default())
        .with_classifier(Arc::new(StuckClassifier));

    let (items, diagnostics) = pipeline
        .retrieve_context(&Query::new("What is BGE-M3?", "default"))
        .await
        .unwrap();

    // Retrieval still answers; the fallback classification is balanced.
    assert!(!items.is_empty());
    assert_eq!(diagnostics.intent_confidence, 0.0);
}
