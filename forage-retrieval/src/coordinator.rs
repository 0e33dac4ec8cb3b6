//! Parallel retrieval coordinator: fan-out to all enabled backends, fan-in
//! once every task has completed or been cancelled by its own deadline.
//!
//! Each backend call runs as an independent tokio task under its own
//! timeout, so a slow graph lookup cannot starve a fast vector lookup.
//! Wall-clock latency is bounded by the largest per-backend timeout plus
//! small fixed overhead, never by the sum of backend latencies.
//!
//! Per-backend failures are absorbed here: they become `Timeout`/`Error`
//! statuses on the corresponding `BackendResult` and never propagate as
//! errors. No retries happen at this layer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinSet;
use tracing::{debug, warn};

use forage_core::models::{BackendKind, BackendQuery, BackendResult, BackendStatus};
use forage_core::traits::IRetriever;

/// Issue one concurrent, independently cancellable call per backend query
/// and collect all results.
///
/// Returns one `BackendResult` per input query, in `BackendKind::ALL` order.
/// Queries without a matching retriever come back with status `Error`.
pub async fn dispatch(
    backends: &HashMap<BackendKind, Arc<dyn IRetriever>>,
    queries: Vec<BackendQuery>,
) -> Vec<BackendResult> {
    let expected: Vec<BackendKind> = queries.iter().map(|q| q.backend).collect();
    let mut tasks: JoinSet<BackendResult> = JoinSet::new();

    for query in queries {
        let kind = query.backend;
        let Some(retriever) = backends.get(&kind).cloned() else {
            warn!(backend = %kind, "no retriever registered for enabled backend");
            continue;
        };
        tasks.spawn(async move { call_backend(retriever, query).await });
    }

    let mut by_kind: HashMap<BackendKind, BackendResult> = HashMap::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => {
                by_kind.insert(result.backend, result);
            }
            // A panicking adapter violates the contract; record it as a
            // backend error rather than poisoning the whole call.
            Err(e) => warn!(error = %e, "backend task failed to join"),
        }
    }

    // Fan-in in deterministic order; anything missing is a failure.
    expected
        .into_iter()
        .map(|kind| {
            by_kind.remove(&kind).unwrap_or_else(|| BackendResult {
                backend: kind,
                status: BackendStatus::Error,
                items: Vec::new(),
                latency: Duration::ZERO,
            })
        })
        .collect()
}

/// Run a single backend call under its own deadline and fold the outcome
/// into a `BackendResult`. Emits the one observability event per call.
async fn call_backend(retriever: Arc<dyn IRetriever>, query: BackendQuery) -> BackendResult {
    let kind = query.backend;
    let started = Instant::now();

    let (status, items) = match tokio::time::timeout(query.timeout, retriever.search(&query)).await
    {
        Ok(Ok(items)) if items.is_empty() => (BackendStatus::Empty, items),
        Ok(Ok(items)) => (BackendStatus::Ok, items),
        Ok(Err(e)) => {
            warn!(backend = %kind, error = %e, "backend call failed");
            (BackendStatus::Error, Vec::new())
        }
        Err(_) => (BackendStatus::Timeout, Vec::new()),
    };

    let latency = started.elapsed();
    debug!(
        backend = %kind,
        status = ?status,
        latency_ms = latency.as_millis() as u64,
        results = items.len(),
        "backend call complete"
    );

    BackendResult {
        backend: kind,
        status,
        items,
        latency,
    }
}
