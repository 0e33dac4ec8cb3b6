//! Named default values for the retrieval configuration.

/// RRF smoothing constant. Standard practice: large enough that ranks 1 and 2
/// are not wildly different, small enough that rank matters more than
/// presence.
pub const DEFAULT_RRF_K: u32 = 60;

/// Per-backend call deadline.
pub const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 1000;

/// Candidates requested from each backend when no per-intent override
/// applies.
pub const DEFAULT_CANDIDATE_POOL: usize = 50;

/// Classifier confidence below which the balanced weight set is used.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Final result cap after reranking.
pub const DEFAULT_RERANK_TOP_K: usize = 10;

/// Deadline for the rerank model call.
pub const DEFAULT_RERANK_TIMEOUT_MS: u64 = 2000;

/// Budget for intent classification. Exceeding it falls back to the
/// balanced classification.
pub const DEFAULT_CLASSIFIER_BUDGET_MS: u64 = 50;
