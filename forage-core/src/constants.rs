/// Forage system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum accepted query length in characters.
pub const MAX_QUERY_CHARS: usize = 8192;

/// Maximum number of synonym terms appended during query expansion.
pub const MAX_EXPANSION_TERMS: usize = 5;

/// Hard ceiling on the candidate pool handed to the reranker,
/// regardless of per-intent configuration.
pub const MAX_CANDIDATE_POOL: usize = 200;
