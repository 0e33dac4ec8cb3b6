//! Error taxonomy for the retrieval pipeline.
//!
//! Per-backend errors ([`BackendError`]) are absorbed by the coordinator and
//! recorded in `BackendResult.status`; they never propagate past it. Reranker
//! errors ([`RerankError`]) trigger a pass-through of the fused ranking. Only
//! [`RetrievalError`] variants reach the pipeline's caller.

mod backend_error;
mod rerank_error;
mod retrieval_error;

pub use backend_error::BackendError;
pub use rerank_error::RerankError;
pub use retrieval_error::RetrievalError;

/// Result alias used across the workspace.
pub type RetrieveResult<T> = Result<T, RetrievalError>;
