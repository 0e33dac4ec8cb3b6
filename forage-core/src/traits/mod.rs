//! Contracts at the seams of the pipeline: backends, classifier, reranker.
//!
//! Each is a replaceable component. The fusion core depends only on these
//! traits, never on a specific store client or model runtime.

mod classifier;
mod reranker;
mod retriever;

pub use classifier::IClassifier;
pub use reranker::IReranker;
pub use retriever::IRetriever;
