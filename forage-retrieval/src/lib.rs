//! # forage-retrieval
//!
//! The hybrid retrieval core: intent classification, parallel multi-backend
//! fan-out with per-backend isolation, Reciprocal Rank Fusion with
//! intent-adaptive weights, cross-encoder reranking, and the degradation
//! policy that keeps the pipeline answering when backends fail.
//!
//! Entry point: [`engine::RetrievalPipeline::retrieve_context`].

pub mod coordinator;
pub mod degradation;
pub mod engine;
pub mod expansion;
pub mod fusion;
pub mod intent;
pub mod ranking;

pub use engine::RetrievalPipeline;
