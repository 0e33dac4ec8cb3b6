//! Data model for one retrieval call.
//!
//! Everything here is created fresh per query, lives for the duration of one
//! `retrieve_context` call, and is discarded once the caller consumes the
//! ranked context. The core retains no cross-query mutable state.

mod backend;
mod classification;
mod context;
mod diagnostics;
mod fused;
mod payload;
mod query;

pub use backend::{BackendKind, BackendQuery, BackendResult, BackendStatus, RankedItem};
pub use classification::IntentClassification;
pub use context::ContextItem;
pub use diagnostics::{BackendCallDiagnostics, PipelineDiagnostics};
pub use fused::{BackendContribution, FusedCandidate};
pub use payload::DocumentPayload;
pub use query::{Query, RetrievalMode};
