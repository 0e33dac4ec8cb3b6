//! # forage-core
//!
//! Foundation crate for the Forage hybrid retrieval system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod intent;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::RetrievalConfig;
pub use errors::{BackendError, RerankError, RetrievalError, RetrieveResult};
pub use intent::QueryIntent;
pub use models::{
    BackendKind, BackendQuery, BackendResult, BackendStatus, ContextItem, DocumentPayload,
    FusedCandidate, IntentClassification, PipelineDiagnostics, Query, RankedItem,
};
