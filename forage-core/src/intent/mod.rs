//! Query intent categories.
//!
//! The intent of a query determines how the four retrieval backends are
//! weighted during fusion and how many candidates each backend is asked for.

use serde::{Deserialize, Serialize};

/// The kind of answer a query is seeking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    /// "What is X?" — a specific fact or definition.
    Factual,
    /// "How do I X?" — steps, instructions, usage.
    Procedural,
    /// "X vs Y" — contrasting two or more things.
    Comparison,
    /// "Which X should I use?" — a ranked suggestion.
    Recommendation,
    /// "Where is X?" — locating a specific entity or document.
    Navigation,
}

impl QueryIntent {
    /// All intent variants, in a fixed order.
    pub const ALL: [QueryIntent; 5] = [
        QueryIntent::Factual,
        QueryIntent::Procedural,
        QueryIntent::Comparison,
        QueryIntent::Recommendation,
        QueryIntent::Navigation,
    ];

    /// Number of intent variants.
    pub const COUNT: usize = Self::ALL.len();

    /// Stable snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryIntent::Factual => "factual",
            QueryIntent::Procedural => "procedural",
            QueryIntent::Comparison => "comparison",
            QueryIntent::Recommendation => "recommendation",
            QueryIntent::Navigation => "navigation",
        }
    }
}

impl std::fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
