//! Synonym/related-term expansion for recall.
//!
//! Expands abbreviated query terms with related words before the text
//! reaches the vector and keyword backends. E.g. "rag eval" → adds
//! "retrieval augmented generation evaluation benchmark".

use std::collections::HashMap;

use forage_core::constants::MAX_EXPANSION_TERMS;

/// Abbreviation map for common retrieval-domain terms.
fn synonym_map() -> HashMap<&'static str, &'static [&'static str]> {
    let mut m = HashMap::new();
    m.insert(
        "rag",
        &["retrieval", "augmented", "generation", "grounding"][..],
    );
    m.insert("llm", &["large", "language", "model", "transformer"]);
    m.insert("ml", &["machine", "learning", "model", "training"]);
    m.insert("ai", &["artificial", "intelligence", "model"]);
    m.insert(
        "db",
        &["database", "storage", "index", "schema", "query"],
    );
    m.insert("api", &["endpoint", "interface", "contract", "rest"]);
    m.insert("eval", &["evaluation", "benchmark", "metric", "accuracy"]);
    m.insert("embedding", &["vector", "dense", "representation"]);
    m.insert("doc", &["document", "documentation", "page"]);
    m.insert("config", &["configuration", "settings", "parameters"]);
    m.insert("perf", &["performance", "latency", "throughput"]);
    m.insert("k8s", &["kubernetes", "cluster", "deployment"]);
    m.insert("auth", &["authentication", "authorization", "login"]);
    m
}

/// Expand a query with related terms.
///
/// Returns the original query with additional terms appended, bounded to
/// avoid query bloat. A query with no known abbreviations is returned
/// unchanged.
pub fn expand(query: &str) -> String {
    let map = synonym_map();
    let words: Vec<&str> = query.split_whitespace().collect();
    let mut expansions: Vec<&str> = Vec::new();

    for word in &words {
        let lower = word.to_lowercase();
        if let Some(synonyms) = map.get(lower.as_str()) {
            for syn in *synonyms {
                if !words.iter().any(|w| w.eq_ignore_ascii_case(syn))
                    && !expansions.iter().any(|e| e.eq_ignore_ascii_case(syn))
                {
                    expansions.push(syn);
                }
            }
        }
    }

    if expansions.is_empty() {
        return query.to_string();
    }

    expansions.truncate(MAX_EXPANSION_TERMS);
    format!("{} {}", query, expansions.join(" "))
}
