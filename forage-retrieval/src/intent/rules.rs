//! Pattern rules mapping query text to an intent category.

use regex::Regex;

use forage_core::intent::QueryIntent;

/// Confidence assigned when no rule matches and the query falls back to
/// factual.
const FALLBACK_CONFIDENCE: f64 = 0.4;

/// Confidence bonus per additional matching rule for the same intent.
const CORROBORATION_BONUS: f64 = 0.05;

/// Confidence ceiling; rules alone never reach full certainty.
const MAX_CONFIDENCE: f64 = 0.95;

struct IntentRule {
    intent: QueryIntent,
    pattern: Regex,
    confidence: f64,
}

/// The compiled rule set. Compiled once at classifier construction.
pub struct RuleSet {
    rules: Vec<IntentRule>,
}

impl RuleSet {
    pub fn default_rules() -> Self {
        let rules = [
            // Procedural: the user wants steps.
            (QueryIntent::Procedural, r"(?i)^how\s+(do|to|can|should)\b", 0.85),
            (QueryIntent::Procedural, r"(?i)\b(steps?\s+to|guide\s+(to|for)|walkthrough)\b", 0.8),
            (QueryIntent::Procedural, r"(?i)\b(install|set\s*up|configure|migrate|deploy)\b", 0.7),
            // Comparison: two or more things contrasted.
            (QueryIntent::Comparison, r"(?i)\b(vs\.?|versus)\b", 0.9),
            (QueryIntent::Comparison, r"(?i)\bdifference(s)?\s+between\b", 0.9),
            (QueryIntent::Comparison, r"(?i)\b(compare(d)?|better\s+than|worse\s+than|trade-?offs?)\b", 0.75),
            // Recommendation: a ranked suggestion.
            (QueryIntent::Recommendation, r"(?i)\b(recommend(ation)?s?|suggest(ion)?s?)\b", 0.85),
            (QueryIntent::Recommendation, r"(?i)\b(best|top\s+\d+)\b", 0.75),
            (QueryIntent::Recommendation, r"(?i)\b(should\s+i|which\s+.+\s+(use|choose|pick))\b", 0.8),
            // Navigation: locating a specific entity or document.
            (QueryIntent::Navigation, r"(?i)^(where|find|locate|show\s+me|go\s+to|open)\b", 0.85),
            (QueryIntent::Navigation, r"(?i)\b(link|page|section|chapter)\s+(to|for|on)\b", 0.75),
            // Factual: a specific fact or definition.
            (QueryIntent::Factual, r"(?i)^(what|who|when|why)\s+(is|are|was|were|does|did)\b", 0.8),
            (QueryIntent::Factual, r"(?i)\b(define|definition\s+of|meaning\s+of)\b", 0.85),
        ]
        .into_iter()
        .map(|(intent, pattern, confidence)| IntentRule {
            intent,
            // Patterns are static and known-good; compilation cannot fail.
            pattern: Regex::new(pattern).unwrap(),
            confidence,
        })
        .collect();

        Self { rules }
    }

    /// Detect the intent of a query. Returns the category with the strongest
    /// matching rule; multiple matches for the same category corroborate and
    /// raise confidence slightly. No match falls back to factual with low
    /// confidence.
    pub fn detect(&self, query_text: &str) -> (QueryIntent, f64) {
        let mut best: Option<(QueryIntent, f64, usize)> = None;

        for intent in QueryIntent::ALL {
            let matched: Vec<&IntentRule> = self
                .rules
                .iter()
                .filter(|r| r.intent == intent && r.pattern.is_match(query_text))
                .collect();

            if matched.is_empty() {
                continue;
            }

            let strongest = matched
                .iter()
                .map(|r| r.confidence)
                .fold(f64::MIN, f64::max);
            let confidence = (strongest
                + CORROBORATION_BONUS * (matched.len() - 1) as f64)
                .min(MAX_CONFIDENCE);

            let replace = match best {
                None => true,
                Some((_, best_conf, _)) => confidence > best_conf,
            };
            if replace {
                best = Some((intent, confidence, matched.len()));
            }
        }

        match best {
            Some((intent, confidence, _)) => (intent, confidence),
            None => (QueryIntent::Factual, FALLBACK_CONFIDENCE),
        }
    }
}
