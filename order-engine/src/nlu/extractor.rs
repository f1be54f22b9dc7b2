//! Quantity/food segmentation
//!
//! Splits an ordering utterance into (quantity, food phrase) pairs.
//! Three layers, each only consulted when the previous one found nothing:
//!
//! 1. boundary-aware regex over the whole utterance
//! 2. loose `<integer> <rest>` match anchored at the first integer
//! 3. food entity hints supplied by the upstream NLU layer
//!
//! Extraction never fails; unparseable quantities default to 1.

use super::normalizer::clean_food_text;
use regex::Regex;
use shared::request::{EntityHint, EntityKind};
use std::sync::LazyLock;

/// One mention extracted from an utterance, not yet resolved against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedItem {
    pub food_raw: String,
    pub quantity: u32,
}

/// Extraction seam — lets a stronger parser replace the regex layer
/// without touching resolution or persistence.
pub trait ItemExtractor: Send + Sync {
    fn extract(&self, text: &str, hints: &[EntityHint]) -> Vec<ExtractedItem>;
}

/// Quantity token followed by a lazy food phrase, bounded by a comma,
/// conjunction, period, end of string or a location/politeness marker.
/// The boundary is consumed rather than looked ahead at; boundary words
/// never start a quantity capture, so no mention is lost.
static PRIMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+|một|mot|hai|ba|bốn|nam|năm)\s+([\w\s]+?)\s*(?:,|và|\.|ở|tại|bàn|mang|về|$)")
        .expect("primary extraction pattern is valid")
});

/// Loose fallback: first integer in the text plus everything after it
static FALLBACK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+([\w\s]+)").expect("fallback pattern is valid"));

/// Map a quantity token to its value: numeral word, else integer, else 1.
/// Quantities are always at least 1.
fn quantity_value(token: &str) -> u32 {
    match token.to_lowercase().as_str() {
        "một" | "mot" => 1,
        "hai" => 2,
        "ba" => 3,
        "bốn" => 4,
        "năm" => 5,
        other => other.parse().ok().filter(|&q| q >= 1).unwrap_or(1),
    }
}

/// Regex-backed extractor used in production
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexExtractor;

impl ItemExtractor for RegexExtractor {
    fn extract(&self, text: &str, hints: &[EntityHint]) -> Vec<ExtractedItem> {
        let mut items: Vec<ExtractedItem> = PRIMARY_RE
            .captures_iter(text)
            .map(|caps| ExtractedItem {
                quantity: quantity_value(&caps[1]),
                food_raw: clean_food_text(caps[2].trim()),
            })
            .collect();

        if items.is_empty()
            && let Some(caps) = FALLBACK_RE.captures(text)
        {
            items.push(ExtractedItem {
                quantity: quantity_value(&caps[1]),
                food_raw: clean_food_text(caps[2].trim()),
            });
        }

        if items.is_empty() {
            items.extend(
                hints
                    .iter()
                    .filter(|h| h.entity == EntityKind::Food)
                    .map(|h| ExtractedItem {
                        food_raw: h.value.clone(),
                        quantity: 1,
                    }),
            );
        }

        items
    }
}
