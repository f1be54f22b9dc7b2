//! Natural-language understanding for ordering utterances
//!
//! Regex-based segmentation of Vietnamese ordering text. Deliberately
//! lossy: unmatched quantities default to 1 and nothing in here ever
//! fails outward.

pub mod extractor;
pub mod normalizer;
pub mod table;

pub use extractor::{ExtractedItem, ItemExtractor, RegexExtractor};
pub use normalizer::clean_food_text;
pub use table::resolve_table;
