//! Table detection
//!
//! Pulls a dine-in/takeaway designator out of raw utterance text.
//! Takeaway wins over any numbered table mention in the same sentence.

use regex::Regex;
use shared::models::TableDesignator;
use std::sync::LazyLock;

static TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)bàn\s*(vip\s*)?(\d+)").expect("table pattern is valid"));

/// Resolve a table designator from the utterance, if one is mentioned.
///
/// `None` means the utterance says nothing about tables — the caller
/// keeps whatever designator it already had.
pub fn resolve_table(text: &str) -> Option<TableDesignator> {
    let t = text.to_lowercase();
    if t.contains("mang") {
        return Some(TableDesignator::Takeaway);
    }
    let caps = TABLE_RE.captures(&t)?;
    let number: u32 = caps[2].parse().ok()?;
    Some(TableDesignator::DineIn {
        vip: caps.get(1).is_some(),
        number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_table() {
        assert_eq!(
            resolve_table("2 coca bàn 5"),
            Some(TableDesignator::DineIn {
                vip: false,
                number: 5
            })
        );
    }

    #[test]
    fn test_vip_table() {
        assert_eq!(
            resolve_table("cho Bàn VIP 3 một trà đá"),
            Some(TableDesignator::DineIn {
                vip: true,
                number: 3
            })
        );
    }

    #[test]
    fn test_takeaway_beats_table_number() {
        assert_eq!(
            resolve_table("mang về 1 cơm gà bàn 9"),
            Some(TableDesignator::Takeaway)
        );
    }

    #[test]
    fn test_no_mention() {
        assert_eq!(resolve_table("2 phở bò"), None);
        assert_eq!(resolve_table("bàn nào cũng được"), None);
    }
}
