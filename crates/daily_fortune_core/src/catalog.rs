//! crates/daily_fortune_core/src/catalog.rs
//!
//! The fixed universe of fortunes available for selection.
//! A catalog is never empty: anything unusable degrades to the built-in set.

use crate::domain::FortuneRecord;
use std::collections::HashSet;
use tracing::warn;

const BUILTIN_FORTUNES: [(i64, &str, &str); 10] = [
    (1, "Today brings new opportunities your way", "encouraging"),
    (2, "Your patience will be rewarded soon", "motivational"),
    (3, "A small act of kindness will make a big difference", "general"),
    (4, "Trust your instincts today", "encouraging"),
    (5, "Good things come to those who wait", "motivational"),
    (6, "You are stronger than you think", "encouraging"),
    (7, "Today is a perfect day to start something new", "motivational"),
    (8, "The best is yet to come", "encouraging"),
    (9, "Your hard work will pay off", "motivational"),
    (10, "Believe in yourself and magic will happen", "encouraging"),
];

/// An ordered, read-only, non-empty collection of fortunes.
#[derive(Debug, Clone)]
pub struct FortuneCatalog {
    records: Vec<FortuneRecord>,
}

impl FortuneCatalog {
    /// The 10 fortunes shipped with the application.
    pub fn builtin() -> Self {
        let records = BUILTIN_FORTUNES
            .iter()
            .map(|(id, text, category)| FortuneRecord {
                id: *id,
                text: (*text).to_string(),
                category: (*category).to_string(),
            })
            .collect();
        Self { records }
    }

    /// Builds a catalog from loaded records.
    ///
    /// Records with blank text are skipped and a repeated id keeps its first
    /// occurrence. If nothing usable remains the built-in set is returned.
    pub fn from_records(records: Vec<FortuneRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            if record.text.trim().is_empty() {
                warn!(id = record.id, "Skipping fortune with empty text");
                continue;
            }
            if !seen.insert(record.id) {
                warn!(id = record.id, "Skipping fortune with duplicate id");
                continue;
            }
            kept.push(record);
        }

        if kept.is_empty() {
            warn!("Catalog has no usable fortunes, using the built-in set");
            return Self::builtin();
        }
        Self { records: kept }
    }

    pub fn get(&self, id: i64) -> Option<&FortuneRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn records(&self) -> &[FortuneRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, text: &str) -> FortuneRecord {
        FortuneRecord {
            id,
            text: text.to_string(),
            category: "general".to_string(),
        }
    }

    #[test]
    fn builtin_catalog_has_ten_sequential_ids() {
        let catalog = FortuneCatalog::builtin();
        let ids: Vec<i64> = catalog.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn empty_input_falls_back_to_builtin() {
        let catalog = FortuneCatalog::from_records(Vec::new());
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn blank_and_duplicate_records_are_dropped() {
        let catalog = FortuneCatalog::from_records(vec![
            record(7, "first"),
            record(8, "   "),
            record(7, "second"),
            record(9, "third"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(7).unwrap().text, "first");
        assert!(catalog.get(8).is_none());
        assert_eq!(catalog.records()[1].id, 9);
    }
}
