//! One fetched, parsed, sorted set of leaderboard entries.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::debug;

use crate::models::entry::{Entry, RawRow};

/// An ordered set of `(label, value)` pairs, sorted by value descending.
///
/// Iteration order is the display order (rank 0 first). The backing
/// [`IndexMap`] keeps rank lookup by label O(1), which the animation layer
/// relies on when resolving a label's target rank.
///
/// A snapshot is created once per fetch cycle and immediately superseded;
/// the prior snapshot is retained only as the interpolation source for the
/// next cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    values: IndexMap<String, f64>,
    /// When this snapshot was fetched (UTC).
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Builds a snapshot from raw rows: coerces the value column to `f64`,
    /// drops rows that fail coercion, keeps the first occurrence of a
    /// repeated label, and sorts descending by value (stable, so ties keep
    /// row order).
    pub fn from_rows(rows: impl IntoIterator<Item = RawRow>) -> Self {
        let mut entries: Vec<Entry> = Vec::new();
        let mut seen: IndexMap<String, ()> = IndexMap::new();
        let mut dropped = 0usize;

        for row in rows {
            let label = row.label.trim().to_string();
            if label.is_empty() {
                dropped += 1;
                continue;
            }
            let value = match row.raw_value.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    dropped += 1;
                    debug!(label = %label, raw = %row.raw_value, "dropping non-numeric row");
                    continue;
                }
            };
            if seen.insert(label.clone(), ()).is_some() {
                dropped += 1;
                debug!(label = %label, "dropping duplicate label");
                continue;
            }
            entries.push(Entry { label, value });
        }

        if dropped > 0 {
            debug!(dropped, kept = entries.len(), "filtered raw rows");
        }

        Self::from_entries(entries)
    }

    /// Builds a snapshot from already-coerced entries, sorting descending by
    /// value. Callers are expected to pass unique labels; duplicates keep
    /// the first occurrence.
    pub fn from_entries(mut entries: Vec<Entry>) -> Self {
        entries.sort_by(|a, b| b.value.total_cmp(&a.value));
        let mut values = IndexMap::with_capacity(entries.len());
        for e in entries {
            values.entry(e.label).or_insert(e.value);
        }
        Self {
            values,
            fetched_at: Utc::now(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no rows survived filtering.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The rank (0 = highest value) of `label`, if present.
    pub fn rank_of(&self, label: &str) -> Option<usize> {
        self.values.get_index_of(label)
    }

    /// The value recorded for `label`, if present.
    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.values.get(label).copied()
    }

    /// Entries in display order (rank ascending).
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(label, value)| (label.as_str(), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, raw: &str) -> RawRow {
        RawRow {
            label: label.to_string(),
            raw_value: raw.to_string(),
        }
    }

    #[test]
    fn sorts_descending_by_value() {
        let snap = Snapshot::from_rows(vec![
            row("Ms Chen", "5"),
            row("Mr Patel", "12"),
            row("Dr Okafor", "8"),
        ]);
        let order: Vec<_> = snap.iter().map(|(l, _)| l.to_string()).collect();
        assert_eq!(order, ["Mr Patel", "Dr Okafor", "Ms Chen"]);
        assert_eq!(snap.rank_of("Mr Patel"), Some(0));
        assert_eq!(snap.value_of("Ms Chen"), Some(5.0));
    }

    #[test]
    fn drops_non_numeric_rows_and_keeps_the_rest() {
        let snap = Snapshot::from_rows(vec![
            row("Ms Chen", "5"),
            row("Mr Patel", "n/a"),
            row("Dr Okafor", "8"),
        ]);
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.rank_of("Mr Patel"), None);
        let order: Vec<_> = snap.iter().map(|(l, _)| l.to_string()).collect();
        assert_eq!(order, ["Dr Okafor", "Ms Chen"]);
    }

    #[test]
    fn drops_blank_labels_and_duplicate_labels() {
        let snap = Snapshot::from_rows(vec![
            row("  ", "3"),
            row("Ms Chen", "5"),
            row("Ms Chen", "9"),
        ]);
        assert_eq!(snap.len(), 1);
        assert_eq!(snap.value_of("Ms Chen"), Some(5.0));
    }

    #[test]
    fn ties_keep_input_order() {
        let snap = Snapshot::from_rows(vec![
            row("Ms Chen", "5"),
            row("Mr Patel", "5"),
            row("Dr Okafor", "5"),
        ]);
        let order: Vec<_> = snap.iter().map(|(l, _)| l.to_string()).collect();
        assert_eq!(order, ["Ms Chen", "Mr Patel", "Dr Okafor"]);
    }

    #[test]
    fn empty_after_filtering_is_reported_empty() {
        let snap = Snapshot::from_rows(vec![row("Ms Chen", "not a number")]);
        assert!(snap.is_empty());
        assert_eq!(snap.len(), 0);
    }
}
