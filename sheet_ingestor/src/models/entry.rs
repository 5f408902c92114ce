//! Canonical in-memory representation of one leaderboard row.
//!
//! This struct is the standard unit of data for all
//! [`SnapshotSource`](crate::sources::SnapshotSource) implementations,
//! regardless of where the spreadsheet actually lives.

/// A single `(label, value)` measurement, e.g. one teacher and the number of
/// raffle tickets sold against their name.
///
/// Labels are unique within one [`Snapshot`](crate::models::snapshot::Snapshot);
/// identity is the label, not the row position.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Display label for this row.
    pub label: String,

    /// Non-negative measured quantity.
    pub value: f64,
}

/// One raw row as it came off the wire, before numeric coercion.
///
/// Rows whose `raw_value` fails coercion are dropped during
/// [`Snapshot::from_rows`](crate::models::snapshot::Snapshot::from_rows),
/// not surfaced as errors.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// First configured column of the row.
    pub label: String,
    /// The value column, still as text.
    pub raw_value: String,
}
