//! Fetching and parsing of spreadsheet-backed leaderboard data.
//!
//! The crate turns one remote tabular read into a [`models::snapshot::Snapshot`]:
//! an ordered, deduplicated, descending-by-value list of `(label, value)`
//! entries. Everything upstream of the animation and rendering layers lives
//! here, behind the [`sources::SnapshotSource`] trait.

pub mod models;
pub mod sources;
