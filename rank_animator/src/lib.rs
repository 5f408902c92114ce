//! Smooth re-ranking animation between two leaderboard snapshots.
//!
//! Given the previously displayed [`Snapshot`](sheet_ingestor::models::snapshot::Snapshot)
//! and a freshly fetched one, [`animate::interpolate`] produces a sequence of
//! [`frame::Frame`]s that linearly interpolate both each entry's value and
//! its rank position, so bars slide to their new spots instead of jumping.
//!
//! The crate is pure: no I/O, no async, no clock.

pub mod animate;
pub mod color;
pub mod frame;

pub use animate::{AnimateError, interpolate};
pub use frame::{Frame, FrameEntry};
