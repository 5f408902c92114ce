//! Source abstraction for leaderboard data.
//!
//! This module defines the [`SnapshotSource`] trait, a unified interface for
//! fetching one ranked snapshot from any spreadsheet-like backend (Google
//! Sheets CSV export, a published CSV URL, a test fixture).
//!
//! The trait is async and object-safe (`dyn SnapshotSource`) so the polling
//! loop can select a backend at runtime.

pub mod errors;
pub mod sheet_csv;

use async_trait::async_trait;

use crate::{models::snapshot::Snapshot, sources::errors::SourceError};

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetches and parses one snapshot.
    ///
    /// An empty result after row filtering is an error
    /// ([`SourceError::Empty`]), so "no data" is one code path for callers.
    async fn fetch(&self) -> Result<Snapshot, SourceError>;
}
