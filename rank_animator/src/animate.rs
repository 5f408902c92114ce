//! Linear interpolation of values and rank positions between snapshots.

use std::num::NonZeroU32;

use sheet_ingestor::models::snapshot::Snapshot;
use thiserror::Error;

use crate::frame::{Frame, FrameEntry};

/// Errors from [`interpolate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnimateError {
    /// The target snapshot has no entries; there is nothing to animate to.
    #[error("current snapshot is empty")]
    EmptySnapshot,
}

/// Produces `steps + 1` frames sliding from `previous` to `current`,
/// endpoints inclusive.
///
/// For each step `i`, fraction `t = i / steps`, every label of `current`
/// carries `value = prev + (curr - prev) * t` and
/// `position = prev_rank + (curr_rank - prev_rank) * t`; the frame's bars
/// are then ordered by position ascending (stable, ties keep `current`'s
/// order).
///
/// Labels absent from `previous` enter at value 0 already at their target
/// rank, so they grow in place; labels absent from `current` drop out of the
/// animation. With that policy the first frame reproduces `previous` for
/// every surviving label and the last frame reproduces `current` exactly.
pub fn interpolate(
    previous: &Snapshot,
    current: &Snapshot,
    steps: NonZeroU32,
) -> Result<Vec<Frame>, AnimateError> {
    if current.is_empty() {
        return Err(AnimateError::EmptySnapshot);
    }

    let steps = steps.get();
    let mut frames = Vec::with_capacity(steps as usize + 1);

    for i in 0..=steps {
        let t = f64::from(i) / f64::from(steps);

        let mut entries: Vec<FrameEntry> = current
            .iter()
            .enumerate()
            .map(|(curr_rank, (label, curr_value))| {
                let curr_rank = curr_rank as f64;
                let prev_value = previous.value_of(label).unwrap_or(0.0);
                let prev_rank = previous
                    .rank_of(label)
                    .map_or(curr_rank, |r| r as f64);
                FrameEntry {
                    label: label.to_string(),
                    value: prev_value + (curr_value - prev_value) * t,
                    position: prev_rank + (curr_rank - prev_rank) * t,
                }
            })
            .collect();

        // Vec::sort_by is stable, so equal positions keep current's order.
        entries.sort_by(|a, b| a.position.total_cmp(&b.position));
        frames.push(Frame { entries });
    }

    Ok(frames)
}
