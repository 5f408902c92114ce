//! One intermediate rendering state between two snapshots.

use sheet_ingestor::models::snapshot::Snapshot;

/// A single bar within a [`Frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEntry {
    /// Display label, identity of the bar across frames.
    pub label: String,

    /// Interpolated value for this step.
    pub value: f64,

    /// Continuous interpolated rank, used purely to order the frame's bars.
    /// Integral only at the endpoints of an animation.
    pub position: f64,
}

impl FrameEntry {
    /// Value formatted for the bar caption: whole tickets print without a
    /// decimal point, mid-animation values keep one decimal.
    pub fn display_value(&self) -> String {
        if self.value.fract().abs() < f64::EPSILON {
            format!("{}", self.value as i64)
        } else {
            format!("{:.1}", self.value)
        }
    }
}

/// An ordered list of bars for one rendering step, sorted by `position`
/// ascending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    /// Bars in display order.
    pub entries: Vec<FrameEntry>,
}

impl Frame {
    /// Builds a static frame straight from a snapshot, every position at its
    /// integral rank. Used for the first cycle, when there is nothing to
    /// animate from.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let entries = snapshot
            .iter()
            .enumerate()
            .map(|(rank, (label, value))| FrameEntry {
                label: label.to_string(),
                value,
                position: rank as f64,
            })
            .collect();
        Self { entries }
    }

    /// Minimum and maximum values in this frame, `None` when empty.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.entries.iter().map(|e| e.value);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some((min, max))
    }
}
