//! The polling loop: fetch, animate, render, sleep, repeat.
//!
//! The loop owns the "previous snapshot" explicitly, passing it from one
//! iteration to the next, and every sleep is raced against a shutdown
//! signal so the process stops at the next wait boundary.

use std::{num::NonZeroU32, time::Duration};

use rank_animator::{AnimateError, Frame, interpolate};
use sheet_ingestor::{models::snapshot::Snapshot, sources::SnapshotSource};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::render::{FrameRenderer, RenderError};

/// Pacing and retry knobs for [`run_loop`], derived from the config.
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Interpolation steps per transition.
    pub steps: NonZeroU32,
    /// Pause between rendered frames.
    pub frame_delay: Duration,
    /// Pause between fetch cycles.
    pub poll_interval: Duration,
    /// Retries after a failed fetch before the cycle is skipped.
    pub max_retries: u32,
    /// First backoff delay; doubles per retry.
    pub base_delay: Duration,
    /// Stop after one cycle instead of polling forever.
    pub once: bool,
}

/// Runs the dashboard until `shutdown` flips to `true` (or forever when it
/// never does, matching an unattended kiosk deployment).
///
/// A failed or empty fetch skips the cycle and keeps the last rendered
/// chart on screen; only renderer failures abort the loop.
pub async fn run_loop(
    opts: &RunnerOptions,
    source: &dyn SnapshotSource,
    renderer: &mut dyn FrameRenderer,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), RenderError> {
    let mut previous: Option<Snapshot> = None;

    loop {
        if *shutdown.borrow() {
            break;
        }

        match fetch_with_retry(source, opts, &mut shutdown).await {
            Some(current) => {
                let frames = build_frames(previous.as_ref(), &current, opts.steps);
                let rendered = frames.len();
                for frame in &frames {
                    renderer.draw(frame)?;
                    if wait(opts.frame_delay, &mut shutdown).await {
                        return Ok(());
                    }
                }
                info!(
                    entries = current.len(),
                    frames = rendered,
                    fetched_at = %current.fetched_at,
                    "rendered cycle"
                );
                previous = Some(current);
            }
            None => warn!("no data this cycle, keeping last rendered chart"),
        }

        if opts.once || *shutdown.borrow() {
            break;
        }
        if wait(opts.poll_interval, &mut shutdown).await {
            break;
        }
    }

    Ok(())
}

/// The frame sequence for one cycle. The first cycle has nothing to animate
/// from and renders the snapshot as a single static frame.
fn build_frames(previous: Option<&Snapshot>, current: &Snapshot, steps: NonZeroU32) -> Vec<Frame> {
    match previous {
        Some(prev) => match interpolate(prev, current, steps) {
            Ok(frames) => frames,
            Err(AnimateError::EmptySnapshot) => {
                warn!("nothing to animate to");
                Vec::new()
            }
        },
        None => vec![Frame::from_snapshot(current)],
    }
}

/// Fetches with bounded exponential backoff. `None` means the cycle carries
/// no data, either because every attempt failed or shutdown was requested
/// mid-backoff.
async fn fetch_with_retry(
    source: &dyn SnapshotSource,
    opts: &RunnerOptions,
    shutdown: &mut watch::Receiver<bool>,
) -> Option<Snapshot> {
    for attempt in 0..=opts.max_retries {
        match source.fetch().await {
            Ok(snapshot) => return Some(snapshot),
            Err(err) => {
                warn!(attempt, error = %err, "fetch failed");
                if attempt == opts.max_retries {
                    break;
                }
                let backoff = opts.base_delay * 2u32.saturating_pow(attempt);
                if wait(backoff, shutdown).await {
                    break;
                }
            }
        }
    }
    None
}

/// Sleeps for `delay` unless shutdown is requested first. Returns `true`
/// when the loop should stop.
async fn wait(delay: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(delay) => *shutdown.borrow(),
        changed = shutdown.changed() => match changed {
            Ok(()) => *shutdown.borrow_and_update(),
            // Sender gone: nobody can ask us to stop later, so stop now.
            Err(_) => true,
        },
    }
}
