#![forbid(unsafe_code)]

//! Read-only metrics over controllers and races.
//!
//! Counts in [`PlaybackMetrics`] are whole-trace totals. Consumers that want
//! "operations so far" use [`RunningTally`], which folds step events up to
//! the cursor.

use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use sortviz_core::{Tally, Trace};

use crate::playback::PlaybackController;

/// Snapshot of one controller's counters and play time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackMetrics {
    pub comparisons: u64,
    pub swaps: u64,
    pub elapsed: Duration,
    pub ticks: u64,
}

impl PlaybackMetrics {
    /// Pure read of `controller`. Counts are zero while no trace is bound.
    #[must_use]
    pub fn capture(controller: &PlaybackController) -> Self {
        let totals = controller
            .trace()
            .map(|t| t.totals())
            .unwrap_or(Tally::ZERO);
        Self {
            comparisons: totals.comparisons,
            swaps: totals.swaps,
            elapsed: controller.elapsed(),
            ticks: controller.ticks(),
        }
    }
}

/// Incremental fold of step events up to a cursor.
///
/// Moving forward folds only the newly consumed steps; moving backward
/// refolds from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningTally {
    cursor: isize,
    tally: Tally,
}

impl Default for RunningTally {
    fn default() -> Self {
        Self {
            cursor: -1,
            tally: Tally::ZERO,
        }
    }
}

impl RunningTally {
    /// Operations recorded in `steps[0..=cursor]`; zero at cursor `-1`.
    #[must_use]
    pub fn through(trace: &Trace, cursor: isize) -> Tally {
        match usize::try_from(cursor) {
            Ok(index) => trace.tally_through(index),
            Err(_) => Tally::ZERO,
        }
    }

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the tally in line with `cursor` and return it.
    pub fn sync(&mut self, trace: &Trace, cursor: isize) -> Tally {
        if cursor < self.cursor {
            self.tally = Self::through(trace, cursor);
        } else {
            let from = usize::try_from(self.cursor + 1).unwrap_or(0);
            let to = usize::try_from(cursor).map(|c| c + 1).unwrap_or(0);
            for step in trace.steps().iter().take(to).skip(from) {
                self.tally += Tally::of(step.event());
            }
        }
        self.cursor = cursor;
        self.tally
    }

    #[must_use]
    pub fn tally(&self) -> Tally {
        self.tally
    }
}

/// Weights for the race score. Lower scores win.
///
/// The score is an approximate comparative heuristic, not a cost model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ScoreWeights {
    /// Per elapsed millisecond. Default: 1.0.
    pub time: f64,
    /// Per comparison. Default: 0.1.
    pub comparisons: f64,
    /// Per swap or write. Default: 0.2.
    pub swaps: f64,
}

impl ScoreWeights {
    pub const DEFAULT: Self = Self {
        time: 1.0,
        comparisons: 0.1,
        swaps: 0.2,
    };

    #[must_use]
    pub fn score(&self, elapsed: Duration, comparisons: u64, swaps: u64) -> f64 {
        self.time * elapsed.as_secs_f64() * 1_000.0
            + self.comparisons * comparisons as f64
            + self.swaps * swaps as f64
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Metrics for both race lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RaceMetrics {
    pub left: PlaybackMetrics,
    pub right: PlaybackMetrics,
}
