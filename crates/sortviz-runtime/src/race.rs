#![forbid(unsafe_code)]

//! Two controllers racing over the same input on one shared pulse source.
//!
//! Each pulse advances every lane still `Playing`; a finished lane simply
//! stops advancing. The outcome exists only once both lanes are finished.
//! Time is scored as `ticks × shared interval`, so outcomes are
//! deterministic and independent of wall-clock jitter.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use sortviz_core::Algorithm;

use crate::cache::TraceCache;
use crate::clock::Clock;
use crate::metrics::{PlaybackMetrics, RaceMetrics, ScoreWeights};
use crate::playback::{PlaybackController, PlaybackError, PlaybackStatus, TickOutcome};
use crate::scheduler::TickDriver;
use crate::speed::{IntervalPolicy, Speed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final figures for one lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneResult {
    pub algorithm: Algorithm,
    pub ticks: u64,
    /// `ticks × interval`.
    pub elapsed: Duration,
    pub comparisons: u64,
    pub swaps: u64,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceOutcome {
    pub left: LaneResult,
    pub right: LaneResult,
    /// Lower score wins; `None` on an exact tie.
    pub winner: Option<Lane>,
}

impl RaceOutcome {
    #[must_use]
    pub fn lane(&self, lane: Lane) -> &LaneResult {
        match lane {
            Lane::Left => &self.left,
            Lane::Right => &self.right,
        }
    }
}

pub struct Race {
    left: PlaybackController,
    right: PlaybackController,
    weights: ScoreWeights,
}

impl fmt::Debug for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Race")
            .field("left", &self.left)
            .field("right", &self.right)
            .field("weights", &self.weights)
            .finish()
    }
}

impl Race {
    /// Two lanes over one input snapshot, sharing a fresh trace cache.
    #[must_use]
    pub fn new(left: Algorithm, right: Algorithm, input: impl Into<Vec<i64>>) -> Self {
        Self::with_cache(left, right, input, Arc::new(TraceCache::new()))
    }

    #[must_use]
    pub fn with_cache(
        left: Algorithm,
        right: Algorithm,
        input: impl Into<Vec<i64>>,
        cache: Arc<TraceCache>,
    ) -> Self {
        let input: Vec<i64> = input.into();
        Self {
            left: PlaybackController::new(left, input.clone()).with_cache(Arc::clone(&cache)),
            right: PlaybackController::new(right, input).with_cache(cache),
            weights: ScoreWeights::default(),
        }
    }

    #[must_use]
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.left = self.left.with_clock(Arc::clone(&clock));
        self.right = self.right.with_clock(clock);
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.set_speed(speed);
        self
    }

    #[must_use]
    pub fn with_interval_policy(mut self, policy: IntervalPolicy) -> Self {
        self.left.set_interval_policy(policy);
        self.right.set_interval_policy(policy);
        self
    }

    #[must_use]
    pub fn lane(&self, lane: Lane) -> &PlaybackController {
        match lane {
            Lane::Left => &self.left,
            Lane::Right => &self.right,
        }
    }

    #[must_use]
    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Shared pulse interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.left.tick_interval()
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.left.set_speed(speed);
        self.right.set_speed(speed);
    }

    /// Start or resume the race. If either lane fails, both are reset.
    ///
    /// When no lane is mid-run (each is `Idle` or `Finished`) both replay
    /// from the start. Otherwise a lane that already finished stays finished
    /// and only the other lane resumes.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        let replay = [&self.left, &self.right].into_iter().all(|lane| {
            matches!(lane.status(), PlaybackStatus::Idle | PlaybackStatus::Finished)
        });
        let started = [&mut self.left, &mut self.right]
            .into_iter()
            .filter(|lane| replay || lane.status() != PlaybackStatus::Finished)
            .try_for_each(|lane| lane.start());
        if started.is_err() {
            self.reset();
        } else {
            tracing::debug!(
                message = "race.start",
                left = self.left.algorithm().key(),
                right = self.right.algorithm().key(),
                len = self.left.input().len(),
                resumed = !replay
            );
        }
        started
    }

    /// Pause every lane still playing.
    pub fn pause(&mut self) {
        for lane in [&mut self.left, &mut self.right] {
            if lane.wants_tick() {
                // Only Playing lanes reach here, where pause cannot fail.
                let _ = lane.pause();
            }
        }
    }

    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }

    /// `true` while at least one lane wants pulses.
    #[must_use]
    pub fn wants_tick(&self) -> bool {
        self.left.wants_tick() || self.right.wants_tick()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.left.status() == PlaybackStatus::Finished
            && self.right.status() == PlaybackStatus::Finished
    }

    /// Deliver one shared pulse to both lanes.
    pub fn pulse(&mut self) -> [TickOutcome; 2] {
        let outcomes = [self.left.tick(), self.right.tick()];
        for (lane, outcome) in Lane::BOTH.into_iter().zip(outcomes) {
            if outcome == TickOutcome::Finished {
                tracing::debug!(
                    message = "race.lane_finished",
                    lane = lane.label(),
                    ticks = self.lane(lane).ticks()
                );
            }
        }
        outcomes
    }

    #[must_use]
    pub fn metrics(&self) -> RaceMetrics {
        RaceMetrics {
            left: PlaybackMetrics::capture(&self.left),
            right: PlaybackMetrics::capture(&self.right),
        }
    }

    /// Scored result, available once both lanes are finished.
    #[must_use]
    pub fn outcome(&self) -> Option<RaceOutcome> {
        self.is_finished().then(|| self.score())
    }

    /// Race to completion by pulsing directly, without sleeping.
    pub fn run_instant(&mut self) -> Result<RaceOutcome, PlaybackError> {
        self.start()?;
        while self.wants_tick() {
            self.pulse();
        }
        Ok(self.score())
    }

    /// Race to completion on a real [`TickDriver`] at the shared interval.
    ///
    /// `on_pulse` runs after every delivered pulse.
    pub fn run_to_end(
        &mut self,
        mut on_pulse: impl FnMut(&Race),
    ) -> Result<RaceOutcome, PlaybackError> {
        self.start()?;
        let driver = TickDriver::spawn(self.interval()).map_err(PlaybackError::Driver)?;
        while self.wants_tick() {
            if driver.recv().is_none() {
                driver.stop();
                return Err(PlaybackError::Driver(std::io::Error::other(
                    "tick driver stopped unexpectedly",
                )));
            }
            self.pulse();
            on_pulse(self);
        }
        driver.stop();
        Ok(self.score())
    }

    fn lane_result(&self, lane: Lane) -> LaneResult {
        let controller = self.lane(lane);
        let totals = controller
            .trace()
            .map(|t| t.totals())
            .unwrap_or_default();
        let ticks = controller.ticks();
        let elapsed = controller
            .tick_interval()
            .saturating_mul(u32::try_from(ticks).unwrap_or(u32::MAX));
        LaneResult {
            algorithm: controller.algorithm(),
            ticks,
            elapsed,
            comparisons: totals.comparisons,
            swaps: totals.swaps,
            score: self
                .weights
                .score(elapsed, totals.comparisons, totals.swaps),
        }
    }

    fn score(&self) -> RaceOutcome {
        let left = self.lane_result(Lane::Left);
        let right = self.lane_result(Lane::Right);
        let winner = if left.score < right.score {
            Some(Lane::Left)
        } else if right.score < left.score {
            Some(Lane::Right)
        } else {
            None
        };
        tracing::debug!(
            message = "race.outcome",
            left_score = left.score,
            right_score = right.score,
            winner = winner.map_or("tie", Lane::label)
        );
        RaceOutcome {
            left,
            right,
            winner,
        }
    }
}
