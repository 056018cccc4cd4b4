#![forbid(unsafe_code)]

//! Playback controller: a cursor over one immutable trace.
//!
//! ```text
//! Idle ──prepare/start──▶ Ready ──start──▶ Playing ⇄ Paused
//!                              │         │
//!                              └─tick/step/seek to last─▶ Finished
//! ```
//!
//! # Invariants
//!
//! 1. `cursor` is always in `[-1, last]`; `-1` means "before the first step".
//! 2. `status == Finished` iff a trace is bound and `cursor == last`.
//! 3. Only the methods on [`PlaybackController`] change the cursor or status.
//! 4. A rejected operation leaves the controller untouched.
//!
//! # Elapsed time
//!
//! Elapsed play time accumulates only while `Playing`. Pausing banks the
//! running interval, and reaching `Finished` stops the clock.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use sortviz_core::{Algorithm, Step, Trace, TraceError};

use crate::cache::TraceCache;
use crate::clock::{Clock, MonotonicClock};
use crate::speed::{IntervalPolicy, Speed};

/// Lifecycle of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackStatus {
    /// No trace bound yet.
    Idle,
    /// Trace bound, not yet advancing on ticks.
    Ready,
    /// Advancing one step per tick.
    Playing,
    /// Halted; can be stepped or resumed.
    Paused,
    /// Cursor sits on the last step.
    Finished,
}

impl PlaybackStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }

    /// States in which the cursor may be moved by hand.
    #[must_use]
    pub const fn allows_stepping(self) -> bool {
        matches!(self, Self::Ready | Self::Paused | Self::Finished)
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Operation names reported in [`PlaybackError::InvalidTransition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackOp {
    Start,
    Pause,
    StepForward,
    StepBackward,
    Seek,
}

impl PlaybackOp {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::StepForward => "step_forward",
            Self::StepBackward => "step_backward",
            Self::Seek => "seek",
        }
    }
}

impl fmt::Display for PlaybackOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from controller operations.
#[derive(Debug)]
pub enum PlaybackError {
    /// Operation not valid in the current status. State is unchanged.
    InvalidTransition {
        op: PlaybackOp,
        status: PlaybackStatus,
    },
    /// The trace could not be generated; the controller stays `Idle`.
    Generation(TraceError),
    /// The background tick driver could not be started or died.
    Driver(std::io::Error),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { op, status } => {
                write!(f, "cannot {op} while {status}")
            }
            Self::Generation(e) => write!(f, "trace generation failed: {e}"),
            Self::Driver(e) => write!(f, "tick driver error: {e}"),
        }
    }
}

impl std::error::Error for PlaybackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidTransition { .. } => None,
            Self::Generation(e) => Some(e),
            Self::Driver(e) => Some(e),
        }
    }
}

impl From<TraceError> for PlaybackError {
    fn from(e: TraceError) -> Self {
        Self::Generation(e)
    }
}

/// Result of delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Cursor moved forward by one.
    Advanced,
    /// Cursor moved onto the last step; no further ticks are wanted.
    Finished,
    /// Not playing; the tick had no effect.
    Ignored,
}

/// State machine driving one trace.
pub struct PlaybackController {
    algorithm: Algorithm,
    input: Vec<i64>,
    cache: Arc<TraceCache>,
    clock: Arc<dyn Clock>,
    trace: Option<Arc<Trace>>,
    cursor: isize,
    status: PlaybackStatus,
    speed: Speed,
    policy: IntervalPolicy,
    tick_interval: Duration,
    ticks: u64,
    banked: Duration,
    running_since: Option<Duration>,
}

impl fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("algorithm", &self.algorithm)
            .field("len", &self.input.len())
            .field("status", &self.status)
            .field("cursor", &self.cursor)
            .field("speed", &self.speed)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl PlaybackController {
    /// Idle controller with a private cache and the system clock.
    #[must_use]
    pub fn new(algorithm: Algorithm, input: impl Into<Vec<i64>>) -> Self {
        let speed = Speed::default();
        let policy = IntervalPolicy::default();
        Self {
            algorithm,
            input: input.into(),
            cache: Arc::new(TraceCache::new()),
            clock: Arc::new(MonotonicClock::new()),
            trace: None,
            cursor: -1,
            status: PlaybackStatus::Idle,
            speed,
            policy,
            tick_interval: policy.interval(speed),
            ticks: 0,
            banked: Duration::ZERO,
            running_since: None,
        }
    }

    /// Share a trace cache with other controllers.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<TraceCache>) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.set_speed(speed);
        self
    }

    #[must_use]
    pub fn with_interval_policy(mut self, policy: IntervalPolicy) -> Self {
        self.set_interval_policy(policy);
        self
    }

    // ---- Read model ----

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[must_use]
    pub fn input(&self) -> &[i64] {
        &self.input
    }

    #[must_use]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    #[must_use]
    pub fn cursor(&self) -> isize {
        self.cursor
    }

    /// Bound trace, if any (`None` while `Idle`).
    #[must_use]
    pub fn trace(&self) -> Option<&Arc<Trace>> {
        self.trace.as_ref()
    }

    /// Step under the cursor; `None` at cursor `-1` or while `Idle`.
    #[must_use]
    pub fn current_step(&self) -> Option<&Step> {
        let index = usize::try_from(self.cursor).ok()?;
        self.trace.as_ref()?.step(index)
    }

    /// Index of the last step, if a trace is bound.
    #[must_use]
    pub fn last_index(&self) -> Option<isize> {
        self.trace
            .as_ref()
            .map(|t| isize::try_from(t.last_index()).unwrap_or(isize::MAX))
    }

    /// `true` while ticks should be scheduled.
    #[must_use]
    pub fn wants_tick(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    #[must_use]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    #[must_use]
    pub fn interval_policy(&self) -> IntervalPolicy {
        self.policy
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Ticks consumed while playing since the last start from the beginning.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Active play time since `start()`.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        let running = self
            .running_since
            .map(|since| self.clock.now_mono().saturating_sub(since))
            .unwrap_or(Duration::ZERO);
        self.banked + running
    }

    // ---- Operations ----

    /// Begin or resume playback.
    ///
    /// From `Idle` the trace is fetched through the cache; on failure the
    /// controller stays `Idle`. From `Finished` playback restarts at `-1`.
    /// From `Playing` this is a no-op.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        match self.status {
            PlaybackStatus::Playing => return Ok(()),
            PlaybackStatus::Idle => self.prepare()?,
            PlaybackStatus::Finished => {
                self.cursor = -1;
                self.restart_clock();
            }
            PlaybackStatus::Ready | PlaybackStatus::Paused => {}
        }
        self.running_since = Some(self.clock.now_mono());
        self.transition(PlaybackStatus::Playing);
        Ok(())
    }

    /// Bind the trace without playing: `Idle` becomes `Ready` at cursor `-1`,
    /// ready for manual stepping. A no-op once a trace is bound.
    pub fn prepare(&mut self) -> Result<(), PlaybackError> {
        if self.status != PlaybackStatus::Idle {
            return Ok(());
        }
        let trace = self
            .cache
            .get_or_generate(self.algorithm, &self.input)
            .inspect_err(|e| {
                tracing::warn!(
                    message = "playback.generation_failed",
                    algorithm = self.algorithm.key(),
                    error = %e
                );
            })?;
        tracing::debug!(
            message = "playback.bound",
            algorithm = self.algorithm.key(),
            steps = trace.len()
        );
        self.trace = Some(trace);
        self.cursor = -1;
        self.restart_clock();
        self.transition(PlaybackStatus::Ready);
        Ok(())
    }

    /// Halt auto-advance. Valid only while `Playing`.
    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        if self.status != PlaybackStatus::Playing {
            return Err(self.reject(PlaybackOp::Pause));
        }
        self.bank_running();
        self.transition(PlaybackStatus::Paused);
        Ok(())
    }

    /// Move one step forward. A no-op on the last step.
    pub fn step_forward(&mut self) -> Result<(), PlaybackError> {
        let last = self.stepping_bounds(PlaybackOp::StepForward)?;
        if self.cursor < last {
            self.move_to(self.cursor + 1, last);
        }
        Ok(())
    }

    /// Move one step back. A no-op at `-1`; leaves `Finished` for `Paused`.
    pub fn step_backward(&mut self) -> Result<(), PlaybackError> {
        let last = self.stepping_bounds(PlaybackOp::StepBackward)?;
        if self.cursor > -1 {
            self.move_to(self.cursor - 1, last);
        }
        Ok(())
    }

    /// Jump to `target`, clamped to `[-1, last]`.
    pub fn seek(&mut self, target: isize) -> Result<(), PlaybackError> {
        let last = self.stepping_bounds(PlaybackOp::Seek)?;
        self.move_to(target.clamp(-1, last), last);
        Ok(())
    }

    /// Seek to before the first step.
    pub fn jump_to_start(&mut self) -> Result<(), PlaybackError> {
        self.seek(-1)
    }

    /// Seek to the final step.
    pub fn jump_to_end(&mut self) -> Result<(), PlaybackError> {
        self.seek(isize::MAX)
    }

    /// Advance on a scheduler pulse.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != PlaybackStatus::Playing {
            tracing::trace!(message = "playback.tick_ignored", status = self.status.label());
            return TickOutcome::Ignored;
        }
        let Some(last) = self.last_index() else {
            return TickOutcome::Ignored;
        };
        self.ticks += 1;
        self.cursor = (self.cursor + 1).min(last);
        tracing::trace!(
            message = "playback.tick",
            algorithm = self.algorithm.key(),
            cursor = self.cursor
        );
        if self.cursor == last {
            self.bank_running();
            self.transition(PlaybackStatus::Finished);
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        }
    }

    /// Return to `Idle` from any state, dropping this controller's trace
    /// reference.
    ///
    /// The shared [`TraceCache`] keeps its entry, keyed by algorithm and
    /// input, so the next `start()` on the same input is a cache hit that
    /// yields the same immutable trace a regeneration would.
    pub fn reset(&mut self) {
        self.trace = None;
        self.cursor = -1;
        self.restart_clock();
        self.transition(PlaybackStatus::Idle);
    }

    /// Change speed in any state; the tick interval follows immediately.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
        self.tick_interval = self.policy.interval(speed);
        tracing::debug!(
            message = "playback.speed",
            speed = speed.get(),
            interval_ms = self.tick_interval.as_millis() as u64
        );
    }

    pub fn set_interval_policy(&mut self, policy: IntervalPolicy) {
        self.policy = policy;
        self.set_speed(self.speed);
    }

    /// Rebind to a new input; resets to `Idle`.
    pub fn set_input(&mut self, input: impl Into<Vec<i64>>) {
        self.reset();
        self.input = input.into();
    }

    /// Rebind to a new algorithm; resets to `Idle`.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.reset();
        self.algorithm = algorithm;
    }

    // ---- Internals ----

    fn stepping_bounds(&self, op: PlaybackOp) -> Result<isize, PlaybackError> {
        match self.last_index() {
            Some(last) if self.status.allows_stepping() => Ok(last),
            _ => Err(self.reject(op)),
        }
    }

    /// Place the cursor and derive the status from it.
    fn move_to(&mut self, cursor: isize, last: isize) {
        self.cursor = cursor;
        if cursor == last {
            self.transition(PlaybackStatus::Finished);
        } else if self.status == PlaybackStatus::Finished {
            self.transition(PlaybackStatus::Paused);
        }
    }

    fn restart_clock(&mut self) {
        self.ticks = 0;
        self.banked = Duration::ZERO;
        self.running_since = None;
    }

    fn bank_running(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.banked += self.clock.now_mono().saturating_sub(since);
        }
    }

    fn transition(&mut self, to: PlaybackStatus) {
        if self.status != to {
            tracing::debug!(
                message = "playback.transition",
                algorithm = self.algorithm.key(),
                from = self.status.label(),
                to = to.label(),
                cursor = self.cursor
            );
        }
        self.status = to;
    }

    fn reject(&self, op: PlaybackOp) -> PlaybackError {
        tracing::warn!(
            message = "playback.invalid_transition",
            op = op.name(),
            status = self.status.label()
        );
        PlaybackError::InvalidTransition {
            op,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn controller(input: &[i64]) -> PlaybackController {
        PlaybackController::new(Algorithm::Bubble, input.to_vec())
    }

    fn drain(c: &mut PlaybackController) -> usize {
        let mut n = 0;
        while c.tick() != TickOutcome::Ignored {
            n += 1;
        }
        n
    }

    #[test]
    fn starts_idle_without_trace() {
        let c = controller(&[2, 1]);
        assert_eq!(c.status(), PlaybackStatus::Idle);
        assert_eq!(c.cursor(), -1);
        assert!(c.trace().is_none());
        assert!(c.current_step().is_none());
        assert!(!c.wants_tick());
    }

    #[test]
    fn start_binds_trace_and_plays() {
        let mut c = controller(&[2, 1]);
        c.start().unwrap();
        assert_eq!(c.status(), PlaybackStatus::Playing);
        assert_eq!(c.cursor(), -1);
        assert!(c.wants_tick());
        assert!(c.trace().is_some());
    }

    #[test]
    fn ticks_run_to_finished() {
        let mut c = controller(&[3, 1, 2]);
        c.start().unwrap();
        let steps = c.trace().unwrap().len();
        assert_eq!(drain(&mut c), steps);
        assert_eq!(c.status(), PlaybackStatus::Finished);
        assert_eq!(c.cursor(), c.last_index().unwrap());
        assert!(!c.wants_tick());
        assert_eq!(c.ticks(), steps as u64);
    }

    #[test]
    fn pause_only_from_playing() {
        let mut c = controller(&[2, 1]);
        assert!(matches!(
            c.pause(),
            Err(PlaybackError::InvalidTransition {
                op: PlaybackOp::Pause,
                status: PlaybackStatus::Idle
            })
        ));
        c.start().unwrap();
        c.pause().unwrap();
        assert_eq!(c.status(), PlaybackStatus::Paused);
        assert_eq!(c.tick(), TickOutcome::Ignored);
        assert!(c.pause().is_err());
    }

    #[test]
    fn stepping_rejected_while_idle_or_playing() {
        let mut c = controller(&[2, 1]);
        assert!(c.step_forward().is_err());
        c.start().unwrap();
        let err = c.step_backward().unwrap_err();
        assert!(matches!(
            err,
            PlaybackError::InvalidTransition {
                status: PlaybackStatus::Playing,
                ..
            }
        ));
        assert_eq!(c.cursor(), -1);
    }

    #[test]
    fn step_bounds_are_no_ops() {
        let mut c = controller(&[2, 1]);
        c.start().unwrap();
        c.pause().unwrap();
        c.step_backward().unwrap();
        assert_eq!(c.cursor(), -1);

        c.jump_to_end().unwrap();
        assert_eq!(c.status(), PlaybackStatus::Finished);
        let last = c.cursor();
        c.step_forward().unwrap();
        assert_eq!(c.cursor(), last);
        assert_eq!(c.status(), PlaybackStatus::Finished);
    }

    #[test]
    fn prepare_binds_for_manual_stepping() {
        let mut c = controller(&[3, 1, 2]);
        c.prepare().unwrap();
        assert_eq!(c.status(), PlaybackStatus::Ready);
        assert_eq!(c.cursor(), -1);
        assert_eq!(c.tick(), TickOutcome::Ignored);
        c.step_forward().unwrap();
        assert_eq!(c.cursor(), 0);
        assert_eq!(c.status(), PlaybackStatus::Ready);

        c.prepare().unwrap();
        assert_eq!(c.cursor(), 0);
        c.start().unwrap();
        assert_eq!(c.status(), PlaybackStatus::Playing);
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn restart_after_reset_reuses_the_cached_trace() {
        let cache = Arc::new(TraceCache::new());
        let mut c = controller(&[3, 1, 2]).with_cache(Arc::clone(&cache));
        c.start().unwrap();
        let first = Arc::clone(c.trace().unwrap());
        c.reset();
        assert!(c.trace().is_none());
        c.start().unwrap();
        assert!(Arc::ptr_eq(&first, c.trace().unwrap()));
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 1);

        c.set_input(vec![2, 1]);
        c.start().unwrap();
        assert_eq!(cache.stats().misses, 2);
        assert!(c.current_step().is_none());
    }

    #[test]
    fn stepping_back_from_finished_pauses() {
        let mut c = controller(&[2, 1]);
        c.start().unwrap();
        drain(&mut c);
        c.step_backward().unwrap();
        assert_eq!(c.status(), PlaybackStatus::Paused);
        c.step_forward().unwrap();
        assert_eq!(c.status(), PlaybackStatus::Finished);
    }

    #[test]
    fn seek_clamps_and_derives_status() {
        let mut c = controller(&[4, 3, 2, 1]);
        c.start().unwrap();
        c.pause().unwrap();
        c.seek(-40).unwrap();
        assert_eq!(c.cursor(), -1);
        c.seek(2).unwrap();
        assert_eq!(c.cursor(), 2);
        assert_eq!(c.status(), PlaybackStatus::Paused);
        c.seek(10_000).unwrap();
        assert_eq!(c.status(), PlaybackStatus::Finished);
        c.jump_to_start().unwrap();
        assert_eq!(c.status(), PlaybackStatus::Paused);
        assert!(c.current_step().is_none());
    }

    #[test]
    fn current_step_follows_cursor() {
        let mut c = controller(&[2, 1]);
        c.start().unwrap();
        c.tick();
        let first = c.current_step().unwrap();
        assert_eq!(first.values(), vec![2, 1]);
        drain(&mut c);
        assert_eq!(c.current_step().unwrap().values(), vec![1, 2]);
    }

    #[test]
    fn replay_after_finished_rewinds() {
        let mut c = controller(&[2, 1]);
        c.start().unwrap();
        drain(&mut c);
        c.start().unwrap();
        assert_eq!(c.status(), PlaybackStatus::Playing);
        assert_eq!(c.cursor(), -1);
        assert_eq!(c.ticks(), 0);
    }

    #[test]
    fn resume_does_not_regenerate() {
        let cache = Arc::new(TraceCache::new());
        let mut c = controller(&[2, 1]).with_cache(Arc::clone(&cache));
        c.start().unwrap();
        c.tick();
        c.pause().unwrap();
        c.start().unwrap();
        assert_eq!(c.cursor(), 0);
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn reset_returns_to_idle_from_anywhere() {
        let mut c = controller(&[2, 1]);
        c.start().unwrap();
        c.tick();
        c.reset();
        assert_eq!(c.status(), PlaybackStatus::Idle);
        assert_eq!(c.cursor(), -1);
        assert!(c.trace().is_none());
        assert_eq!(c.elapsed(), Duration::ZERO);
    }

    #[test]
    fn failed_generation_stays_idle() {
        let mut c = PlaybackController::new(Algorithm::Radix, vec![-3, 5, 2]);
        let err = c.start().unwrap_err();
        assert!(matches!(err, PlaybackError::Generation(_)));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(c.status(), PlaybackStatus::Idle);
    }

    #[test]
    fn empty_input_finishes_on_first_tick() {
        let mut c = controller(&[]);
        c.start().unwrap();
        assert_eq!(c.tick(), TickOutcome::Finished);
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn rebinding_resets() {
        let mut c = controller(&[2, 1]);
        c.start().unwrap();
        c.set_algorithm(Algorithm::Heap);
        assert_eq!(c.status(), PlaybackStatus::Idle);
        c.start().unwrap();
        assert_eq!(c.trace().unwrap().algorithm(), Algorithm::Heap);
        c.set_input(vec![9, 8, 7]);
        assert_eq!(c.status(), PlaybackStatus::Idle);
        assert_eq!(c.input(), &[9, 8, 7]);
    }

    #[test]
    fn speed_changes_interval_in_any_state() {
        let mut c = controller(&[2, 1]);
        c.set_speed(Speed::MAX);
        assert_eq!(c.tick_interval(), Duration::from_millis(200));
        c.start().unwrap();
        c.set_speed(Speed::MIN);
        assert_eq!(c.tick_interval(), Duration::from_millis(1820));
        assert_eq!(c.status(), PlaybackStatus::Playing);
    }

    #[test]
    fn elapsed_freezes_while_paused_and_at_finish() {
        let clock = ManualClock::new();
        let mut c = controller(&[2, 1]).with_clock(Arc::new(clock.clone()));
        c.start().unwrap();
        clock.advance_ms(300);
        c.pause().unwrap();
        clock.advance_ms(5_000);
        assert_eq!(c.elapsed(), Duration::from_millis(300));

        c.start().unwrap();
        clock.advance_ms(200);
        assert_eq!(c.elapsed(), Duration::from_millis(500));
        drain(&mut c);
        clock.advance_ms(1_000);
        assert_eq!(c.elapsed(), Duration::from_millis(500));
    }

    #[tracing_test::traced_test]
    #[test]
    fn invalid_transition_is_logged() {
        let mut c = controller(&[2, 1]);
        assert!(c.pause().is_err());
        assert!(logs_contain("playback.invalid_transition"));
    }

    #[test]
    fn error_display_names_op_and_status() {
        let err = PlaybackError::InvalidTransition {
            op: PlaybackOp::StepForward,
            status: PlaybackStatus::Playing,
        };
        assert_eq!(err.to_string(), "cannot step_forward while playing");
    }
}
