#![forbid(unsafe_code)]

//! Sortviz Runtime
//!
//! Replays precomputed [`sortviz_core::Trace`]s: a playback state machine, a
//! background tick driver, two-lane racing and the metrics read over them.
//!
//! # Key Components
//!
//! - [`PlaybackController`] - Cursor over one trace; start/pause/step/seek/reset
//! - [`TickDriver`] - Background thread emitting [`Pulse`]s at a fixed interval
//! - [`Player`] - Controller plus driver with synchronous cancellation
//! - [`Race`] - Two controllers on one shared pulse source, scored with [`ScoreWeights`]
//! - [`TraceCache`] - Generates each (algorithm, input) trace once, shares it as `Arc<Trace>`
//! - [`PlaybackMetrics`] / [`RunningTally`] - Totals, running counts and elapsed play time
//! - [`PlaybackConfig`] - Speed, interval and weight tuning, loadable with the `config` feature

pub mod cache;
pub mod clock;
pub mod config;
pub mod metrics;
pub mod playback;
pub mod race;
pub mod scheduler;
pub mod speed;

pub use cache::{CacheStats, TraceCache};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{PlaybackConfig, PlaybackConfigError};
pub use metrics::{PlaybackMetrics, RaceMetrics, RunningTally, ScoreWeights};
pub use playback::{PlaybackController, PlaybackError, PlaybackOp, PlaybackStatus, TickOutcome};
pub use race::{Lane, LaneResult, Race, RaceOutcome};
pub use scheduler::{Player, Pulse, TickDriver};
pub use speed::{IntervalPolicy, Speed};
