//! End-to-end playback: real tick drivers, races and configured speeds.

use std::sync::Arc;
use std::time::Duration;

use sortviz_core::{Algorithm, SMALL_ARRAY, StepEvent};
use sortviz_runtime::{
    IntervalPolicy, Lane, ManualClock, PlaybackConfig, PlaybackController, PlaybackStatus, Player,
    Race, RunningTally, ScoreWeights, Speed, TraceCache,
};

const FAST: IntervalPolicy = IntervalPolicy {
    base_ms: 2,
    step_ms: 0,
    floor_ms: 1,
};

#[test]
fn player_runs_bubble_to_completion() {
    let mut player = Player::new(
        PlaybackController::new(Algorithm::Bubble, SMALL_ARRAY.to_vec()).with_interval_policy(FAST),
    );
    let mut running = RunningTally::new();
    let mut compares_seen = 0;
    let metrics = player
        .run_to_end(|c| {
            let trace = c.trace().unwrap();
            let tally = running.sync(trace, c.cursor());
            if c.current_step().map(|s| s.event()) == Some(StepEvent::Compare) {
                compares_seen += 1;
            }
            assert_eq!(tally.comparisons, compares_seen);
        })
        .unwrap();
    assert_eq!(metrics.comparisons, 10);
    assert_eq!(metrics.swaps, 4);
    assert_eq!(compares_seen, 10);
    let c = player.controller();
    assert_eq!(c.status(), PlaybackStatus::Finished);
    assert_eq!(c.current_step().unwrap().values(), vec![1, 2, 5, 8, 9]);
}

#[test]
fn finished_player_replays_from_the_start() {
    let mut player = Player::new(
        PlaybackController::new(Algorithm::Selection, vec![2, 1]).with_interval_policy(FAST),
    );
    let first = player.run_to_end(|_| {}).unwrap();
    let second = player.run_to_end(|_| {}).unwrap();
    assert_eq!(first.ticks, second.ticks);
    assert_eq!(player.controller().status(), PlaybackStatus::Finished);
}

#[test]
fn stepping_after_pause_resumes_cleanly() {
    let mut player = Player::new(
        PlaybackController::new(Algorithm::Insertion, SMALL_ARRAY.to_vec()).with_interval_policy(FAST),
    );
    player.play().unwrap();
    player.pause().unwrap();
    player.seek(2).unwrap();
    player.step_backward().unwrap();
    assert_eq!(player.controller().cursor(), 1);
    player.step_forward().unwrap();
    assert_eq!(player.controller().cursor(), 2);
    let metrics = player.run_to_end(|_| {}).unwrap();
    let last = player.controller().last_index().unwrap();
    assert_eq!(player.controller().cursor(), last);
    assert!(metrics.ticks <= (last + 1) as u64);
}

#[test]
fn real_time_race_matches_instant_race() {
    let cache = Arc::new(TraceCache::new());
    let mut timed = Race::with_cache(
        Algorithm::Bubble,
        Algorithm::Merge,
        SMALL_ARRAY.to_vec(),
        Arc::clone(&cache),
    )
    .with_interval_policy(FAST);
    let mut pulses = 0;
    let timed_outcome = timed.run_to_end(|_| pulses += 1).unwrap();

    let mut instant = Race::with_cache(
        Algorithm::Bubble,
        Algorithm::Merge,
        SMALL_ARRAY.to_vec(),
        Arc::clone(&cache),
    )
    .with_interval_policy(FAST);
    let instant_outcome = instant.run_instant().unwrap();

    assert_eq!(timed_outcome, instant_outcome);
    let longest = Lane::BOTH
        .iter()
        .map(|&lane| timed_outcome.lane(lane).ticks)
        .max()
        .unwrap();
    assert_eq!(pulses, longest);
    assert_eq!(cache.len(), 2);
}

#[test]
fn config_drives_speed_and_weights() {
    let config = PlaybackConfig {
        speed: 10,
        weights: ScoreWeights {
            time: 0.0,
            comparisons: 1.0,
            swaps: 0.0,
        },
        ..PlaybackConfig::default()
    };
    assert!(config.validate().is_empty());
    let mut race = Race::new(Algorithm::Bubble, Algorithm::Selection, vec![1, 2, 3, 4])
        .with_interval_policy(config.interval)
        .with_speed(config.speed())
        .with_weights(config.weights);
    assert_eq!(race.interval(), Duration::from_millis(200));
    let outcome = race.run_instant().unwrap();
    // Early-exit bubble needs one pass over sorted input.
    assert_eq!(outcome.left.comparisons, 3);
    assert_eq!(outcome.right.comparisons, 6);
    assert_eq!(outcome.winner, Some(Lane::Left));
}

#[test]
fn manual_clock_measures_only_play_time() {
    let clock = ManualClock::new();
    let mut c = PlaybackController::new(Algorithm::Heap, vec![3, 1, 2])
        .with_clock(Arc::new(clock.clone()))
        .with_speed(Speed::new(1));
    c.start().unwrap();
    clock.advance_ms(300);
    c.pause().unwrap();
    clock.advance_ms(10_000);
    c.start().unwrap();
    clock.advance_ms(200);
    assert_eq!(c.elapsed(), Duration::from_millis(500));
    c.reset();
    assert_eq!(c.elapsed(), Duration::ZERO);
}
