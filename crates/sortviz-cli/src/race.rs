use std::io::Write;

use clap::Args;
use serde::Serialize;
use sortviz_core::Algorithm;
use sortviz_runtime::{Lane, LaneResult, Race, RaceOutcome};

use crate::error::Result;
use crate::source::{InputArgs, TimingArgs};

#[derive(Debug, Clone, Args)]
pub struct RaceArgs {
    #[arg(long)]
    pub left: Algorithm,

    #[arg(long)]
    pub right: Algorithm,

    #[command(flatten)]
    pub source: InputArgs,

    #[command(flatten)]
    pub timing: TimingArgs,

    /// Score without waiting out the tick interval.
    #[arg(long)]
    pub instant: bool,
}

#[derive(Debug, Serialize)]
struct LaneReport {
    lane: &'static str,
    algorithm: &'static str,
    ticks: u64,
    elapsed_ms: u64,
    comparisons: u64,
    swaps: u64,
    score: f64,
}

impl LaneReport {
    fn new(lane: Lane, result: &LaneResult) -> Self {
        Self {
            lane: lane.label(),
            algorithm: result.algorithm.key(),
            ticks: result.ticks,
            elapsed_ms: result.elapsed.as_millis() as u64,
            comparisons: result.comparisons,
            swaps: result.swaps,
            score: result.score,
        }
    }
}

#[derive(Debug, Serialize)]
struct RaceReport {
    input: Vec<i64>,
    interval_ms: u64,
    left: LaneReport,
    right: LaneReport,
    winner: Option<&'static str>,
}

/// Race two algorithms over the same input and print the scored outcome.
pub fn run_race(args: &RaceArgs, out: &mut impl Write, json: bool) -> Result<()> {
    let input = args.source.resolve()?;
    let config = args.timing.resolve()?;
    let mut race = Race::new(args.left, args.right, input.clone())
        .with_interval_policy(config.interval)
        .with_speed(config.speed())
        .with_weights(config.weights);
    tracing::info!(
        message = "cli.race",
        left = args.left.key(),
        right = args.right.key(),
        instant = args.instant,
        interval_ms = race.interval().as_millis() as u64
    );

    let outcome = if args.instant {
        race.run_instant()?
    } else {
        let mut progress_error = None;
        let outcome = race.run_to_end(|race| {
            if json || progress_error.is_some() {
                return;
            }
            let left = race.lane(Lane::Left);
            let right = race.lane(Lane::Right);
            if let Err(e) = writeln!(
                out,
                "left {}/{}  right {}/{}",
                left.cursor() + 1,
                left.last_index().unwrap_or(-1) + 1,
                right.cursor() + 1,
                right.last_index().unwrap_or(-1) + 1
            ) {
                progress_error = Some(e);
            }
        })?;
        if let Some(e) = progress_error {
            return Err(e.into());
        }
        outcome
    };

    let report = RaceReport {
        input,
        interval_ms: race.interval().as_millis() as u64,
        left: LaneReport::new(Lane::Left, &outcome.left),
        right: LaneReport::new(Lane::Right, &outcome.right),
        winner: outcome.winner.map(Lane::label),
    };
    write_report(out, &report, &outcome, json)
}

fn write_report(
    out: &mut impl Write,
    report: &RaceReport,
    outcome: &RaceOutcome,
    json: bool,
) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        return Ok(());
    }
    for lane in [&report.left, &report.right] {
        writeln!(
            out,
            "{:<5}  {:<10} ticks={:<4} elapsed={}ms comparisons={} swaps={} score={:.1}",
            lane.lane,
            lane.algorithm,
            lane.ticks,
            lane.elapsed_ms,
            lane.comparisons,
            lane.swaps,
            lane.score
        )?;
    }
    match outcome.winner {
        Some(lane) => writeln!(out, "winner: {lane} ({})", outcome.lane(lane).algorithm)?,
        None => writeln!(out, "tie")?,
    }
    Ok(())
}
