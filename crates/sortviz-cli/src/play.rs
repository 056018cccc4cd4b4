use std::io::Write;

use clap::Args;
use serde::Serialize;
use sortviz_core::Algorithm;
use sortviz_runtime::{PlaybackController, PlaybackMetrics, Player};

use crate::error::{CliError, Result};
use crate::output::{TraceSummary, write_step, write_summary};
use crate::source::{InputArgs, TimingArgs};

#[derive(Debug, Clone, Args)]
pub struct PlayArgs {
    #[arg(long, short)]
    pub algorithm: Algorithm,

    #[command(flatten)]
    pub source: InputArgs,

    #[command(flatten)]
    pub timing: TimingArgs,
}

#[derive(Debug, Serialize)]
struct PlayReport {
    ticks: u64,
    interval_ms: u64,
    elapsed_ms: u64,
}

/// Play the trace in real time, printing each step as its tick arrives.
pub fn run_play(args: &PlayArgs, out: &mut impl Write, json: bool) -> Result<()> {
    let input = args.source.resolve()?;
    let config = args.timing.resolve()?;
    let controller = PlaybackController::new(args.algorithm, input)
        .with_interval_policy(config.interval)
        .with_speed(config.speed());
    tracing::info!(
        message = "cli.play",
        algorithm = args.algorithm.key(),
        speed = config.speed,
        interval_ms = config.tick_interval().as_millis() as u64
    );

    let mut player = Player::new(controller);
    let mut write_error = None;
    let metrics = player.run_to_end(|controller| {
        if write_error.is_some() {
            return;
        }
        let (Ok(index), Some(step)) = (
            usize::try_from(controller.cursor()),
            controller.current_step(),
        ) else {
            return;
        };
        if let Err(e) = write_step(&mut *out, index, step, json) {
            write_error = Some(e);
        }
    })?;
    if let Some(e) = write_error {
        return Err(e);
    }

    let trace = player
        .controller()
        .trace()
        .ok_or_else(|| CliError::invalid("playback finished without a trace"))?;
    write_summary(out, &TraceSummary::of(trace), json)?;
    write_report(out, &metrics, player.controller(), json)
}

fn write_report(
    out: &mut impl Write,
    metrics: &PlaybackMetrics,
    controller: &PlaybackController,
    json: bool,
) -> Result<()> {
    let report = PlayReport {
        ticks: metrics.ticks,
        interval_ms: controller.tick_interval().as_millis() as u64,
        elapsed_ms: metrics.elapsed.as_millis() as u64,
    };
    if json {
        serde_json::to_writer(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(
            out,
            "played {} ticks at {}ms in {}ms",
            report.ticks, report.interval_ms, report.elapsed_ms
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("fast.toml");
        std::fs::write(&path, "[interval]\nbase_ms = 2\nstep_ms = 0\nfloor_ms = 1\n").unwrap();
        path
    }

    #[test]
    fn plays_every_step_then_reports() {
        let dir = tempfile::tempdir().unwrap();
        let args = PlayArgs {
            algorithm: Algorithm::Selection,
            source: InputArgs {
                input: Some("3,1,2".into()),
                ..InputArgs::default()
            },
            timing: TimingArgs {
                speed: None,
                config: Some(fast_config(&dir)),
            },
        };
        let mut out = Vec::new();
        run_play(&args, &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let steps = sortviz_core::generate(Algorithm::Selection, &[3, 1, 2]).unwrap().len();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), steps + 2);
        assert!(lines[steps].starts_with("selection:"));
        assert!(lines[steps + 1].starts_with(&format!("played {steps} ticks at 2ms")));
    }

    #[test]
    fn rejected_input_fails_before_playing() {
        let args = PlayArgs {
            algorithm: Algorithm::Radix,
            source: InputArgs {
                input: Some("-4,2".into()),
                ..InputArgs::default()
            },
            timing: TimingArgs::default(),
        };
        let mut out = Vec::new();
        let err = run_play(&args, &mut out, false).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(out.is_empty());
    }
}
