//! Text and JSON-lines rendering shared by the trace and play commands.

use std::io::Write;

use serde::Serialize;
use sortviz_core::{Step, Trace};

use crate::error::Result;

#[derive(Debug, Serialize)]
struct StepLine<'a> {
    index: usize,
    step: &'a Step,
}

/// Whole-trace totals printed after the steps.
#[derive(Debug, Serialize)]
pub struct TraceSummary {
    pub algorithm: &'static str,
    pub input: Vec<i64>,
    pub sorted: Vec<i64>,
    pub steps: usize,
    pub comparisons: u64,
    pub swaps: u64,
}

impl TraceSummary {
    #[must_use]
    pub fn of(trace: &Trace) -> Self {
        let totals = trace.totals();
        Self {
            algorithm: trace.algorithm().key(),
            input: trace.input().to_vec(),
            sorted: trace.final_values(),
            steps: trace.len(),
            comparisons: totals.comparisons,
            swaps: totals.swaps,
        }
    }
}

pub fn write_step(out: &mut impl Write, index: usize, step: &Step, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, &StepLine { index, step })?;
        writeln!(out)?;
    } else {
        writeln!(
            out,
            "{index:>4}  {:<7}  {}  {}",
            step.event().label(),
            join(&step.values()),
            step.description()
        )?;
    }
    Ok(())
}

pub fn write_summary(out: &mut impl Write, summary: &TraceSummary, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, summary)?;
        writeln!(out)?;
    } else {
        writeln!(
            out,
            "{}: {} steps, {} comparisons, {} swaps",
            summary.algorithm, summary.steps, summary.comparisons, summary.swaps
        )?;
    }
    Ok(())
}

/// `[5, 2, 8]` rendered as `5,2,8`, the format `--input` accepts.
#[must_use]
pub fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
