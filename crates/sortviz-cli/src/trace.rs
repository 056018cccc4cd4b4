use std::io::Write;

use clap::Args;
use sortviz_core::{Algorithm, generate};

use crate::error::Result;
use crate::output::{TraceSummary, write_step, write_summary};
use crate::source::InputArgs;

#[derive(Debug, Clone, Args)]
pub struct TraceArgs {
    /// Algorithm key or name, e.g. `quick` or "Quick Sort".
    #[arg(long, short)]
    pub algorithm: Algorithm,

    #[command(flatten)]
    pub source: InputArgs,
}

/// Print every step of the trace, then the totals.
pub fn run_trace(args: &TraceArgs, out: &mut impl Write, json: bool) -> Result<()> {
    let input = args.source.resolve()?;
    let trace = generate(args.algorithm, &input)?;
    tracing::info!(
        message = "cli.trace",
        algorithm = args.algorithm.key(),
        len = input.len(),
        steps = trace.len()
    );
    for (index, step) in trace.steps().iter().enumerate() {
        write_step(out, index, step, json)?;
    }
    write_summary(out, &TraceSummary::of(&trace), json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    fn args(algorithm: Algorithm, input: &str) -> TraceArgs {
        TraceArgs {
            algorithm,
            source: InputArgs {
                input: Some(input.into()),
                ..InputArgs::default()
            },
        }
    }

    #[test]
    fn prints_one_line_per_step_plus_summary() {
        let mut out = Vec::new();
        run_trace(&args(Algorithm::Insertion, "3,1,2"), &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let steps = generate(Algorithm::Insertion, &[3, 1, 2]).unwrap().len();
        assert_eq!(text.lines().count(), steps + 1);
        assert!(text.lines().last().unwrap().starts_with("insertion:"));
    }

    #[test]
    fn json_lines_end_with_summary() {
        let mut out = Vec::new();
        run_trace(&args(Algorithm::Merge, "4,3,2,1"), &mut out, true).unwrap();
        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        let summary = lines.last().unwrap();
        assert_eq!(summary["algorithm"], "merge");
        assert_eq!(summary["sorted"], serde_json::json!([1, 2, 3, 4]));
        assert_eq!(summary["steps"], lines.len() - 1);
    }

    #[test]
    fn radix_rejects_negative_input() {
        let mut out = Vec::new();
        let err = run_trace(&args(Algorithm::Radix, "3,-1"), &mut out, false).unwrap_err();
        assert!(matches!(err, CliError::Trace(_)));
        assert!(out.is_empty());
    }
}
