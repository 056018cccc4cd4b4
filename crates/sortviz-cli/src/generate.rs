use std::io::Write;

use clap::Args;
use sortviz_core::ArrayKind;

use crate::error::Result;
use crate::output::join;
use crate::source::{DEFAULT_SIZE, MAX_SIZE, generate};

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Array shape: random, sorted, reversed, nearly-sorted.
    #[arg(long, default_value = "random")]
    pub kind: ArrayKind,

    #[arg(long, default_value_t = DEFAULT_SIZE, value_parser = clap::value_parser!(u16).range(1..=MAX_SIZE))]
    pub size: u16,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Print one array, comma separated so it can be fed back through `--input`.
pub fn run_generate(args: &GenerateArgs, out: &mut impl Write, json: bool) -> Result<()> {
    let values = generate(usize::from(args.size), args.kind, args.seed);
    if json {
        serde_json::to_writer(&mut *out, &values)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", join(&values))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortviz_core::{is_sorted, parse_custom};

    fn args(kind: ArrayKind, size: u16) -> GenerateArgs {
        GenerateArgs {
            kind,
            size,
            seed: Some(42),
        }
    }

    #[test]
    fn text_output_round_trips_through_parse() {
        let mut out = Vec::new();
        run_generate(&args(ArrayKind::Sorted, 15), &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let values = parse_custom(text.trim()).unwrap();
        assert_eq!(values.len(), 15);
        assert!(is_sorted(&values));
    }

    #[test]
    fn json_output_is_an_array() {
        let mut out = Vec::new();
        run_generate(&args(ArrayKind::Random, 30), &mut out, true).unwrap();
        let values: Vec<i64> = serde_json::from_slice(&out).unwrap();
        assert_eq!(values.len(), 30);
        assert!(values.iter().all(|v| (1..=100).contains(v)));
    }
}
