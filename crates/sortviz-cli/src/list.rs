use std::io::Write;

use serde::Serialize;
use sortviz_core::Algorithm;

use crate::error::Result;

#[derive(Debug, Serialize)]
struct AlgorithmRow {
    key: &'static str,
    name: &'static str,
    stable: bool,
    accepts_negative: bool,
}

impl From<Algorithm> for AlgorithmRow {
    fn from(alg: Algorithm) -> Self {
        Self {
            key: alg.key(),
            name: alg.name(),
            stable: alg.is_stable(),
            accepts_negative: alg.accepts_negative(),
        }
    }
}

pub fn run_list(out: &mut impl Write, json: bool) -> Result<()> {
    let rows: Vec<AlgorithmRow> = Algorithm::ALL.into_iter().map(AlgorithmRow::from).collect();
    if json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }
    for row in &rows {
        let stability = if row.stable { "stable" } else { "unstable" };
        let note = if row.accepts_negative {
            ""
        } else {
            "  (non-negative only)"
        };
        writeln!(out, "{:<10} {:<15} {stability}{note}", row.key, row.name)?;
    }
    Ok(())
}
