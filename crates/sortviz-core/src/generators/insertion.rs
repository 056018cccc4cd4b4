#![forbid(unsafe_code)]

//! Insertion sort.
//!
//! The key travels left by swapping with each larger neighbour, which is the
//! same sequence of shifts as the textbook version but keeps every snapshot a
//! permutation of the input. Each evaluation of `arr[j] > key` with `j >= 0`
//! counts as one comparison, including the one that stops the scan; running
//! off the left edge is not a comparison.

use crate::algorithm::Algorithm;
use crate::error::TraceError;
use crate::step::{Role, StepEvent, Var};
use crate::trace::{StepDraft, Tally, Trace};

pub fn generate(input: &[i64]) -> Result<Trace, TraceError> {
    Ok(super::run(
        Algorithm::Insertion,
        input,
        "Insertion sort grows a sorted prefix, inserting each next value where it belongs.",
        |rec| {
            let n = rec.len();
            let mut tally = Tally::ZERO;
            rec.push(
                StepDraft::new(StepEvent::Mark)
                    .highlight(Role::Sorted, [0])
                    .line(2)
                    .describe("A single element is already a sorted prefix."),
            );
            for i in 1..n {
                let key = rec.value(i);
                rec.push(
                    StepDraft::new(StepEvent::Inspect)
                        .highlight(Role::Comparing, [i])
                        .highlight(Role::Sorted, 0..i)
                        .var(Var::I, i)
                        .var(Var::J, i - 1)
                        .line(3)
                        .describe(format!(
                            "Take {key} from position {i} and find its place among positions 0..{}.",
                            i - 1
                        )),
                );
                let mut hole = i;
                while hole > 0 {
                    let scan = hole - 1;
                    let scanned = rec.value(scan);
                    tally += rec.push(
                        StepDraft::new(StepEvent::Compare)
                            .highlight(Role::Comparing, [scan, hole])
                            .var(Var::I, i)
                            .var(Var::J, scan)
                            .line(5)
                            .describe(format!("Is {scanned} > {key}?")),
                    );
                    if scanned <= key {
                        break;
                    }
                    rec.swap(scan, hole);
                    tally += rec.push(
                        StepDraft::new(StepEvent::Swap)
                            .highlight(Role::Swapping, [scan, hole])
                            .var(Var::I, i)
                            .var(Var::J, scan)
                            .line(6)
                            .describe(format!(
                                "Shift {scanned} one place right to make room for {key}."
                            )),
                    );
                    hole = scan;
                }
                rec.push(
                    StepDraft::new(StepEvent::Mark)
                        .highlight(Role::Sorted, 0..=i)
                        .var(Var::I, i)
                        .line(8)
                        .describe(format!(
                            "Inserted {key} at position {hole}; the first {} elements are sorted.",
                            i + 1
                        )),
                );
            }
            tally
        },
    ))
}
