#![forbid(unsafe_code)]

//! Bubble sort with early exit.

use crate::algorithm::Algorithm;
use crate::error::TraceError;
use crate::step::{Role, StepEvent, Var};
use crate::trace::{StepDraft, Tally, Trace};

pub fn generate(input: &[i64]) -> Result<Trace, TraceError> {
    Ok(super::run(
        Algorithm::Bubble,
        input,
        "Bubble sort walks the array comparing neighbours; each pass carries the largest remaining value to the end.",
        |rec| {
            let n = rec.len();
            let mut tally = Tally::ZERO;
            for i in 0..n.saturating_sub(1) {
                let mut swapped = false;
                for j in 0..n - i - 1 {
                    let (a, b) = (rec.value(j), rec.value(j + 1));
                    tally += rec.push(
                        StepDraft::new(StepEvent::Compare)
                            .highlight(Role::Comparing, [j, j + 1])
                            .highlight(Role::Sorted, n - i..n)
                            .var(Var::I, i)
                            .var(Var::J, j)
                            .line(4)
                            .describe(format!(
                                "Compare position {j} ({a}) with position {} ({b}).",
                                j + 1
                            )),
                    );
                    if a > b {
                        rec.swap(j, j + 1);
                        swapped = true;
                        tally += rec.push(
                            StepDraft::new(StepEvent::Swap)
                                .highlight(Role::Swapping, [j, j + 1])
                                .highlight(Role::Sorted, n - i..n)
                                .var(Var::I, i)
                                .var(Var::J, j)
                                .line(5)
                                .describe(format!("{a} > {b}: swap them so {b} moves left.")),
                        );
                    }
                }
                rec.push(
                    StepDraft::new(StepEvent::Mark)
                        .highlight(Role::Sorted, n - 1 - i..n)
                        .var(Var::I, i)
                        .var(Var::J, n - i - 1)
                        .line(2)
                        .describe(format!(
                            "Pass {} done: {} has settled at position {}.",
                            i + 1,
                            rec.value(n - 1 - i),
                            n - 1 - i
                        )),
                );
                if !swapped {
                    rec.push(
                        StepDraft::new(StepEvent::Mark)
                            .highlight(Role::Sorted, 0..n)
                            .var(Var::I, i)
                            .line(2)
                            .describe(format!(
                                "Pass {} made no swaps, so the rest of the array is already in order.",
                                i + 1
                            )),
                    );
                    break;
                }
            }
            tally
        },
    ))
}
