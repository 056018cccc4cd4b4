#![forbid(unsafe_code)]

//! LSD radix sort, base 10, non-negative integers only.
//!
//! Each pass buckets elements by one digit with a stable counting sort. The
//! output order is computed up front, then elements are placed front to back
//! by swapping each into its slot; every placement counts as one swap,
//! so a pass always costs exactly `n`. Radix sort never compares values.

use crate::algorithm::Algorithm;
use crate::element::ElementId;
use crate::error::TraceError;
use crate::step::{Role, StepEvent, Var};
use crate::trace::{StepDraft, Tally, Trace, TraceRecorder};

const BASE: i64 = 10;

pub fn generate(input: &[i64]) -> Result<Trace, TraceError> {
    if let Some((index, &value)) = input.iter().enumerate().find(|(_, v)| **v < 0) {
        tracing::warn!(message = "radix.negative_input", index, value);
        return Err(TraceError::InvalidInput {
            algorithm: Algorithm::Radix,
            index,
            value,
        });
    }

    Ok(super::run(
        Algorithm::Radix,
        input,
        "Radix sort orders the values digit by digit, from the ones place upward.",
        |rec| {
            let max = (0..rec.len()).map(|i| rec.value(i)).max().unwrap_or(0);
            rec.push(
                StepDraft::new(StepEvent::Phase)
                    .line(1)
                    .describe(format!("The largest value is {max}; one pass per digit.")),
            );

            let mut tally = Tally::ZERO;
            let mut place: i64 = 1;
            while max / place > 0 {
                tally += counting_pass(rec, place);
                match place.checked_mul(BASE) {
                    Some(next) => place = next,
                    None => break,
                }
            }
            tally
        },
    ))
}

fn place_name(place: i64) -> String {
    match place {
        1 => "ones".to_string(),
        10 => "tens".to_string(),
        100 => "hundreds".to_string(),
        1_000 => "thousands".to_string(),
        _ => format!("10^{}", place.ilog10()),
    }
}

fn digit(value: i64, place: i64) -> usize {
    // Non-negative by the entry check, so the digit is 0..=9.
    ((value / place) % BASE) as usize
}

fn counting_pass(rec: &mut TraceRecorder, place: i64) -> Tally {
    let n = rec.len();
    let name = place_name(place);
    let mut tally = Tally::ZERO;

    rec.push(
        StepDraft::new(StepEvent::Phase)
            .line(3)
            .describe(format!("Sorting by {name} place.")),
    );

    let mut counts = [0usize; BASE as usize];
    for i in 0..n {
        let value = rec.value(i);
        let d = digit(value, place);
        counts[d] += 1;
        rec.push(
            StepDraft::new(StepEvent::Inspect)
                .highlight(Role::Comparing, [i])
                .var(Var::I, i)
                .line(5)
                .describe(format!("{value} has digit {d} in the {name} place.")),
        );
    }

    for d in 1..counts.len() {
        counts[d] += counts[d - 1];
    }
    rec.push(
        StepDraft::new(StepEvent::Phase)
            .line(8)
            .describe(format!("Building output: bucket ends are {counts:?}.")),
    );

    // Stable: walk from the back, filling each bucket from its end.
    let mut order: Vec<Option<ElementId>> = vec![None; n];
    for i in (0..n).rev() {
        let element = rec.element(i);
        let d = digit(element.value, place);
        counts[d] -= 1;
        order[counts[d]] = Some(element.id);
    }

    for (target, id) in order.into_iter().enumerate() {
        let from = id.and_then(|id| rec.position_of(id)).unwrap_or(target);
        if from != target {
            rec.swap(target, from);
        }
        tally += rec.push(
            StepDraft::new(StepEvent::Swap)
                .highlight(Role::Swapping, [target, from])
                .var(Var::K, target)
                .line(10)
                .describe(format!(
                    "Place {} at position {target}.",
                    rec.value(target)
                )),
        );
    }

    rec.push(
        StepDraft::new(StepEvent::Phase)
            .highlight(Role::Sorted, 0..n)
            .line(12)
            .describe(format!("Completed sorting by {name} place.")),
    );
    tally
}
