#![forbid(unsafe_code)]

//! Quick sort with Lomuto partitioning (pivot = last element of the range).

use crate::algorithm::Algorithm;
use crate::error::TraceError;
use crate::step::{Role, StepEvent, Var};
use crate::trace::{StepDraft, Tally, Trace, TraceRecorder};

pub fn generate(input: &[i64]) -> Result<Trace, TraceError> {
    Ok(super::run(
        Algorithm::Quick,
        input,
        "Quick sort picks a pivot, partitions smaller values to its left and larger to its right, then recurses.",
        |rec| {
            let last = rec.len() - 1;
            sort_range(rec, 0, last)
        },
    ))
}

fn sort_range(rec: &mut TraceRecorder, low: usize, high: usize) -> Tally {
    if low >= high {
        return Tally::ZERO;
    }
    rec.push(
        StepDraft::new(StepEvent::Phase)
            .var(Var::Low, low)
            .var(Var::High, high)
            .line(2)
            .describe(format!("Sort the subarray at positions {low}..{high}.")),
    );

    let (pivot_at, mut tally) = partition(rec, low, high);
    rec.push(
        StepDraft::new(StepEvent::Mark)
            .highlight(Role::Sorted, [pivot_at])
            .var(Var::Low, low)
            .var(Var::High, high)
            .var(Var::Pivot, pivot_at)
            .line(4)
            .describe(format!(
                "Partition done: pivot {} is final at position {pivot_at}.",
                rec.value(pivot_at)
            )),
    );

    if pivot_at > low {
        tally += sort_range(rec, low, pivot_at - 1);
    }
    tally += sort_range(rec, pivot_at + 1, high);
    tally
}

/// Lomuto partition of `low..=high`; returns the pivot's resting index.
fn partition(rec: &mut TraceRecorder, low: usize, high: usize) -> (usize, Tally) {
    let pivot = rec.value(high);
    let mut tally = Tally::ZERO;
    // Next slot for a value smaller than the pivot (Lomuto's `i + 1`).
    let mut store = low;

    rec.push(
        StepDraft::new(StepEvent::Phase)
            .highlight(Role::Pivot, [high])
            .var(Var::Low, low)
            .var(Var::High, high)
            .var(Var::Pivot, high)
            .line(8)
            .describe(format!(
                "Pivot is {pivot}, the last element; smaller values go left, the rest go right."
            )),
    );

    for j in low..high {
        let value = rec.value(j);
        tally += rec.push(
            StepDraft::new(StepEvent::Compare)
                .highlight(Role::Comparing, [j])
                .highlight(Role::Pivot, [high])
                .highlight(Role::Left, low..store)
                .var(Var::Low, low)
                .var(Var::High, high)
                .var(Var::Pivot, high)
                .var(Var::J, j)
                .line(11)
                .describe(format!("Is {value} smaller than the pivot {pivot}?")),
        );
        if value < pivot {
            if store != j {
                rec.swap(store, j);
                tally += rec.push(
                    StepDraft::new(StepEvent::Swap)
                        .highlight(Role::Swapping, [store, j])
                        .highlight(Role::Pivot, [high])
                        .var(Var::Low, low)
                        .var(Var::High, high)
                        .var(Var::Pivot, high)
                        .var(Var::I, store)
                        .var(Var::J, j)
                        .line(13)
                        .describe(format!(
                            "{value} < {pivot}: swap it into the left side at position {store}."
                        )),
                );
            }
            store += 1;
        }
    }

    rec.swap(store, high);
    tally += rec.push(
        StepDraft::new(StepEvent::Swap)
            .highlight(Role::Swapping, [store, high])
            .highlight(Role::Pivot, [store])
            .var(Var::Low, low)
            .var(Var::High, high)
            .var(Var::Pivot, store)
            .line(16)
            .describe(format!(
                "Place the pivot {pivot} at position {store}; everything left of it is smaller."
            )),
    );
    (store, tally)
}
