#![forbid(unsafe_code)]

//! Top-down merge sort.
//!
//! Merging is done in place by rotation: while both halves are non-empty the
//! unmerged left run sits at `k..` and the unmerged right run right after it.
//! Taking from the left leaves the element where it is; taking from the
//! right rotates that element down to `k`. Either way one placement is
//! recorded, matching the write count of a buffer-based merge.

use crate::algorithm::Algorithm;
use crate::error::TraceError;
use crate::step::{Role, StepEvent, Var};
use crate::trace::{StepDraft, Tally, Trace, TraceRecorder};

pub fn generate(input: &[i64]) -> Result<Trace, TraceError> {
    Ok(super::run(
        Algorithm::Merge,
        input,
        "Merge sort splits the array in halves, sorts each half, then merges the sorted halves.",
        |rec| {
            let last = rec.len() - 1;
            sort_range(rec, 0, last)
        },
    ))
}

fn sort_range(rec: &mut TraceRecorder, left: usize, right: usize) -> Tally {
    if left >= right {
        return Tally::ZERO;
    }
    let mid = (left + right) / 2;
    rec.push(
        StepDraft::new(StepEvent::Phase)
            .highlight(Role::Left, left..=mid)
            .highlight(Role::Right, mid + 1..=right)
            .var(Var::Left, left)
            .var(Var::Mid, mid)
            .var(Var::Right, right)
            .line(3)
            .describe(format!(
                "Divide: split positions {left}..{right} at {mid} and sort each half."
            )),
    );

    let mut tally = sort_range(rec, left, mid);
    tally += sort_range(rec, mid + 1, right);
    tally += merge(rec, left, mid, right);

    rec.push(
        StepDraft::new(StepEvent::Mark)
            .highlight(Role::Sorted, left..=right)
            .var(Var::Left, left)
            .var(Var::Mid, mid)
            .var(Var::Right, right)
            .line(6)
            .describe(format!(
                "Conquer: positions {left}..{right} are merged and sorted."
            )),
    );
    tally
}

fn merge(rec: &mut TraceRecorder, left: usize, mid: usize, right: usize) -> Tally {
    let left_len = mid - left + 1;
    let right_len = right - mid;
    let (mut taken_left, mut taken_right) = (0, 0);
    let mut tally = Tally::ZERO;

    let frame = |draft: StepDraft, k: usize| {
        draft
            .var(Var::Left, left)
            .var(Var::Mid, mid)
            .var(Var::Right, right)
            .var(Var::K, k)
            .highlight(Role::Sorted, left..k)
    };

    while taken_left < left_len && taken_right < right_len {
        let k = left + taken_left + taken_right;
        let right_head = mid + 1 + taken_right;
        let (a, b) = (rec.value(k), rec.value(right_head));
        tally += rec.push(
            frame(StepDraft::new(StepEvent::Compare), k)
                .highlight(Role::Comparing, [k, right_head])
                .var(Var::I, k)
                .var(Var::J, right_head)
                .line(8)
                .describe(format!("Merging: compare {a} with {b}.")),
        );
        if a <= b {
            taken_left += 1;
        } else {
            rec.rotate_into(k, right_head);
            taken_right += 1;
        }
        tally += rec.push(
            frame(StepDraft::new(StepEvent::Swap), k)
                .highlight(Role::Swapping, [k])
                .line(9)
                .describe(format!("Place {} at position {k}.", rec.value(k))),
        );
    }

    let placed = taken_left + taken_right;
    let (rest, side, line) = if taken_left < left_len {
        (left_len - taken_left, "left", 15)
    } else {
        (right_len - taken_right, "right", 20)
    };
    for offset in 0..rest {
        let k = left + placed + offset;
        tally += rec.push(
            frame(StepDraft::new(StepEvent::Swap), k)
                .highlight(Role::Swapping, [k])
                .line(line)
                .describe(format!(
                    "Copy remaining {side} element {} to position {k}.",
                    rec.value(k)
                )),
        );
    }
    tally
}
