#![forbid(unsafe_code)]

//! Heap sort: build a max heap in place, then repeatedly move the root
//! behind the shrinking heap.

use crate::algorithm::Algorithm;
use crate::error::TraceError;
use crate::step::{Role, StepEvent, Var};
use crate::trace::{StepDraft, Tally, Trace, TraceRecorder};

pub fn generate(input: &[i64]) -> Result<Trace, TraceError> {
    Ok(super::run(
        Algorithm::Heap,
        input,
        "Heap sort arranges the array as a max heap, then repeatedly moves the largest value to the end.",
        |rec| {
            let n = rec.len();
            let mut tally = Tally::ZERO;

            for i in (0..n / 2).rev() {
                tally += heapify(rec, n, i);
            }
            rec.push(
                StepDraft::new(StepEvent::Phase)
                    .highlight(Role::Pivot, [0])
                    .line(4)
                    .describe(format!(
                        "Max heap built: the largest value {} sits at the root.",
                        rec.value(0)
                    )),
            );

            for end in (1..n).rev() {
                rec.swap(0, end);
                tally += rec.push(
                    StepDraft::new(StepEvent::Swap)
                        .highlight(Role::Swapping, [0, end])
                        .highlight(Role::Sorted, end + 1..n)
                        .var(Var::I, end)
                        .line(6)
                        .describe(format!(
                            "Move the maximum {} to position {end}.",
                            rec.value(end)
                        )),
                );
                tally += heapify(rec, end, 0);
            }
            tally
        },
    ))
}

/// Sift `i` down within the heap occupying `0..size`.
fn heapify(rec: &mut TraceRecorder, size: usize, i: usize) -> Tally {
    let n = rec.len();
    let left = 2 * i + 1;
    let right = 2 * i + 2;
    let mut largest = i;
    let mut tally = Tally::ZERO;

    // Children outside the heap get no variable binding.
    let frame = |mut draft: StepDraft, largest: usize| {
        draft = draft
            .highlight(Role::Sorted, size..n)
            .var(Var::I, i)
            .var(Var::Largest, largest);
        if left < size {
            draft = draft.var(Var::Left, left);
        }
        if right < size {
            draft = draft.var(Var::Right, right);
        }
        draft
    };

    rec.push(
        frame(StepDraft::new(StepEvent::Phase), largest)
            .highlight(Role::Pivot, [i])
            .line(8)
            .describe(format!(
                "Heapify at position {i} ({}) within a heap of {size}.",
                rec.value(i)
            )),
    );

    if left < size {
        tally += rec.push(
            frame(StepDraft::new(StepEvent::Compare), largest)
                .highlight(Role::Comparing, [left, largest])
                .line(11)
                .describe(format!(
                    "Is the left child {} larger than {}?",
                    rec.value(left),
                    rec.value(largest)
                )),
        );
        if rec.value(left) > rec.value(largest) {
            largest = left;
        }
    }

    if right < size {
        tally += rec.push(
            frame(StepDraft::new(StepEvent::Compare), largest)
                .highlight(Role::Comparing, [right, largest])
                .line(15)
                .describe(format!(
                    "Is the right child {} larger than {}?",
                    rec.value(right),
                    rec.value(largest)
                )),
        );
        if rec.value(right) > rec.value(largest) {
            largest = right;
        }
    }

    if largest != i {
        rec.swap(i, largest);
        tally += rec.push(
            frame(StepDraft::new(StepEvent::Swap), largest)
                .highlight(Role::Swapping, [i, largest])
                .line(19)
                .describe(format!(
                    "Swap {} up to position {i}; continue sifting at {largest}.",
                    rec.value(i)
                )),
        );
        tally += heapify(rec, size, largest);
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{assert_well_formed, ids_of};

    #[test]
    fn sorts_example_array() {
        let trace = generate(&[64, 34, 25, 12, 22, 11, 90]).unwrap();
        assert_eq!(trace.final_values(), vec![11, 12, 22, 25, 34, 64, 90]);
        assert_well_formed(&trace);
    }

    #[test]
    fn counts_for_small_sorted_input() {
        // Build: 2 comparisons + 1 swap. Extraction: 2 root swaps, one
        // sift-down with 1 comparison + 1 swap.
        let trace = generate(&[1, 2, 3]).unwrap();
        assert_eq!(trace.comparisons(), 3);
        assert_eq!(trace.swaps(), 4);
        assert_well_formed(&trace);
    }

    #[test]
    fn heap_built_phase_precedes_extraction() {
        let trace = generate(&[3, 9, 4, 7]).unwrap();
        let built = trace
            .steps()
            .iter()
            .position(|s| s.event() == StepEvent::Phase && s.code_line() == Some(4))
            .unwrap();
        assert_eq!(trace.steps()[built].values()[0], 9);
        assert!(
            trace.steps()[..built]
                .iter()
                .all(|s| s.code_line() != Some(6))
        );
    }

    #[test]
    fn sorted_suffix_grows_during_extraction() {
        let trace = generate(&[2, 5, 1, 4]).unwrap();
        let sizes: Vec<usize> = trace
            .steps()
            .iter()
            .filter(|s| s.code_line() == Some(6))
            .map(|s| s.highlights().get(Role::Sorted).count())
            .collect();
        assert_eq!(sizes, vec![0, 1, 2]);
    }

    #[test]
    fn equal_values_may_be_reordered() {
        let trace = generate(&[1, 1]).unwrap();
        let ones = ids_of(&trace, 1);
        assert!(ones[0] > ones[1], "heap sort is not stable: {ones:?}");
    }
}
