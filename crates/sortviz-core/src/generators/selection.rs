#![forbid(unsafe_code)]

//! Selection sort.

use crate::algorithm::Algorithm;
use crate::error::TraceError;
use crate::step::{Role, StepEvent, Var};
use crate::trace::{StepDraft, Tally, Trace};

pub fn generate(input: &[i64]) -> Result<Trace, TraceError> {
    Ok(super::run(
        Algorithm::Selection,
        input,
        "Selection sort repeatedly finds the smallest unsorted value and moves it to the front of the unsorted region.",
        |rec| {
            let n = rec.len();
            let mut tally = Tally::ZERO;
            for i in 0..n.saturating_sub(1) {
                let mut min = i;
                rec.push(
                    StepDraft::new(StepEvent::Inspect)
                        .highlight(Role::Comparing, [i])
                        .highlight(Role::Sorted, 0..i)
                        .var(Var::I, i)
                        .var(Var::MinIdx, i)
                        .line(3)
                        .describe(format!(
                            "Pass {}: assume position {i} ({}) holds the minimum of the unsorted part.",
                            i + 1,
                            rec.value(i)
                        )),
                );
                for j in i + 1..n {
                    tally += rec.push(
                        StepDraft::new(StepEvent::Compare)
                            .highlight(Role::Comparing, [min, j])
                            .highlight(Role::Sorted, 0..i)
                            .var(Var::I, i)
                            .var(Var::J, j)
                            .var(Var::MinIdx, min)
                            .line(5)
                            .describe(format!(
                                "Is {} at position {j} smaller than the current minimum {}?",
                                rec.value(j),
                                rec.value(min)
                            )),
                    );
                    if rec.value(j) < rec.value(min) {
                        min = j;
                        rec.push(
                            StepDraft::new(StepEvent::Inspect)
                                .highlight(Role::Comparing, [min])
                                .highlight(Role::Sorted, 0..i)
                                .var(Var::I, i)
                                .var(Var::J, j)
                                .var(Var::MinIdx, min)
                                .line(6)
                                .describe(format!(
                                    "New minimum: {} at position {min}.",
                                    rec.value(min)
                                )),
                        );
                    }
                }
                if min != i {
                    rec.swap(i, min);
                    tally += rec.push(
                        StepDraft::new(StepEvent::Swap)
                            .highlight(Role::Swapping, [i, min])
                            .highlight(Role::Sorted, 0..i)
                            .var(Var::I, i)
                            .var(Var::MinIdx, min)
                            .line(9)
                            .describe(format!(
                                "Swap the minimum {} into position {i}.",
                                rec.value(i)
                            )),
                    );
                }
                rec.push(
                    StepDraft::new(StepEvent::Mark)
                        .highlight(Role::Sorted, 0..=i)
                        .var(Var::I, i)
                        .var(Var::MinIdx, min)
                        .line(2)
                        .describe(format!(
                            "Position {i} now holds {} for good.",
                            rec.value(i)
                        )),
                );
            }
            tally
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{assert_well_formed, count, ids_of};

    #[test]
    fn comparisons_are_quadratic_regardless_of_order() {
        let sorted = generate(&[1, 2, 3, 4, 5]).unwrap();
        let reversed = generate(&[5, 4, 3, 2, 1]).unwrap();
        assert_eq!(sorted.comparisons(), 10);
        assert_eq!(reversed.comparisons(), 10);
        assert_eq!(sorted.swaps(), 0);
        assert_eq!(reversed.swaps(), 2);
        assert_well_formed(&sorted);
        assert_well_formed(&reversed);
    }

    #[test]
    fn every_pass_is_marked_even_without_swap() {
        let trace = generate(&[1, 2, 3, 4]).unwrap();
        assert_eq!(count(&trace, StepEvent::Mark), 3);
    }

    #[test]
    fn improvements_are_inspect_steps() {
        // 3 -> 2 -> 1 improves twice in the first pass.
        let trace = generate(&[3, 2, 1]).unwrap();
        let first_pass_improvements = trace
            .steps()
            .iter()
            .take_while(|s| s.event() != StepEvent::Swap)
            .filter(|s| s.event() == StepEvent::Inspect && s.code_line() == Some(6))
            .count();
        assert_eq!(first_pass_improvements, 2);
        assert_well_formed(&trace);
    }

    #[test]
    fn equal_values_may_be_reordered() {
        // The first 2 is swapped behind its twin when 1 is pulled forward.
        let trace = generate(&[2, 2, 1]).unwrap();
        assert_eq!(trace.final_values(), vec![1, 2, 2]);
        let twos = ids_of(&trace, 2);
        assert!(twos[0] > twos[1], "selection sort is not stable: {twos:?}");
    }
}
