#![forbid(unsafe_code)]

//! Trace: the complete, immutable record of one algorithm run.
//!
//! Generators build a trace through a [`TraceRecorder`], which owns the
//! working array and the growing step buffer. Recursive generators thread
//! the recorder explicitly and return a [`Tally`] of their own operations;
//! callers fold those tallies into the trace totals.
//!
//! # Invariants
//!
//! 1. `steps` is never empty; the last step is [`StepEvent::Done`] and its
//!    snapshot is sorted ascending by value.
//! 2. Every snapshot has the same length as the input.
//! 3. `comparisons` and `swaps` equal the folded tallies, which equal the
//!    number of `Compare` and `Swap` steps.

use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::algorithm::Algorithm;
use crate::element::{Element, ElementId, elements_from_values};
use crate::step::{Highlights, Role, Step, StepEvent, Var};

/// Operation counts produced by a piece of generator work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tally {
    pub comparisons: u64,
    pub swaps: u64,
}

impl Tally {
    pub const ZERO: Self = Self {
        comparisons: 0,
        swaps: 0,
    };

    #[must_use]
    pub const fn of(event: StepEvent) -> Self {
        Self {
            comparisons: event.comparisons(),
            swaps: event.swaps(),
        }
    }
}

impl Add for Tally {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            comparisons: self.comparisons + rhs.comparisons,
            swaps: self.swaps + rhs.swaps,
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Ordered steps plus final operation counts for one (algorithm, input) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trace {
    algorithm: Algorithm,
    input: Vec<i64>,
    steps: Vec<Step>,
    comparisons: u64,
    swaps: u64,
}

impl Trace {
    /// Zero-work trace for an empty input: one terminal step, zero counts.
    #[must_use]
    pub fn empty(algorithm: Algorithm) -> Self {
        let done = Step::assemble(
            &[],
            Highlights::new(),
            BTreeMap::new(),
            "Nothing to sort: the array is empty.".to_string(),
            None,
            StepEvent::Done,
        );
        Self {
            algorithm,
            input: Vec::new(),
            steps: vec![done],
            comparisons: 0,
            swaps: 0,
        }
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// The input this trace was generated from.
    #[must_use]
    pub fn input(&self) -> &[i64] {
        &self.input
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Number of steps (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the terminal step.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    #[must_use]
    pub fn final_step(&self) -> &Step {
        // Non-empty by construction.
        &self.steps[self.last_index()]
    }

    #[must_use]
    pub fn final_values(&self) -> Vec<i64> {
        self.final_step().values()
    }

    #[must_use]
    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    #[must_use]
    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    #[must_use]
    pub fn totals(&self) -> Tally {
        Tally {
            comparisons: self.comparisons,
            swaps: self.swaps,
        }
    }

    /// Recount operations from step events, up to and including `through`.
    #[must_use]
    pub fn tally_through(&self, through: usize) -> Tally {
        self.steps
            .iter()
            .take(through.saturating_add(1))
            .fold(Tally::ZERO, |acc, s| acc + Tally::of(s.event()))
    }
}

/// Builder for one step's metadata.
#[derive(Debug, Clone)]
pub(crate) struct StepDraft {
    event: StepEvent,
    highlights: Highlights,
    variables: BTreeMap<Var, usize>,
    description: String,
    code_line: Option<u16>,
}

impl StepDraft {
    pub(crate) fn new(event: StepEvent) -> Self {
        Self {
            event,
            highlights: Highlights::new(),
            variables: BTreeMap::new(),
            description: String::new(),
            code_line: None,
        }
    }

    pub(crate) fn highlight(mut self, role: Role, indices: impl IntoIterator<Item = usize>) -> Self {
        self.highlights.extend(role, indices);
        self
    }

    pub(crate) fn var(mut self, var: Var, index: usize) -> Self {
        self.variables.insert(var, index);
        self
    }

    pub(crate) fn line(mut self, line: u16) -> Self {
        self.code_line = Some(line);
        self
    }

    pub(crate) fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }
}

/// Working array plus step buffer used while a generator runs.
#[derive(Debug)]
pub(crate) struct TraceRecorder {
    algorithm: Algorithm,
    input: Vec<i64>,
    elements: Vec<Element>,
    steps: Vec<Step>,
    recorded: Tally,
}

impl TraceRecorder {
    pub(crate) fn new(algorithm: Algorithm, input: &[i64]) -> Self {
        Self {
            algorithm,
            input: input.to_vec(),
            elements: elements_from_values(input),
            steps: Vec::new(),
            recorded: Tally::ZERO,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    pub(crate) fn value(&self, index: usize) -> i64 {
        self.elements[index].value
    }

    pub(crate) fn element(&self, index: usize) -> Element {
        self.elements[index]
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.elements.swap(a, b);
    }

    /// Move the element at `from` down to `to`, shifting `to..from` right by one.
    pub(crate) fn rotate_into(&mut self, to: usize, from: usize) {
        debug_assert!(to <= from);
        self.elements[to..=from].rotate_right(1);
    }

    /// Position of the element with `id`.
    pub(crate) fn position_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Snapshot the working array with the draft's metadata.
    ///
    /// Returns the operation count this step represents so recursive callers
    /// can fold it into their own tally.
    pub(crate) fn push(&mut self, draft: StepDraft) -> Tally {
        let delta = Tally::of(draft.event);
        self.recorded += delta;
        self.steps.push(Step::assemble(
            &self.elements,
            draft.highlights,
            draft.variables,
            draft.description,
            draft.code_line,
            draft.event,
        ));
        delta
    }

    /// Record the initial configuration.
    pub(crate) fn begin(&mut self, description: impl Into<String>) {
        self.push(StepDraft::new(StepEvent::Start).describe(description));
    }

    /// Append the terminal all-sorted step and seal the trace.
    pub(crate) fn finish(mut self, tally: Tally) -> Trace {
        debug_assert_eq!(
            tally, self.recorded,
            "folded tally disagrees with recorded step events"
        );
        debug_assert!(
            self.elements.windows(2).all(|w| w[0].value <= w[1].value),
            "{} finished with an unsorted array",
            self.algorithm.name()
        );
        let n = self.len();
        self.push(
            StepDraft::new(StepEvent::Done)
                .highlight(Role::Sorted, 0..n)
                .describe(format!(
                    "{} complete: {} comparisons, {} swaps.",
                    self.algorithm.name(),
                    tally.comparisons,
                    tally.swaps
                )),
        );
        tracing::debug!(
            message = "trace.finished",
            algorithm = self.algorithm.key(),
            steps = self.steps.len(),
            comparisons = tally.comparisons,
            swaps = tally.swaps
        );
        Trace {
            algorithm: self.algorithm,
            input: self.input,
            steps: self.steps,
            comparisons: tally.comparisons,
            swaps: tally.swaps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trace_has_single_terminal_step() {
        let trace = Trace::empty(Algorithm::Heap);
        assert_eq!(trace.len(), 1);
        assert!(!trace.is_empty());
        assert_eq!(trace.final_step().event(), StepEvent::Done);
        assert!(trace.final_values().is_empty());
        assert_eq!(trace.totals(), Tally::ZERO);
    }

    #[test]
    fn recorder_counts_events() {
        let mut rec = TraceRecorder::new(Algorithm::Bubble, &[2, 1]);
        rec.begin("start");
        let mut tally = Tally::ZERO;
        tally += rec.push(
            StepDraft::new(StepEvent::Compare)
                .highlight(Role::Comparing, [0, 1])
                .var(Var::J, 0),
        );
        rec.swap(0, 1);
        tally += rec.push(StepDraft::new(StepEvent::Swap).highlight(Role::Swapping, [0, 1]));
        let trace = rec.finish(tally);

        assert_eq!(trace.comparisons(), 1);
        assert_eq!(trace.swaps(), 1);
        assert_eq!(trace.len(), 4);
        assert_eq!(trace.final_values(), vec![1, 2]);
        assert_eq!(trace.tally_through(trace.last_index()), trace.totals());
        assert_eq!(trace.tally_through(1), Tally { comparisons: 1, swaps: 0 });
    }

    #[test]
    fn snapshots_are_independent_copies() {
        let mut rec = TraceRecorder::new(Algorithm::Bubble, &[2, 1]);
        rec.begin("start");
        rec.swap(0, 1);
        let trace = rec.finish(Tally::ZERO);
        assert_eq!(trace.steps()[0].values(), vec![2, 1]);
        assert_eq!(trace.final_values(), vec![1, 2]);
    }

    #[test]
    fn tally_adds_componentwise() {
        let a = Tally { comparisons: 2, swaps: 1 };
        let b = Tally::of(StepEvent::Swap);
        assert_eq!(a + b, Tally { comparisons: 2, swaps: 2 });
    }
}
