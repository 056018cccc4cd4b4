#![forbid(unsafe_code)]

//! Step records: one immutable snapshot per visually meaningful event.
//!
//! A [`Step`] is self-contained: it holds the full element sequence at that
//! instant, so any step can be displayed without replaying the ones before
//! it. This is what makes backward stepping and random seek possible.
//!
//! # Invariants
//!
//! 1. Every index stored in [`Highlights`] or in the variable map is less
//!    than `snapshot().len()`.
//! 2. Each element's [`VisualState`] in the snapshot is derived from the
//!    highlights using [`Role::PRIORITY`].
//! 3. [`StepEvent::Compare`] and [`StepEvent::Swap`] are the only events that
//!    contribute to a trace's counters, one unit each.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::element::{Element, VisualState};

/// Highlight role for a set of indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Role {
    Comparing,
    Swapping,
    Sorted,
    Pivot,
    Left,
    Right,
}

impl Role {
    /// Resolution order when one index carries several roles, strongest first.
    pub const PRIORITY: [Self; 6] = [
        Self::Swapping,
        Self::Comparing,
        Self::Pivot,
        Self::Left,
        Self::Right,
        Self::Sorted,
    ];

    #[must_use]
    pub const fn visual_state(self) -> VisualState {
        match self {
            Self::Comparing => VisualState::Comparing,
            Self::Swapping => VisualState::Swapping,
            Self::Sorted => VisualState::Sorted,
            Self::Pivot => VisualState::Pivot,
            Self::Left => VisualState::Left,
            Self::Right => VisualState::Right,
        }
    }
}

/// Named index variables shown next to the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Var {
    #[cfg_attr(feature = "serde", serde(rename = "i"))]
    I,
    #[cfg_attr(feature = "serde", serde(rename = "j"))]
    J,
    #[cfg_attr(feature = "serde", serde(rename = "k"))]
    K,
    #[cfg_attr(feature = "serde", serde(rename = "minIdx"))]
    MinIdx,
    #[cfg_attr(feature = "serde", serde(rename = "left"))]
    Left,
    #[cfg_attr(feature = "serde", serde(rename = "right"))]
    Right,
    #[cfg_attr(feature = "serde", serde(rename = "mid"))]
    Mid,
    #[cfg_attr(feature = "serde", serde(rename = "low"))]
    Low,
    #[cfg_attr(feature = "serde", serde(rename = "high"))]
    High,
    #[cfg_attr(feature = "serde", serde(rename = "pivot"))]
    Pivot,
    #[cfg_attr(feature = "serde", serde(rename = "largest"))]
    Largest,
}

impl Var {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::I => "i",
            Self::J => "j",
            Self::K => "k",
            Self::MinIdx => "minIdx",
            Self::Left => "left",
            Self::Right => "right",
            Self::Mid => "mid",
            Self::Low => "low",
            Self::High => "high",
            Self::Pivot => "pivot",
            Self::Largest => "largest",
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happened at this step. Steps carry the delta, never running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepEvent {
    /// Initial configuration, before any work.
    Start,
    /// One counted comparison is about to be made.
    Compare,
    /// One counted swap, shift, or overwrite has just happened.
    Swap,
    /// Elements are highlighted without counting an operation.
    Inspect,
    /// Positions have been marked sorted.
    Mark,
    /// Structural narration (divide, partition start, pass start).
    Phase,
    /// Terminal step: the whole array is sorted.
    Done,
}

impl StepEvent {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Compare => "compare",
            Self::Swap => "swap",
            Self::Inspect => "inspect",
            Self::Mark => "mark",
            Self::Phase => "phase",
            Self::Done => "done",
        }
    }

    #[must_use]
    pub const fn comparisons(self) -> u64 {
        match self {
            Self::Compare => 1,
            _ => 0,
        }
    }

    #[must_use]
    pub const fn swaps(self) -> u64 {
        match self {
            Self::Swap => 1,
            _ => 0,
        }
    }
}

/// Sets of highlighted indices keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Highlights(BTreeMap<Role, BTreeSet<usize>>);

impl Highlights {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: Role, index: usize) {
        self.0.entry(role).or_default().insert(index);
    }

    pub fn extend(&mut self, role: Role, indices: impl IntoIterator<Item = usize>) {
        let set = self.0.entry(role).or_default();
        set.extend(indices);
        if set.is_empty() {
            self.0.remove(&role);
        }
    }

    /// Indices highlighted with `role`, ascending.
    pub fn get(&self, role: Role) -> impl Iterator<Item = usize> + '_ {
        self.0.get(&role).into_iter().flatten().copied()
    }

    #[must_use]
    pub fn contains(&self, role: Role, index: usize) -> bool {
        self.0.get(&role).is_some_and(|s| s.contains(&index))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeSet::is_empty)
    }

    /// Every (role, index) pair.
    pub fn iter(&self) -> impl Iterator<Item = (Role, usize)> + '_ {
        self.0
            .iter()
            .flat_map(|(role, set)| set.iter().map(move |&i| (*role, i)))
    }

    /// Strongest role applied to `index`, if any.
    #[must_use]
    pub fn resolve(&self, index: usize) -> Option<Role> {
        Role::PRIORITY
            .into_iter()
            .find(|&role| self.contains(role, index))
    }

    pub(crate) fn retain_below(&mut self, len: usize) {
        for set in self.0.values_mut() {
            set.retain(|&i| i < len);
        }
        self.0.retain(|_, set| !set.is_empty());
    }
}

/// One immutable snapshot of the array plus event metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    snapshot: Vec<Element>,
    highlights: Highlights,
    variables: BTreeMap<Var, usize>,
    description: String,
    code_line: Option<u16>,
    event: StepEvent,
}

impl Step {
    /// Assemble a step, resolving each element's visual state from the
    /// highlights. Out-of-range indices are dropped.
    pub(crate) fn assemble(
        elements: &[Element],
        mut highlights: Highlights,
        mut variables: BTreeMap<Var, usize>,
        description: String,
        code_line: Option<u16>,
        event: StepEvent,
    ) -> Self {
        let len = elements.len();
        debug_assert!(
            highlights.iter().all(|(_, i)| i < len),
            "highlight index out of range for length {len}"
        );
        debug_assert!(
            variables.values().all(|&i| i < len),
            "variable index out of range for length {len}"
        );
        highlights.retain_below(len);
        variables.retain(|_, i| *i < len);

        let snapshot = elements
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let state = highlights
                    .resolve(i)
                    .map_or(VisualState::Default, Role::visual_state);
                e.with_state(state)
            })
            .collect();

        Self {
            snapshot,
            highlights,
            variables,
            description,
            code_line,
            event,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &[Element] {
        &self.snapshot
    }

    /// Values of the snapshot in order.
    #[must_use]
    pub fn values(&self) -> Vec<i64> {
        self.snapshot.iter().map(|e| e.value).collect()
    }

    #[must_use]
    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    #[must_use]
    pub fn variables(&self) -> &BTreeMap<Var, usize> {
        &self.variables
    }

    #[must_use]
    pub fn variable(&self, var: Var) -> Option<usize> {
        self.variables.get(&var).copied()
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Line in the displayed pseudocode, if the step maps to one.
    #[must_use]
    pub fn code_line(&self) -> Option<u16> {
        self.code_line
    }

    #[must_use]
    pub fn event(&self) -> StepEvent {
        self.event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::elements_from_values;

    fn step_with(highlights: Highlights) -> Step {
        Step::assemble(
            &elements_from_values(&[3, 1, 2]),
            highlights,
            BTreeMap::from([(Var::I, 0)]),
            "test".into(),
            Some(4),
            StepEvent::Compare,
        )
    }

    #[test]
    fn swapping_outranks_sorted() {
        let mut h = Highlights::new();
        h.insert(Role::Sorted, 2);
        h.insert(Role::Swapping, 2);
        h.insert(Role::Comparing, 0);
        let step = step_with(h);
        let states: Vec<_> = step.snapshot().iter().map(|e| e.state).collect();
        assert_eq!(
            states,
            vec![
                VisualState::Comparing,
                VisualState::Default,
                VisualState::Swapping
            ]
        );
    }

    #[test]
    fn highlights_iterate_in_order() {
        let mut h = Highlights::new();
        h.extend(Role::Sorted, [2, 0, 1]);
        assert_eq!(h.get(Role::Sorted).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(h.get(Role::Pivot).next().is_none());
        assert!(!h.is_empty());
    }

    #[test]
    fn empty_extend_leaves_no_role() {
        let mut h = Highlights::new();
        h.extend(Role::Left, []);
        assert!(h.is_empty());
        assert_eq!(h.iter().count(), 0);
    }

    #[test]
    fn accessors_expose_metadata() {
        let step = step_with(Highlights::new());
        assert_eq!(step.values(), vec![3, 1, 2]);
        assert_eq!(step.variable(Var::I), Some(0));
        assert_eq!(step.variable(Var::J), None);
        assert_eq!(step.code_line(), Some(4));
        assert_eq!(step.event().comparisons(), 1);
        assert_eq!(step.event().swaps(), 0);
        assert_eq!(step.description(), "test");
    }

    #[test]
    fn var_names_match_display() {
        assert_eq!(Var::MinIdx.to_string(), "minIdx");
        assert_eq!(Var::Largest.name(), "largest");
    }
}
