#![forbid(unsafe_code)]

//! Element model: one value in the array being sorted.
//!
//! Every element carries an [`ElementId`] assigned from its position in the
//! original input. The id travels with the value through swaps and writes, so
//! two equal values stay distinguishable across a trace and stable/unstable
//! behaviour can be observed in the final snapshot.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identity of an element, independent of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Visual role of an element at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VisualState {
    #[default]
    Default,
    Comparing,
    Swapping,
    Sorted,
    Pivot,
    Left,
    Right,
}

impl VisualState {
    /// Lower-case label used in logs and text output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Comparing => "comparing",
            Self::Swapping => "swapping",
            Self::Sorted => "sorted",
            Self::Pivot => "pivot",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// A single value plus its identity and visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Element {
    pub id: ElementId,
    pub value: i64,
    pub state: VisualState,
}

impl Element {
    #[must_use]
    pub const fn new(id: ElementId, value: i64) -> Self {
        Self {
            id,
            value,
            state: VisualState::Default,
        }
    }

    /// Same element with a different visual state.
    #[must_use]
    pub const fn with_state(self, state: VisualState) -> Self {
        Self { state, ..self }
    }
}

/// Build the initial element sequence for an input, ids following positions.
#[must_use]
pub fn elements_from_values(values: &[i64]) -> Vec<Element> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| Element::new(ElementId(i as u32), value))
        .collect()
}

/// Project an element sequence back to its values.
#[must_use]
pub fn values_of(elements: &[Element]) -> Vec<i64> {
    elements.iter().map(|e| e.value).collect()
}
