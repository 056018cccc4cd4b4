#![forbid(unsafe_code)]

//! Algorithm identifiers and the generator lookup table.
//!
//! [`Algorithm`] is a plain tagged enum; [`GENERATORS`] binds every variant to
//! one pure generator function with the same signature. Dispatch is a table
//! lookup, never a trait object hierarchy.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::generators;
use crate::trace::Trace;

/// Signature shared by every trace generator.
pub type GenerateFn = fn(&[i64]) -> Result<Trace, TraceError>;

/// The seven supported sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
    Radix,
}

/// Variant → generator table, in display order.
pub const GENERATORS: [(Algorithm, GenerateFn); 7] = [
    (Algorithm::Bubble, generators::bubble::generate),
    (Algorithm::Selection, generators::selection::generate),
    (Algorithm::Insertion, generators::insertion::generate),
    (Algorithm::Merge, generators::merge::generate),
    (Algorithm::Quick, generators::quick::generate),
    (Algorithm::Heap, generators::heap::generate),
    (Algorithm::Radix, generators::radix::generate),
];

impl Algorithm {
    pub const ALL: [Self; 7] = [
        Self::Bubble,
        Self::Selection,
        Self::Insertion,
        Self::Merge,
        Self::Quick,
        Self::Heap,
        Self::Radix,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Merge => "Merge Sort",
            Self::Quick => "Quick Sort",
            Self::Heap => "Heap Sort",
            Self::Radix => "Radix Sort",
        }
    }

    /// Short lower-case key used on the command line and in logs.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Bubble => "bubble",
            Self::Selection => "selection",
            Self::Insertion => "insertion",
            Self::Merge => "merge",
            Self::Quick => "quick",
            Self::Heap => "heap",
            Self::Radix => "radix",
        }
    }

    /// Whether equal values keep their input order in the final snapshot.
    #[must_use]
    pub const fn is_stable(self) -> bool {
        matches!(
            self,
            Self::Bubble | Self::Insertion | Self::Merge | Self::Radix
        )
    }

    /// Whether the algorithm accepts negative values.
    #[must_use]
    pub const fn accepts_negative(self) -> bool {
        !matches!(self, Self::Radix)
    }

    /// Generator bound to this variant.
    #[must_use]
    pub fn generator(self) -> GenerateFn {
        GENERATORS
            .iter()
            .find(|(alg, _)| *alg == self)
            .map(|(_, f)| *f)
            .unwrap_or(generators::bubble::generate)
    }

    /// Generate the full trace for `input`.
    pub fn generate(self, input: &[i64]) -> Result<Trace, TraceError> {
        generate(self, input)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm `{}` (expected one of: bubble, selection, insertion, merge, quick, heap, radix)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    /// Accepts `bubble`, `bubbleSort`, `bubble-sort`, `bubble_sort` and
    /// `Bubble Sort`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        let stem = folded.strip_suffix("sort").unwrap_or(&folded);
        Self::ALL
            .into_iter()
            .find(|alg| alg.key() == stem)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Generate the trace for `algorithm` on `input`.
///
/// Empty input yields a single-step, zero-count trace for every algorithm.
pub fn generate(algorithm: Algorithm, input: &[i64]) -> Result<Trace, TraceError> {
    let _span = tracing::debug_span!(
        "trace.generate",
        algorithm = algorithm.key(),
        len = input.len()
    )
    .entered();
    if input.is_empty() {
        return Ok(Trace::empty(algorithm));
    }
    (algorithm.generator())(input)
}
