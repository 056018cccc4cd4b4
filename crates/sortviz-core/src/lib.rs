#![forbid(unsafe_code)]

//! Sortviz Core
//!
//! Step-trace generation for seven textbook sorting algorithms.
//!
//! # Key Components
//!
//! - [`Algorithm`] - Tagged enum of supported algorithms plus the [`GENERATORS`] table
//! - [`generate`] - Produce the complete [`Trace`] for an (algorithm, input) pair
//! - [`Trace`] - Immutable, randomly-seekable sequence of [`Step`]s with operation totals
//! - [`Step`] - Self-contained snapshot: elements, highlights, variables, description
//! - [`Element`] - A value with a stable [`ElementId`] and a [`VisualState`]
//! - [`input`] - Presets, seeded array generation and strict custom parsing
//!
//! # How it fits in the system
//! Core is pure and synchronous: it runs an algorithm once and records every
//! visually meaningful event. `sortviz-runtime` replays the recorded trace by
//! index (forward, backward, at speed, or racing) without re-running the sort.

pub mod algorithm;
pub mod element;
pub mod error;
pub mod generators;
pub mod input;
pub mod step;
pub mod trace;

pub use algorithm::{Algorithm, GENERATORS, GenerateFn, UnknownAlgorithm, generate};
pub use element::{Element, ElementId, VisualState, elements_from_values, values_of};
pub use error::{InputError, TraceError};
pub use input::{
    ArrayKind, EXAMPLE_ARRAY, MAX_CUSTOM_LEN, SMALL_ARRAY, UnknownArrayKind, generate_array,
    is_sorted, parse_custom, seeded_rng, shuffle,
};
pub use step::{Highlights, Role, Step, StepEvent, Var};
pub use trace::{Tally, Trace};
