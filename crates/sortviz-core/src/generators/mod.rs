#![forbid(unsafe_code)]

//! Per-algorithm trace generators.
//!
//! Every generator has the signature [`GenerateFn`](crate::GenerateFn): it
//! takes the input values and returns a complete [`Trace`]. Generators are
//! pure: no shared state, no randomness, identical output for identical
//! input.
//!
//! Each generator records a step *before* every counted comparison and
//! *after* every swap or write, so no mutation of the array is invisible to
//! playback. Swaps and writes always move whole elements, which keeps every
//! snapshot a permutation of the input and lets equal values be told apart
//! by their [`ElementId`](crate::ElementId).

pub mod bubble;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod radix;
pub mod selection;

use crate::algorithm::Algorithm;
use crate::trace::{Tally, Trace, TraceRecorder};

/// Shared scaffolding: empty input short-circuit, initial step, final step.
pub(crate) fn run(
    algorithm: Algorithm,
    input: &[i64],
    intro: impl Into<String>,
    body: impl FnOnce(&mut TraceRecorder) -> Tally,
) -> Trace {
    if input.is_empty() {
        return Trace::empty(algorithm);
    }
    let mut rec = TraceRecorder::new(algorithm, input);
    rec.begin(intro);
    let tally = body(&mut rec);
    rec.finish(tally)
}
