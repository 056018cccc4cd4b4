#![forbid(unsafe_code)]

//! Input arrays: presets, seeded generation, and strict custom parsing.
//!
//! Generation takes an explicit RNG so callers control determinism; use
//! [`seeded_rng`] for reproducible arrays.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Longest custom array accepted; extra values are dropped.
pub const MAX_CUSTOM_LEN: usize = 20;

/// Smallest random value.
pub const MIN_RANDOM_VALUE: i64 = 1;
/// Largest random value.
pub const MAX_RANDOM_VALUE: i64 = 100;

/// Seven-element demo array.
pub const EXAMPLE_ARRAY: [i64; 7] = [64, 34, 25, 12, 22, 11, 90];

/// Five-element demo array.
pub const SMALL_ARRAY: [i64; 5] = [5, 2, 8, 1, 9];

/// Shape of a generated array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ArrayKind {
    #[default]
    Random,
    /// `1..=size`.
    Sorted,
    /// `size..=1`.
    Reversed,
    /// `1..=size`, then `size / 10` random swaps.
    NearlySorted,
}

impl ArrayKind {
    pub const ALL: [Self; 4] = [
        Self::Random,
        Self::Sorted,
        Self::Reversed,
        Self::NearlySorted,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Sorted => "sorted",
            Self::Reversed => "reversed",
            Self::NearlySorted => "nearly-sorted",
        }
    }
}

impl fmt::Display for ArrayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Unrecognised array kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownArrayKind(pub String);

impl fmt::Display for UnknownArrayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown array kind `{}` (expected random, sorted, reversed or nearly-sorted)",
            self.0
        )
    }
}

impl std::error::Error for UnknownArrayKind {}

impl FromStr for ArrayKind {
    type Err = UnknownArrayKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().replace('-', "") == folded)
            .ok_or_else(|| UnknownArrayKind(s.to_string()))
    }
}

/// Deterministic RNG for array generation.
#[must_use]
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Generate `size` values of the given shape.
///
/// Random values lie in `MIN_RANDOM_VALUE..=MAX_RANDOM_VALUE`. The ordered
/// kinds are permutations of `1..=size`; only nearly-sorted consumes the RNG.
pub fn generate_array<R: Rng>(size: usize, kind: ArrayKind, rng: &mut R) -> Vec<i64> {
    let ascending = || (1i64..).take(size).collect::<Vec<_>>();
    let values: Vec<i64> = match kind {
        ArrayKind::Random => (0..size)
            .map(|_| rng.random_range(MIN_RANDOM_VALUE..=MAX_RANDOM_VALUE))
            .collect(),
        ArrayKind::Sorted => ascending(),
        ArrayKind::Reversed => {
            let mut values = ascending();
            values.reverse();
            values
        }
        ArrayKind::NearlySorted => {
            let mut values = ascending();
            for _ in 0..size / 10 {
                let a = rng.random_range(0..size);
                let b = rng.random_range(0..size);
                values.swap(a, b);
            }
            values
        }
    };
    tracing::debug!(message = "input.generated", kind = kind.key(), size);
    values
}

/// Shuffle in place (Fisher-Yates).
pub fn shuffle<R: Rng>(values: &mut [i64], rng: &mut R) {
    values.shuffle(rng);
}

/// `true` if `values` is ascending (ties allowed).
#[must_use]
pub fn is_sorted(values: &[i64]) -> bool {
    values.windows(2).all(|w| w[0] <= w[1])
}

/// Parse user-entered integers separated by commas and/or whitespace.
///
/// Parsing is strict: any token that is not an integer rejects the whole
/// input. At most [`MAX_CUSTOM_LEN`] values are kept.
pub fn parse_custom(text: &str) -> Result<Vec<i64>, InputError> {
    let mut values = Vec::new();
    for token in text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let value = token.parse::<i64>().map_err(|err| match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => InputError::OutOfRange {
                token: token.to_string(),
            },
            _ => InputError::NotANumber {
                token: token.to_string(),
            },
        })?;
        values.push(value);
    }
    if values.is_empty() {
        return Err(InputError::Empty);
    }
    if values.len() > MAX_CUSTOM_LEN {
        tracing::debug!(
            message = "input.truncated",
            given = values.len(),
            kept = MAX_CUSTOM_LEN
        );
        values.truncate(MAX_CUSTOM_LEN);
    }
    Ok(values)
}
