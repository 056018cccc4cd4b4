#![forbid(unsafe_code)]

//! Speed setting and its mapping to a tick interval.
//!
//! Higher speed means a shorter interval:
//! `interval_ms = max(floor_ms, base_ms - speed * step_ms)`.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// User speed setting, always within `Speed::MIN..=Speed::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(10);

    /// Clamp `value` into range.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value < Self::MIN.0 {
            Self::MIN
        } else if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(5)
    }
}

impl From<u8> for Speed {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Linear speed→interval mapping with a floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct IntervalPolicy {
    /// Interval at a notional speed of zero. Default: 2000.
    pub base_ms: u64,
    /// Reduction per speed unit. Default: 180.
    pub step_ms: u64,
    /// Lower bound on the interval. Default: 200.
    pub floor_ms: u64,
}

impl IntervalPolicy {
    pub const DEFAULT: Self = Self {
        base_ms: 2000,
        step_ms: 180,
        floor_ms: 200,
    };

    #[must_use]
    pub fn interval(&self, speed: Speed) -> Duration {
        let reduction = self.step_ms.saturating_mul(u64::from(speed.get()));
        let ms = self.base_ms.saturating_sub(reduction).max(self.floor_ms);
        Duration::from_millis(ms)
    }
}

impl Default for IntervalPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}
