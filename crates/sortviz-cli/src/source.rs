//! Shared argument groups: where the array comes from and how fast to play it.

use std::path::PathBuf;

use clap::Args;
use sortviz_core::{ArrayKind, EXAMPLE_ARRAY, generate_array, parse_custom, seeded_rng};
use sortviz_runtime::PlaybackConfig;

use crate::error::Result;

pub const DEFAULT_SIZE: u16 = 12;
pub const MAX_SIZE: i64 = 100;

/// Array source. `--input` wins; otherwise `--kind` generates one; with
/// neither the built-in example array is used.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Comma or whitespace separated integers, e.g. "5,2,8,1,9".
    #[arg(long, conflicts_with_all = ["kind", "seed"])]
    pub input: Option<String>,

    /// Generate an array of this shape: random, sorted, reversed, nearly-sorted.
    #[arg(long)]
    pub kind: Option<ArrayKind>,

    /// Length of a generated array.
    #[arg(long, default_value_t = DEFAULT_SIZE, value_parser = clap::value_parser!(u16).range(1..=MAX_SIZE))]
    pub size: u16,

    /// Seed for reproducible generation.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Default for InputArgs {
    fn default() -> Self {
        Self {
            input: None,
            kind: None,
            size: DEFAULT_SIZE,
            seed: None,
        }
    }
}

impl InputArgs {
    pub fn resolve(&self) -> Result<Vec<i64>> {
        if let Some(text) = &self.input {
            return Ok(parse_custom(text)?);
        }
        Ok(match self.kind {
            Some(kind) => generate(usize::from(self.size), kind, self.seed),
            None => EXAMPLE_ARRAY.to_vec(),
        })
    }
}

/// Draw an array, seeded when `seed` is given.
#[must_use]
pub fn generate(size: usize, kind: ArrayKind, seed: Option<u64>) -> Vec<i64> {
    match seed {
        Some(seed) => generate_array(size, kind, &mut seeded_rng(seed)),
        None => generate_array(size, kind, &mut rand::rng()),
    }
}

/// Speed and config file for timed commands.
#[derive(Debug, Clone, Default, Args)]
pub struct TimingArgs {
    /// Playback speed 1-10; overrides the config file.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub speed: Option<u8>,

    /// Playback config (TOML when the extension is .toml, JSON otherwise).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl TimingArgs {
    pub fn resolve(&self) -> Result<PlaybackConfig> {
        let mut config = match &self.config {
            Some(path) => PlaybackConfig::load(path)?,
            None => PlaybackConfig::default(),
        };
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        Ok(config)
    }
}
