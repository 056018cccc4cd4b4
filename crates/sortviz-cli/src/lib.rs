#![forbid(unsafe_code)]

pub mod cli;
pub mod error;
pub mod generate;
pub mod list;
pub mod logging;
pub mod output;
pub mod play;
pub mod race;
pub mod source;
pub mod trace;

pub use cli::{Cli, Commands, run, run_from_env, run_with};
pub use error::{CliError, Result};
