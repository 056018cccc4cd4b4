use sortviz_core::{InputError, TraceError};
use sortviz_runtime::{PlaybackConfigError, PlaybackError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("{0}")]
    Trace(#[from] TraceError),

    #[error("playback failed: {0}")]
    Playback(#[from] PlaybackError),

    #[error("config error: {0}")]
    Config(#[from] PlaybackConfigError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CliError {
    /// 2 for bad arguments or config, 3 when the algorithm rejects the input.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Input(_) | Self::Config(_) | Self::InvalidArgument { .. } => 2,
            Self::Trace(_) | Self::Playback(PlaybackError::Generation(_)) => 3,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
