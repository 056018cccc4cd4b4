#![forbid(unsafe_code)]

//! Policy-as-data configuration for playback and racing.
//!
//! # Loading
//!
//! ```toml
//! # sortviz.toml
//! speed = 7
//!
//! [interval]
//! base_ms = 2000
//! step_ms = 180
//! floor_ms = 200
//!
//! [weights]
//! time = 1.0
//! comparisons = 0.1
//! swaps = 0.2
//! ```
//!
//! ```rust,ignore
//! let config = PlaybackConfig::from_toml_file("sortviz.toml")?;
//! let config = PlaybackConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the built-in constants, so
//! `PlaybackConfig::default()` behaves exactly like an unconfigured run.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::metrics::ScoreWeights;
use crate::speed::{IntervalPolicy, Speed};

/// Top-level playback configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PlaybackConfig {
    /// Speed setting, 1..=10. Default: 5.
    pub speed: u8,
    /// Speed→interval mapping.
    pub interval: IntervalPolicy,
    /// Race score weights.
    pub weights: ScoreWeights,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: Speed::default().get(),
            interval: IntervalPolicy::default(),
            weights: ScoreWeights::default(),
        }
    }
}

impl PlaybackConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PlaybackConfigError> {
        toml::from_str(s).map_err(PlaybackConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PlaybackConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PlaybackConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, PlaybackConfigError> {
        serde_json::from_str(s).map_err(PlaybackConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PlaybackConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PlaybackConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load by extension (`.toml` is TOML, anything else JSON) and validate.
    #[cfg(feature = "config")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlaybackConfigError> {
        let path = path.as_ref();
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let config = if is_toml {
            Self::from_toml_file(path)?
        } else {
            Self::from_json_file(path)?
        };
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(PlaybackConfigError::Validation(errors));
        }
        tracing::debug!(
            message = "config.loaded",
            path = %path.display(),
            speed = config.speed
        );
        Ok(config)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(Speed::MIN.get()..=Speed::MAX.get()).contains(&self.speed) {
            errors.push(format!(
                "speed must be in {}..={}, got {}",
                Speed::MIN.get(),
                Speed::MAX.get(),
                self.speed
            ));
        }

        if self.interval.floor_ms == 0 {
            errors.push("interval.floor_ms must be > 0".into());
        }
        if self.interval.base_ms < self.interval.floor_ms {
            errors.push(format!(
                "interval.base_ms must be >= floor_ms ({}), got {}",
                self.interval.floor_ms, self.interval.base_ms
            ));
        }

        for (name, value) in [
            ("time", self.weights.time),
            ("comparisons", self.weights.comparisons),
            ("swaps", self.weights.swaps),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!(
                    "weights.{name} must be finite and >= 0, got {value}"
                ));
            }
        }

        errors
    }

    /// Speed clamped into range.
    #[must_use]
    pub fn speed(&self) -> Speed {
        Speed::new(self.speed)
    }

    /// Tick interval this config yields.
    #[must_use]
    pub fn tick_interval(&self) -> std::time::Duration {
        self.interval.interval(self.speed())
    }
}

/// Errors that can occur when loading a playback configuration.
#[derive(Debug)]
pub enum PlaybackConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for PlaybackConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for PlaybackConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_matches_built_in_constants() {
        let config = PlaybackConfig::default();
        assert_eq!(config.speed(), Speed::default());
        assert_eq!(config.interval, IntervalPolicy::DEFAULT);
        assert_eq!(config.weights, ScoreWeights::DEFAULT);
        assert!(config.validate().is_empty());
        assert_eq!(config.tick_interval(), Duration::from_millis(1100));
    }

    #[test]
    fn validate_reports_each_problem() {
        let config = PlaybackConfig {
            speed: 0,
            interval: IntervalPolicy {
                base_ms: 100,
                step_ms: 10,
                floor_ms: 0,
            },
            weights: ScoreWeights {
                time: f64::NAN,
                comparisons: -1.0,
                swaps: 0.2,
            },
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(errors.iter().any(|e| e.starts_with("speed")));
        assert!(errors.iter().any(|e| e.contains("floor_ms must be > 0")));
        assert!(errors.iter().any(|e| e.contains("weights.time")));
        assert!(errors.iter().any(|e| e.contains("weights.comparisons")));
    }

    #[test]
    fn base_below_floor_is_rejected() {
        let config = PlaybackConfig {
            interval: IntervalPolicy {
                base_ms: 100,
                step_ms: 10,
                floor_ms: 200,
            },
            ..PlaybackConfig::default()
        };
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn validation_error_display_joins() {
        let err = PlaybackConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
    }

    #[cfg(feature = "config")]
    mod loading {
        use super::*;

        #[test]
        fn partial_toml_keeps_defaults() {
            let config = PlaybackConfig::from_toml_str("speed = 9\n[weights]\nswaps = 0.5\n").unwrap();
            assert_eq!(config.speed, 9);
            assert_eq!(config.weights.swaps, 0.5);
            assert_eq!(config.weights.time, 1.0);
            assert_eq!(config.interval, IntervalPolicy::DEFAULT);
        }

        #[test]
        fn json_round_trip() {
            let json = r#"{"speed":3,"interval":{"floor_ms":100}}"#;
            let config = PlaybackConfig::from_json_str(json).unwrap();
            assert_eq!(config.speed, 3);
            assert_eq!(config.interval.floor_ms, 100);
            assert_eq!(config.interval.base_ms, 2000);
        }

        #[test]
        fn malformed_toml_is_a_parse_error() {
            let err = PlaybackConfig::from_toml_str("speed = \"fast\"").unwrap_err();
            assert!(matches!(err, PlaybackConfigError::Toml(_)));
            assert!(std::error::Error::source(&err).is_some());
        }

        #[test]
        fn load_picks_format_by_extension() {
            let dir = tempfile::tempdir().unwrap();
            let toml_path = dir.path().join("sortviz.toml");
            std::fs::write(&toml_path, "speed = 10\n").unwrap();
            assert_eq!(PlaybackConfig::load(&toml_path).unwrap().speed, 10);

            let json_path = dir.path().join("sortviz.json");
            std::fs::write(&json_path, r#"{"speed": 2}"#).unwrap();
            assert_eq!(PlaybackConfig::load(&json_path).unwrap().speed, 2);
        }

        #[test]
        fn load_validates() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("bad.toml");
            std::fs::write(&path, "speed = 42\n").unwrap();
            assert!(matches!(
                PlaybackConfig::load(&path),
                Err(PlaybackConfigError::Validation(_))
            ));
        }

        #[test]
        fn missing_file_is_io() {
            let err = PlaybackConfig::load("/nonexistent/sortviz.toml").unwrap_err();
            assert!(matches!(err, PlaybackConfigError::Io(_)));
        }
    }
}
