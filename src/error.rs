//! Game-specific error types.
//!
//! Systems never panic on bad input: they log the error and keep the previous
//! state.  Validation helpers return these errors so callers can decide
//! whether to fall back to defaults.

use std::fmt;

use crate::constants::MAX_LEVEL;

/// Top-level error enum.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// A level index outside `1..`.  Indices above [`MAX_LEVEL`] are wrapped
    /// rather than rejected.
    InvalidLevel {
        /// The rejected level number.
        level: u8,
    },

    /// A configuration value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the config field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// `ENERGYLAB_START` could not be parsed.
    InvalidStartSpec {
        /// The raw value of the environment variable.
        spec: String,
    },

    /// The config file exists but is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse {
        path: String,
        message: String,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidLevel { level } => {
                write!(f, "invalid level {} (levels start at 1)", level)
            }
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            GameError::InvalidStartSpec { spec } => write!(
                f,
                "invalid start spec '{}' (expected platform|slingshot[:1-{}])",
                spec, MAX_LEVEL
            ),
            GameError::ConfigParse { path, message } => {
                write!(f, "failed to parse {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is in `(0.0, 1.0]`.
///
/// Used for the player efficiency: zero would make expended energy infinite.
pub fn validate_fraction(name: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, 1.0]",
        })
    }
}

/// Returns an error for level 0.
pub fn validate_level(level: u8) -> GameResult<u8> {
    if level == 0 {
        Err(GameError::InvalidLevel { level })
    } else {
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(validate_positive("k", 0.0).is_err());
        assert!(validate_positive("k", f32::NAN).is_err());
        assert!(validate_positive("k", 0.1).is_ok());
    }

    #[test]
    fn fraction_accepts_one_but_not_zero() {
        assert!(validate_fraction("efficiency", 1.0).is_ok());
        assert!(validate_fraction("efficiency", 0.0).is_err());
        assert!(validate_fraction("efficiency", 1.5).is_err());
    }

    #[test]
    fn level_zero_is_invalid() {
        assert_eq!(
            validate_level(0),
            Err(GameError::InvalidLevel { level: 0 })
        );
        assert_eq!(validate_level(7), Ok(7));
    }

    #[test]
    fn display_mentions_field_name() {
        let err = GameError::UnsafeConstant {
            name: "spring_k",
            value: -1.0,
            safe_range: "(0.0, ∞)",
        };
        assert!(err.to_string().contains("spring_k"));
    }
}
