//! Configuration error types.
//!
//! Configuration problems are setup-time failures: they are reported once,
//! loudly, when a controller initializes, and the affected actor's controller
//! is disabled. The tick logic itself has no recoverable error paths.

use thiserror::Error;

/// Error produced when validating a [`MovementConfig`](crate::config::MovementConfig).
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A numeric field is NaN or infinite.
    #[error("`{0}` must be a finite number")]
    NonFinite(&'static str),

    /// A field that must be zero or positive is negative.
    #[error("`{0}` must not be negative")]
    Negative(&'static str),

    /// A fractional field is outside its allowed range.
    #[error("`{field}` must be within {min}..={max}, got {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Lower bound (inclusive).
        min: f32,
        /// Upper bound (inclusive).
        max: f32,
        /// The rejected value.
        value: f32,
    },

    /// `max_jump_count` must allow at least one jump.
    #[error("`max_jump_count` must be at least 1, got {0}")]
    NoJumps(i32),

    /// `max_fall_speed` is a floor on downward velocity and must be negative.
    #[error("`max_fall_speed` must be negative, got {0}")]
    FallSpeedNotNegative(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_field() {
        let err = ConfigError::NonFinite("move_speed");
        assert!(err.to_string().contains("move_speed"));

        let err = ConfigError::OutOfRange {
            field: "air_control",
            min: 0.0,
            max: 1.0,
            value: 2.0,
        };
        assert!(err.to_string().contains("air_control"));
        assert!(err.to_string().contains('2'));
    }
}
