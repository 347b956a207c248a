//! Unified error hierarchy for RunCalc
//!
//! Calculation failures are local validation errors: every computation is
//! deterministic, so repeating a call with the same input yields the same error.

use thiserror::Error;

/// Top-level error type for all RunCalc operations
#[derive(Debug, Error)]
pub enum RunCalcError {
    /// Calculation input or result outside the model's domain
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Malformed user input (times, distances, unit tags)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Calculation errors, one per tag of the calculator's error taxonomy
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    /// Distance was zero, negative or not a number
    #[error("Distance must be greater than 0 (got {distance})")]
    InvalidDistance { distance: f64 },

    /// Time was zero, negative or not a number
    #[error("Time must be greater than 0 (got {time})")]
    InvalidTime { time: f64 },

    /// Derived VDOT is not positive
    #[error("VDOT {vdot:.2} is invalid, enter an actual race performance")]
    VdotTooLow { vdot: f64 },

    /// Derived VDOT is beyond the supported range
    #[error("VDOT {vdot:.2} is outside the supported range (maximum 100)")]
    VdotTooHigh { vdot: f64 },
}

impl CalculationError {
    /// Stable tag for callers that branch on the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            CalculationError::InvalidDistance { .. } => "invalid_distance",
            CalculationError::InvalidTime { .. } => "invalid_time",
            CalculationError::VdotTooLow { .. } => "vdot_too_low",
            CalculationError::VdotTooHigh { .. } => "vdot_too_high",
        }
    }
}

/// Result type alias for RunCalc operations
pub type Result<T> = std::result::Result<T, RunCalcError>;

/// Reject non-positive (or NaN) distances.
pub(crate) fn ensure_distance(distance_meters: f64) -> std::result::Result<(), CalculationError> {
    if distance_meters > 0.0 {
        Ok(())
    } else {
        Err(CalculationError::InvalidDistance {
            distance: distance_meters,
        })
    }
}

/// Reject non-positive (or NaN) times.
pub(crate) fn ensure_time(time_seconds: f64) -> std::result::Result<(), CalculationError> {
    if time_seconds > 0.0 {
        Ok(())
    } else {
        Err(CalculationError::InvalidTime { time: time_seconds })
    }
}

impl RunCalcError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, RunCalcError::Io(_))
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RunCalcError::Calculation(_) => ErrorSeverity::Warning,
            RunCalcError::Validation(_) => ErrorSeverity::Warning,
            RunCalcError::Configuration(_) => ErrorSeverity::Error,
            RunCalcError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Tag of the underlying calculation error, if any
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            RunCalcError::Calculation(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RunCalcError::Calculation(CalculationError::InvalidDistance { .. }) => {
                "Please enter a race distance greater than zero.".to_string()
            }
            RunCalcError::Calculation(CalculationError::InvalidTime { .. }) => {
                "Please enter a finishing time greater than zero.".to_string()
            }
            RunCalcError::Calculation(CalculationError::VdotTooLow { .. }) => {
                "That performance does not produce a valid VDOT. Please enter an actual race result."
                    .to_string()
            }
            RunCalcError::Calculation(CalculationError::VdotTooHigh { .. }) => {
                "That performance is faster than the VDOT model supports (maximum 100).".to_string()
            }
            RunCalcError::Validation(reason) => format!("Could not read input: {}", reason),
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the operation
    Error,
    /// Rejected input; the caller can correct it and retry
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            CalculationError::InvalidDistance { distance: 0.0 }.kind(),
            "invalid_distance"
        );
        assert_eq!(CalculationError::InvalidTime { time: -1.0 }.kind(), "invalid_time");
        assert_eq!(CalculationError::VdotTooLow { vdot: -3.0 }.kind(), "vdot_too_low");
        assert_eq!(CalculationError::VdotTooHigh { vdot: 111.0 }.kind(), "vdot_too_high");

        let err: RunCalcError = CalculationError::VdotTooHigh { vdot: 111.0 }.into();
        assert_eq!(err.kind(), Some("vdot_too_high"));
        assert_eq!(RunCalcError::Validation("x".to_string()).kind(), None);
    }

    #[test]
    fn test_error_severity() {
        let err = RunCalcError::from(CalculationError::InvalidTime { time: 0.0 });
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert_eq!(err.severity().to_tracing_level(), tracing::Level::WARN);

        let err = RunCalcError::Configuration("bad key".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_error_retryable() {
        let err = RunCalcError::from(CalculationError::VdotTooLow { vdot: -1.0 });
        assert!(!err.is_retryable());

        let err = RunCalcError::Io(std::io::Error::new(std::io::ErrorKind::Interrupted, "eintr"));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_guards() {
        assert!(ensure_distance(5000.0).is_ok());
        assert_eq!(
            ensure_distance(0.0),
            Err(CalculationError::InvalidDistance { distance: 0.0 })
        );
        assert!(ensure_distance(f64::NAN).is_err());
        assert!(ensure_time(1.0).is_ok());
        assert!(ensure_time(-5.0).is_err());
    }

    #[test]
    fn test_user_messages() {
        let err = RunCalcError::from(CalculationError::InvalidDistance { distance: 0.0 });
        assert!(err.user_message().contains("distance"));

        let err = RunCalcError::Validation("bad time '1:xx'".to_string());
        assert!(err.user_message().contains("1:xx"));
    }
}
