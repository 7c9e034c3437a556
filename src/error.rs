use thiserror::Error;

/// Errors raised by the kinetic engine (distribution, collision, sweep, observable).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KineticsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid temperature range: start={start}, end={end} (need start > end > 0)")]
    InvalidRange { start: f64, end: f64 },

    #[error("Unknown coupling channel '{0}'")]
    UnknownChannel(String),

    #[error("Dimension mismatch: expected {expected} samples, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Integration failed at T={temperature:e}: {reason}")]
    IntegrationFailure { temperature: f64, reason: String },
}

pub type KineticsResult<T> = Result<T, KineticsError>;

impl KineticsError {
    /// Process exit code used when the error reaches the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            KineticsError::InvalidInput(_)
            | KineticsError::InvalidRange { .. }
            | KineticsError::UnknownChannel(_)
            | KineticsError::DimensionMismatch { .. } => 2,
            KineticsError::IntegrationFailure { .. } => 4,
        }
    }
}

/// Application-level error: an exit code plus a printable message.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<KineticsError> for AppError {
    fn from(err: KineticsError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinetics_errors_map_to_exit_codes() {
        let app: AppError = KineticsError::UnknownChannel("neutrino".into()).into();
        assert_eq!(app.exit_code(), 2);
        assert!(app.to_string().contains("neutrino"));

        let app: AppError = KineticsError::IntegrationFailure {
            temperature: 1.0,
            reason: "nan".into(),
        }
        .into();
        assert_eq!(app.exit_code(), 4);
    }
}
