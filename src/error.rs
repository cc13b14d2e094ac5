// ⚠️ Compensation Errors - typed failures for validation and collaborators
//
// Every check runs before any mutation, so a returned error always means
// "nothing changed".

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompensationError {
    /// A numeric input (month, percentage, amount...) is outside its valid range,
    /// or a lookup key does not designate a known entity.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    /// A required collaborator is missing or unusable.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl CompensationError {
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        CompensationError::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CompensationError::InvalidArgument { .. })
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, CompensationError::InvalidState(_))
    }
}

pub type CompensationResult<T> = Result<T, CompensationError>;

/// Checks that a money amount is a finite, non-negative number.
pub(crate) fn ensure_non_negative(argument: &'static str, value: f64) -> CompensationResult<()> {
    if !value.is_finite() {
        return Err(CompensationError::invalid_argument(
            argument,
            format!("must be a finite number, got {}", value),
        ));
    }
    if value < 0.0 {
        return Err(CompensationError::invalid_argument(
            argument,
            format!("must be positive or zero, got {}", value),
        ));
    }
    Ok(())
}
