use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during barber record operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BarberError {
    #[error("Barber not found: {0}")]
    NotFound(String),
    #[error("Barber validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for BarberError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(what) => Self::NotFound(what),
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}
