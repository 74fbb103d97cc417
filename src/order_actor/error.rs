use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::domain::{BarberStatus, JobStatus};

/// Errors raised by the order actor and the job state machine it runs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid state: order is {current}, cannot move to {requested}")]
    InvalidState { current: JobStatus, requested: JobStatus },
    #[error("Invalid transition from {current} to {requested}")]
    InvalidTransition { current: JobStatus, requested: JobStatus },
    #[error("Barber {barber_id} cannot take assignments: {reason}")]
    InvalidBarberState { barber_id: String, reason: String },
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    /// The message shown to a barber acting on an order they do not hold.
    pub fn unavailable(order_id: &str) -> Self {
        Self::NotFound(format!("Order {order_id} not found or not available"))
    }

    pub fn barber_inactive(barber_id: &str, status: BarberStatus) -> Self {
        Self::InvalidBarberState {
            barber_id: barber_id.to_string(),
            reason: format!("status is {status}"),
        }
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(what) => Self::NotFound(what),
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}
