use thiserror::Error;

use crate::barber_actor::BarberError;
use crate::domain::{BarberStatus, JobStatus};
use crate::order_actor::OrderError;

/// Errors returned by every dispatch operation.
///
/// The record actors raise their own `OrderError` and `BarberError`; both fold
/// into this type at the service boundary. Notification failures never appear
/// here, they end inside the detached notification task.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid state: order is {current}, cannot move to {requested}")]
    InvalidState { current: JobStatus, requested: JobStatus },
    #[error("Invalid transition from {current} to {requested}")]
    InvalidTransition { current: JobStatus, requested: JobStatus },
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Barber {barber_id} cannot take assignments: {reason}")]
    InvalidBarberState { barber_id: String, reason: String },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl DispatchError {
    pub fn order_unavailable(order_id: &str) -> Self {
        OrderError::unavailable(order_id).into()
    }

    pub fn barber_inactive(barber_id: &str, status: BarberStatus) -> Self {
        OrderError::barber_inactive(barber_id, status).into()
    }
}

impl From<OrderError> for DispatchError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(what) => Self::NotFound(what),
            OrderError::InvalidState { current, requested } => Self::InvalidState { current, requested },
            OrderError::InvalidTransition { current, requested } => {
                Self::InvalidTransition { current, requested }
            }
            OrderError::InvalidBarberState { barber_id, reason } => {
                Self::InvalidBarberState { barber_id, reason }
            }
            OrderError::ValidationError(msg) => Self::ValidationError(msg),
            OrderError::ActorCommunicationError(msg) => Self::ActorCommunicationError(msg),
        }
    }
}

impl From<BarberError> for DispatchError {
    fn from(e: BarberError) -> Self {
        match e {
            BarberError::NotFound(what) => Self::NotFound(what),
            BarberError::ValidationError(msg) => Self::ValidationError(msg),
            BarberError::ActorCommunicationError(msg) => Self::ActorCommunicationError(msg),
        }
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;
