//! Preconditions checked before any field of the order is written.

use crate::domain::{BarberStatus, JobStatus, Order};
use crate::order_actor::OrderError;

use super::events::JobCommand;

/// Run every guard for `command`, in the order callers observe failures:
/// input validation, ownership, conditional write, transition legality.
pub fn check(order: &Order, command: &JobCommand, expected: JobStatus) -> Result<(), OrderError> {
    let current = order.job_status;
    let requested = command.target_status();

    match command {
        JobCommand::Assign { barber_id, barber_status } => {
            if *barber_status != BarberStatus::Active {
                return Err(OrderError::barber_inactive(barber_id, *barber_status));
            }
            stale_read(current, expected, requested)?;
            if !current.is_assignable() {
                return Err(OrderError::InvalidState { current, requested });
            }
        }
        JobCommand::Accept { barber_id } => {
            owned_by(order, barber_id)?;
            stale_read(current, expected, requested)?;
            if current != JobStatus::PendingAcceptance {
                return Err(OrderError::InvalidState { current, requested });
            }
        }
        JobCommand::Decline { barber_id, reason } => {
            if reason.trim().is_empty() {
                return Err(OrderError::ValidationError("Decline reason is required".to_string()));
            }
            owned_by(order, barber_id)?;
            stale_read(current, expected, requested)?;
            if current != JobStatus::PendingAcceptance {
                return Err(OrderError::InvalidState { current, requested });
            }
        }
        JobCommand::Advance { barber_id, target } => {
            owned_by(order, barber_id)?;
            stale_read(current, expected, requested)?;
            if !current.advance_targets().contains(target) {
                return Err(OrderError::InvalidTransition {
                    current,
                    requested: *target,
                });
            }
        }
    }

    Ok(())
}

/// A barber acting on an order held by someone else sees the same error as for a
/// missing order.
fn owned_by(order: &Order, barber_id: &str) -> Result<(), OrderError> {
    if order.is_assigned_to(barber_id) {
        Ok(())
    } else {
        Err(OrderError::unavailable(&order.id))
    }
}

fn stale_read(current: JobStatus, expected: JobStatus, requested: JobStatus) -> Result<(), OrderError> {
    if current == expected {
        Ok(())
    } else {
        tracing::debug!(%current, %expected, "Conditional write rejected");
        Err(OrderError::InvalidState { current, requested })
    }
}
