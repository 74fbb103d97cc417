use chrono::{DateTime, Utc};

use crate::domain::{BarberStatus, JobStatus, Order};

/// What the caller wants to happen to an order's dispatch state.
#[derive(Debug, Clone, PartialEq)]
pub enum JobCommand {
    /// Operator attaches a barber. Carries the barber's administrative status as read
    /// by the orchestrator.
    Assign {
        barber_id: String,
        barber_status: BarberStatus,
    },
    Accept {
        barber_id: String,
    },
    Decline {
        barber_id: String,
        reason: String,
    },
    /// Barber-driven progress: on the way, arrived, completed.
    Advance {
        barber_id: String,
        target: JobStatus,
    },
}

impl JobCommand {
    pub fn barber_id(&self) -> &str {
        match self {
            Self::Assign { barber_id, .. }
            | Self::Accept { barber_id }
            | Self::Decline { barber_id, .. }
            | Self::Advance { barber_id, .. } => barber_id,
        }
    }

    /// The status the order ends up in if the command succeeds.
    pub fn target_status(&self) -> JobStatus {
        match self {
            Self::Assign { .. } => JobStatus::PendingAcceptance,
            Self::Accept { .. } => JobStatus::Accepted,
            Self::Decline { .. } => JobStatus::Declined,
            Self::Advance { target, .. } => *target,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "assign",
            Self::Accept { .. } => "accept",
            Self::Decline { .. } => "decline",
            Self::Advance { .. } => "advance",
        }
    }
}

/// A command plus the conditional-write precondition.
///
/// `expected` is the job status the caller observed on its fresh read; the write is
/// rejected if the stored status has moved on since.
#[derive(Debug, Clone, PartialEq)]
pub struct JobAction {
    pub command: JobCommand,
    pub expected: JobStatus,
    pub at: DateTime<Utc>,
}

impl JobAction {
    pub fn new(command: JobCommand, expected: JobStatus, at: DateTime<Utc>) -> Self {
        Self { command, expected, at }
    }
}

/// A committed transition together with the order as written.
#[derive(Debug, Clone, PartialEq)]
pub struct JobTransition {
    pub from: JobStatus,
    pub to: JobStatus,
    pub order: Order,
}
