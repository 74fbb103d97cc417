use serde::{Deserialize, Serialize};
use std::fmt;

/// Dispatch lifecycle of an order, distinct from its payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// No barber attached yet
    #[default]
    Unassigned,
    /// Assigned and waiting for the barber to respond
    PendingAcceptance,
    Accepted,
    OnTheWay,
    Arrived,
    /// Terminal
    Completed,
    /// Barber refused the job; the order may be reassigned
    Declined,
}

impl JobStatus {
    pub const ALL: [JobStatus; 7] = [
        Self::Unassigned,
        Self::PendingAcceptance,
        Self::Accepted,
        Self::OnTheWay,
        Self::Arrived,
        Self::Completed,
        Self::Declined,
    ];

    /// Targets reachable through a barber-driven advance from this status.
    pub fn advance_targets(&self) -> &'static [JobStatus] {
        match self {
            Self::Accepted => &[Self::OnTheWay],
            Self::OnTheWay => &[Self::Arrived],
            Self::Arrived => &[Self::Completed],
            _ => &[],
        }
    }

    /// An operator may attach a barber only from these statuses.
    pub fn is_assignable(&self) -> bool {
        matches!(self, Self::Unassigned | Self::Declined)
    }

    /// Accepted but not yet completed.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Accepted | Self::OnTheWay | Self::Arrived)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Whether `self -> to` is an edge of the dispatch lifecycle graph.
    pub fn can_transition_to(&self, to: JobStatus) -> bool {
        match (self, to) {
            (Self::Unassigned | Self::Declined, Self::PendingAcceptance) => true,
            (Self::PendingAcceptance, Self::Accepted | Self::Declined) => true,
            (from, to) => from.advance_targets().contains(&to),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unassigned => "UNASSIGNED",
            Self::PendingAcceptance => "PENDING_ACCEPTANCE",
            Self::Accepted => "ACCEPTED",
            Self::OnTheWay => "ON_THE_WAY",
            Self::Arrived => "ARRIVED",
            Self::Completed => "COMPLETED",
            Self::Declined => "DECLINED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid job status: {s}"))
    }
}
