//! Dispatch eligibility: manual online toggle combined with the weekly schedule.

use serde::Serialize;

use crate::clock::LocalMoment;
use crate::domain::{AvailabilityWindow, Barber};

/// Result of an eligibility check, reported in full for observability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityStatus {
    pub is_online: bool,
    pub is_within_hours: bool,
    pub is_available: bool,
    /// The enabled window covering now, or else the first enabled window for today.
    pub today_window: Option<AvailabilityWindow>,
}

/// Evaluate eligibility at `moment`.
///
/// Every enabled window for today counts, so two disjoint windows on the same day are
/// both honoured.
pub fn evaluate(is_online: bool, windows: &[AvailabilityWindow], moment: &LocalMoment) -> AvailabilityStatus {
    let mut todays = windows
        .iter()
        .filter(|w| w.is_available && w.day_of_week == moment.day_of_week)
        .peekable();
    let first_today = todays.peek().copied().cloned();
    let covering = todays.find(|w| w.contains(moment.time)).cloned();

    let is_within_hours = covering.is_some();
    AvailabilityStatus {
        is_online,
        is_within_hours,
        is_available: is_online && is_within_hours,
        today_window: covering.or(first_today),
    }
}

pub fn evaluate_barber(barber: &Barber, moment: &LocalMoment) -> AvailabilityStatus {
    evaluate(barber.is_online, &barber.availability, moment)
}

/// Keep only well-formed windows, in input order.
///
/// Used when a barber replaces the whole schedule: malformed entries are dropped rather
/// than failing the replacement.
pub fn sanitize_windows(windows: Vec<AvailabilityWindow>) -> Vec<AvailabilityWindow> {
    windows
        .into_iter()
        .filter(|w| match w.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, day = w.day_of_week, "Dropping invalid availability window");
                false
            }
        })
        .collect()
}
