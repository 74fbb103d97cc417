use crate::domain::AvailabilityWindow;

/// Custom actions for Barber records.
#[derive(Debug, Clone)]
pub enum BarberAction {
    /// Flip the manual online toggle.
    SetOnline(bool),
    /// Replace the whole weekly schedule. Malformed windows are dropped.
    ReplaceAvailability(Vec<AvailabilityWindow>),
    /// Fold a 1-5 customer rating into the running average.
    RecordReview(u8),
    /// Count one more completed booking.
    RecordBooking,
}

/// Results from BarberActions - variants match 1:1 with BarberAction
#[derive(Debug, Clone, PartialEq)]
pub enum BarberActionResult {
    SetOnline(bool),
    ReplaceAvailability(Vec<AvailabilityWindow>),
    RecordReview { rating_avg: f64, total_reviews: u32 },
    RecordBooking(u32),
}
