use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{DispatchError, DispatchResult};

/// One weekly recurring interval during which a barber is schedulable.
///
/// `day_of_week` counts from Sunday (0) to Saturday (6). Windows never cross midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

impl AvailabilityWindow {
    /// Parse a window from `HH:mm` strings.
    pub fn parse(day_of_week: u8, start: &str, end: &str, is_available: bool) -> DispatchResult<Self> {
        let window = Self {
            day_of_week,
            start_time: parse_hhmm(start)?,
            end_time: parse_hhmm(end)?,
            is_available,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> DispatchResult<()> {
        if self.day_of_week > 6 {
            return Err(DispatchError::ValidationError(format!(
                "day_of_week must be 0-6, got {}",
                self.day_of_week
            )));
        }
        if self.start_time >= self.end_time {
            return Err(DispatchError::ValidationError(format!(
                "window start {} must be before end {}",
                self.start_time.format("%H:%M"),
                self.end_time.format("%H:%M")
            )));
        }
        Ok(())
    }

    /// Inclusive at both ends.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start_time <= time && time <= self.end_time
    }
}

fn parse_hhmm(value: &str) -> DispatchResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| DispatchError::ValidationError(format!("Invalid time of day: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_window() {
        let window = AvailabilityWindow::parse(1, "08:00", "17:30", true).unwrap();
        assert_eq!(window.start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(window.end_time, NaiveTime::from_hms_opt(17, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(AvailabilityWindow::parse(7, "08:00", "17:00", true).is_err());
        assert!(AvailabilityWindow::parse(1, "17:00", "08:00", true).is_err());
        assert!(AvailabilityWindow::parse(1, "8am", "17:00", true).is_err());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let window = AvailabilityWindow::parse(1, "08:00", "17:00", true).unwrap();
        assert!(window.contains(NaiveTime::from_hms_opt(8, 0, 0).unwrap()));
        assert!(window.contains(NaiveTime::from_hms_opt(17, 0, 0).unwrap()));
        assert!(!window.contains(NaiveTime::from_hms_opt(17, 1, 0).unwrap()));
    }
}
