//! Current time and business-timezone calendar arithmetic.
//!
//! Availability and earnings periods are evaluated in one fixed civil timezone, never in
//! the host's local time.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use parking_lot::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// An instant decomposed in the operating timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalMoment {
    pub date: NaiveDate,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    /// Truncated to the minute
    pub time: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingCalendar {
    tz: Tz,
}

impl OperatingCalendar {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn localize(&self, instant: DateTime<Utc>) -> LocalMoment {
        let local = instant.with_timezone(&self.tz);
        let time = NaiveTime::from_hms_opt(local.hour(), local.minute(), 0).unwrap_or(NaiveTime::MIN);
        LocalMoment {
            date: local.date_naive(),
            day_of_week: local.weekday().num_days_from_sunday() as u8,
            time,
        }
    }

    /// Local midnight of the day containing `instant`.
    pub fn start_of_day(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let date = instant.with_timezone(&self.tz).date_naive();
        self.resolve(date.and_time(NaiveTime::MIN))
    }

    /// Local midnight on the first day of the month containing `instant`.
    pub fn start_of_month(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let date = instant.with_timezone(&self.tz).date_naive();
        let first = date.with_day(1).unwrap_or(date);
        self.resolve(first.and_time(NaiveTime::MIN))
    }

    /// DST gap: take the earliest valid instant, falling back to reading the wall time as UTC.
    fn resolve(&self, naive: NaiveDateTime) -> DateTime<Utc> {
        naive
            .and_local_timezone(self.tz)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_localize_uses_operating_timezone() {
        // Monday 2024-03-04 23:30 UTC is already Tuesday 06:30 in Jakarta.
        let calendar = OperatingCalendar::new(chrono_tz::Asia::Jakarta);
        let instant = Utc.with_ymd_and_hms(2024, 3, 4, 23, 30, 45).unwrap();

        let moment = calendar.localize(instant);
        assert_eq!(moment.day_of_week, 2);
        assert_eq!(moment.time, NaiveTime::from_hms_opt(6, 30, 0).unwrap());
        assert_eq!(moment.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_sunday_is_day_zero() {
        let calendar = OperatingCalendar::new(chrono_tz::UTC);
        let sunday = Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap();
        assert_eq!(calendar.localize(sunday).day_of_week, 0);
    }

    #[test]
    fn test_start_of_day_and_month() {
        let calendar = OperatingCalendar::new(chrono_tz::Asia::Jakarta);
        let instant = Utc.with_ymd_and_hms(2024, 3, 15, 3, 0, 0).unwrap();

        // Jakarta is UTC+7 with no DST.
        assert_eq!(
            calendar.start_of_day(instant),
            Utc.with_ymd_and_hms(2024, 3, 14, 17, 0, 0).unwrap()
        );
        assert_eq!(
            calendar.start_of_month(instant),
            Utc.with_ymd_and_hms(2024, 2, 29, 17, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_fixed_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        clock.advance(Duration::minutes(90));
        assert_eq!(clock.now(), start + Duration::minutes(90));
    }
}
