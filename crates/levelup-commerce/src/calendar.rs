//! Clock abstraction and date helpers.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

/// Source of the current time.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Today's calendar date, used for age checks.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock. `today` uses the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Noon UTC on the given date. Returns `None` for an invalid date.
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(Self(date.and_hms_opt(12, 0, 0)?.and_utc()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Age in whole years on `today`, truncated. Zero for future birthdates.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_on_birthday_boundary() {
        let birth = date(2007, 10, 18);
        assert_eq!(age_on(birth, date(2025, 10, 17)), 17);
        assert_eq!(age_on(birth, date(2025, 10, 18)), 18);
        assert_eq!(age_on(birth, date(2026, 1, 1)), 18);
    }

    #[test]
    fn test_age_on_future_birthdate() {
        assert_eq!(age_on(date(2030, 1, 1), date(2025, 1, 1)), 0);
    }

    #[test]
    fn test_leap_day_birthday() {
        let birth = date(2004, 2, 29);
        assert_eq!(age_on(birth, date(2022, 2, 28)), 17);
        assert_eq!(age_on(birth, date(2022, 3, 1)), 18);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::at_date(2025, 10, 5).unwrap();
        assert_eq!(clock.today(), date(2025, 10, 5));
        assert!(FixedClock::at_date(2025, 2, 30).is_none());
    }
}
