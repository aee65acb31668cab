//! Calendar date value type and civil-day arithmetic.
//!
//! All dates are proleptic-Gregorian local calendar dates with no time
//! component. Conversions between (year, month, day) and a continuous
//! day count use the civil-from-days algorithm, which keeps day
//! shifting exact across month and year boundaries.

use std::time::{SystemTime, UNIX_EPOCH};

/// Days of the week in Sunday-first order.
///
/// The widget API anchors week rotation at Sunday = 0, so index
/// helpers on this enum use the same base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Weekday {
    /// Sunday, index 0.
    #[default]
    Sunday,
    /// Monday, index 1.
    Monday,
    /// Tuesday, index 2.
    Tuesday,
    /// Wednesday, index 3.
    Wednesday,
    /// Thursday, index 4.
    Thursday,
    /// Friday, index 5.
    Friday,
    /// Saturday, index 6.
    Saturday,
}

impl Weekday {
    /// Returns the Sunday-based index (0-6).
    pub fn index(self) -> u8 {
        match self {
            Weekday::Sunday => 0,
            Weekday::Monday => 1,
            Weekday::Tuesday => 2,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 4,
            Weekday::Friday => 5,
            Weekday::Saturday => 6,
        }
    }

    /// Returns the weekday for a Sunday-based index, wrapping modulo 7.
    pub fn from_index(index: i32) -> Self {
        match index.rem_euclid(7) {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }
}

/// A calendar date expressed as year, month (1-12), and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Creates a calendar date if the values are valid.
    pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        let max_day = days_in_month(year, month);
        if day == 0 || day > max_day {
            return None;
        }
        Some(Self { year, month, day })
    }

    /// Returns the year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of the month (1-31).
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Returns the first day of the given month, clamping `month`
    /// into 1-12.
    pub fn first_of_month(year: i32, month: u8) -> Self {
        Self::new_unchecked(year, month.clamp(1, 12), 1)
    }

    /// Returns the current date in UTC.
    pub fn today() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let days = (duration.as_secs() / 86_400) as i64;
        let (year, month, day) = civil_from_days(days);
        CalendarDate::new(year, month, day)
            .unwrap_or_else(|| CalendarDate::new_unchecked(1970, 1, 1))
    }

    /// Returns the day of the week for this date.
    pub fn weekday(&self) -> Weekday {
        let days = days_from_civil(self.year, self.month, self.day);
        // 1970-01-01 was a Thursday, Sunday-based index 4.
        Weekday::from_index(((days + 4).rem_euclid(7)) as i32)
    }

    /// Returns the date shifted by `delta` whole days.
    pub fn add_days(&self, delta: i64) -> Self {
        let days = days_from_civil(self.year, self.month, self.day) + delta;
        let (year, month, day) = civil_from_days(days);
        CalendarDate::new_unchecked(year, month, day)
    }

    pub(crate) fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

/// Gregorian leap-year test: divisible by 4 and either not by 100 or
/// by 400.
pub fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Returns the number of days in the given month, accounting for leap
/// years in February.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap(year) => 29,
        2 => 28,
        _ => 30,
    }
}

/// Returns the day of the week for a Gregorian date, Sunday = 0.
pub fn week_day(year: i32, month: u8, day: u8) -> u8 {
    CalendarDate::new_unchecked(year, month, day).weekday().index()
}

fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let mut y = year;
    let m = month as i32;
    let d = day as i32;
    y -= if m <= 2 { 1 } else { 0 };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = m + if m > 2 { -3 } else { 9 };
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    (era * 146_097 + doe - 719_468) as i64
}

fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = mp + if mp < 10 { 3 } else { -9 };
    let year = y + if month <= 2 { 1 } else { 0 };
    (year as i32, month as u8, day as u8)
}
