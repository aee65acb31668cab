//! Month-grid generation and calendar-safe date shifting.
//!
//! ## Usage
//!
//! [`Calendar`] turns a (year, month) pair into whole-week rows of
//! [`DayCell`] values, rotated to a configured first week day. The
//! grid is recomputed wholesale on every call and never patched in
//! place, so renderers can treat each result as an immutable snapshot.

use tracing::trace;

use crate::date::{CalendarDate, Weekday, days_in_month};

/// Number of cells in one week row.
pub const WEEK_LEN: usize = 7;

/// One week of grid cells, in first-week-day order.
pub type WeekRow = [DayCell; WEEK_LEN];

/// One cell of a month grid.
///
/// Padding cells before and after the displayed month carry real dates
/// from the adjacent months, flagged so renderers can grey them out
/// without a second date comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// The date this cell represents.
    pub date: CalendarDate,
    /// True when the date belongs to the displayed month.
    pub is_current_month: bool,
    /// True when the date belongs to the previous month.
    pub is_prev_month: bool,
    /// True when the date belongs to the next month.
    pub is_next_month: bool,
}

/// Unit for [`timedelta`] shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateUnit {
    /// Whole-day shift.
    Day,
    /// Whole-month shift with day-of-month clamping.
    Month,
    /// Whole-year shift with day-of-month clamping.
    Year,
}

/// Generates month grids rotated to a configured first week day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Calendar {
    /// Day anchoring the left column of every week row.
    pub first_week_day: Weekday,
}

impl Calendar {
    /// Creates a calendar starting weeks on the given day.
    pub fn new(first_week_day: Weekday) -> Self {
        Self { first_week_day }
    }

    /// Returns the 7 weekdays rotated so the configured first week day
    /// comes first. Used by renderers to build header labels.
    pub fn weekdays(&self) -> [Weekday; WEEK_LEN] {
        let mut days = [Weekday::Sunday; WEEK_LEN];
        let start = self.first_week_day.index() as i32;
        for (idx, slot) in days.iter_mut().enumerate() {
            *slot = Weekday::from_index(start + idx as i32);
        }
        days
    }

    /// Returns the weekday of the first of the month and the number of
    /// days in it.
    pub fn month_range(&self, year: i32, month: u8) -> (Weekday, u8) {
        let first = CalendarDate::new_unchecked(year, month, 1);
        (first.weekday(), days_in_month(year, month))
    }

    /// Returns the flat cell list for one month's grid.
    ///
    /// The first of the month is aligned to its weekday column by
    /// left-padding with the previous month's trailing days; the final
    /// week is completed with the next month's leading days, so the
    /// result length is always a multiple of 7. With `extra_week`, one
    /// additional full week is appended for transition pre-rendering.
    pub fn monthdates(&self, year: i32, month: u8, extra_week: bool) -> Vec<DayCell> {
        let first = CalendarDate::new_unchecked(year, month, 1);
        let offset = (first.weekday().index() as i32 - self.first_week_day.index() as i32)
            .rem_euclid(WEEK_LEN as i32) as usize;
        let month_len = days_in_month(year, month) as usize;
        let mut total = offset + month_len;
        total = total.div_ceil(WEEK_LEN) * WEEK_LEN;
        if extra_week {
            total += WEEK_LEN;
        }
        trace!(year, month, offset, total, "generating month grid");

        let start = first.add_days(-(offset as i64));
        (0..total)
            .map(|idx| {
                let date = start.add_days(idx as i64);
                let is_current_month = date.year() == year && date.month() == month;
                DayCell {
                    date,
                    is_current_month,
                    is_prev_month: !is_current_month && date < first,
                    is_next_month: !is_current_month && date > first,
                }
            })
            .collect()
    }

    /// Returns [`monthdates`](Self::monthdates) grouped into week rows
    /// of 7.
    pub fn monthdatescalendar(&self, year: i32, month: u8, extra_week: bool) -> Vec<WeekRow> {
        self.monthdates(year, month, extra_week)
            .chunks_exact(WEEK_LEN)
            .map(|week| {
                let mut row = [week[0]; WEEK_LEN];
                row.copy_from_slice(week);
                row
            })
            .collect()
    }
}

/// Returns a new date shifted by `amount` units.
///
/// Day shifts are exact civil-day increments. Month and year shifts
/// clamp the day-of-month to the last valid day of the resulting month
/// (Jan 31 + 1 month lands on Feb 28 or Feb 29, never rolling into
/// March); this clamping is what keeps month and year navigation
/// stable.
pub fn timedelta(date: CalendarDate, unit: DateUnit, amount: i32) -> CalendarDate {
    match unit {
        DateUnit::Day => date.add_days(amount as i64),
        DateUnit::Month => {
            let total = date.year() * 12 + (date.month() as i32 - 1) + amount;
            let year = total.div_euclid(12);
            let month = (total.rem_euclid(12) + 1) as u8;
            let day = date.day().min(days_in_month(year, month));
            CalendarDate::new_unchecked(year, month, day)
        }
        DateUnit::Year => {
            let year = date.year() + amount;
            let day = date.day().min(days_in_month(year, date.month()));
            CalendarDate::new_unchecked(year, date.month(), day)
        }
    }
}

/// Walks day-by-day from `start` (exclusive) to `end` (inclusive).
///
/// Returns an empty list when `start == end`. Callers prepend `start`
/// themselves to obtain the full inclusive range.
pub fn generate_date_range(start: CalendarDate, end: CalendarDate) -> Vec<CalendarDate> {
    let mut result = Vec::new();
    let mut current = start;
    while current != end {
        current = timedelta(current, DateUnit::Day, 1);
        result.push(current);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).expect("valid date")
    }

    #[test]
    fn test_weekdays_rotation() {
        let calendar = Calendar::new(Weekday::Monday);
        let days = calendar.weekdays();
        assert_eq!(days[0], Weekday::Monday);
        assert_eq!(days[6], Weekday::Sunday);

        let sunday_first = Calendar::default();
        assert_eq!(sunday_first.weekdays()[0], Weekday::Sunday);
    }

    #[test]
    fn test_month_range() {
        let calendar = Calendar::default();
        // September 2024 starts on a Sunday and has 30 days.
        assert_eq!(calendar.month_range(2024, 9), (Weekday::Sunday, 30));
        assert_eq!(calendar.month_range(2024, 2), (Weekday::Thursday, 29));
    }

    #[test]
    fn test_monthdates_whole_weeks() {
        let calendar = Calendar::default();
        for (year, month) in [(2024, 2), (2024, 9), (2021, 5), (2023, 12)] {
            let cells = calendar.monthdates(year, month, false);
            assert_eq!(cells.len() % WEEK_LEN, 0, "{year}-{month}");
            let with_extra = calendar.monthdates(year, month, true);
            assert_eq!(with_extra.len(), cells.len() + WEEK_LEN);
        }
    }

    #[test]
    fn test_monthdates_alignment_and_flags() {
        // May 2021: starts on Saturday, 31 days. Sunday-first grid
        // needs 6 leading cells from April and 5 trailing from June.
        let calendar = Calendar::default();
        let cells = calendar.monthdates(2021, 5, false);
        assert_eq!(cells.len(), 42);
        assert_eq!(cells[0].date, date(2021, 4, 25));
        assert!(cells[0].is_prev_month);
        assert!(!cells[0].is_current_month);
        assert_eq!(cells[6].date, date(2021, 5, 1));
        assert!(cells[6].is_current_month);
        assert_eq!(cells[41].date, date(2021, 6, 5));
        assert!(cells[41].is_next_month);

        let current_run: Vec<_> = cells.iter().filter(|c| c.is_current_month).collect();
        assert_eq!(current_run.len(), 31);
    }

    #[test]
    fn test_monthdates_monday_first() {
        let calendar = Calendar::new(Weekday::Monday);
        for week in calendar.monthdatescalendar(2024, 9, false) {
            assert_eq!(week[0].date.weekday(), Weekday::Monday);
        }
    }

    #[test]
    fn test_monthdatescalendar_rows() {
        let calendar = Calendar::default();
        let rows = calendar.monthdatescalendar(2024, 9, false);
        assert_eq!(rows.len(), 5);
        for row in &rows {
            assert_eq!(row.len(), WEEK_LEN);
        }
        // Consecutive dates across row boundaries.
        assert_eq!(rows[1][0].date, rows[0][6].date.add_days(1));
    }

    #[test]
    fn test_timedelta_month_clamping() {
        let jan31 = date(2021, 1, 31);
        let shifted = timedelta(jan31, DateUnit::Month, 1);
        assert_eq!(shifted, date(2021, 2, 28));

        let leap = timedelta(date(2024, 1, 31), DateUnit::Month, 1);
        assert_eq!(leap, date(2024, 2, 29));

        let back = timedelta(date(2021, 3, 31), DateUnit::Month, -1);
        assert_eq!(back, date(2021, 2, 28));

        let across_year = timedelta(date(2021, 12, 15), DateUnit::Month, 1);
        assert_eq!(across_year, date(2022, 1, 15));
        let back_year = timedelta(date(2021, 1, 15), DateUnit::Month, -1);
        assert_eq!(back_year, date(2020, 12, 15));
    }

    #[test]
    fn test_timedelta_year_clamping() {
        let feb29 = date(2024, 2, 29);
        assert_eq!(timedelta(feb29, DateUnit::Year, 1), date(2025, 2, 28));
        assert_eq!(timedelta(feb29, DateUnit::Year, 4), date(2028, 2, 29));
    }

    #[test]
    fn test_timedelta_day() {
        assert_eq!(
            timedelta(date(2021, 2, 28), DateUnit::Day, 1),
            date(2021, 3, 1)
        );
        assert_eq!(
            timedelta(date(2021, 3, 1), DateUnit::Day, -1),
            date(2021, 2, 28)
        );
    }

    #[test]
    fn test_generate_date_range() {
        let start = date(2024, 2, 27);
        let end = date(2024, 3, 2);
        let range = generate_date_range(start, end);
        assert_eq!(
            range,
            vec![
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1),
                date(2024, 3, 2),
            ]
        );

        let full: Vec<_> = std::iter::once(start).chain(range).collect();
        assert!(full.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(full.last().copied(), Some(end));

        assert!(generate_date_range(start, start).is_empty());
    }
}
