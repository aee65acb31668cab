//! Core date engine for the almanac calendar widgets.
//!
//! This crate holds the pure, renderer-independent half of the
//! calendar stack: Gregorian date arithmetic, month-grid generation,
//! and locale-aware part formatting. Widget state machines build on it
//! from `almanac-components`; nothing here performs I/O or holds
//! mutable widget state.
//!
//! # Example
//!
//! ```
//! use almanac_core::{Calendar, CalendarDate, DateUnit, Weekday, timedelta};
//!
//! let calendar = Calendar::new(Weekday::Monday);
//! let weeks = calendar.monthdatescalendar(2024, 9, false);
//! assert!(weeks.iter().all(|week| week.len() == 7));
//!
//! // Month shifts clamp to the target month length.
//! let jan31 = CalendarDate::new(2024, 1, 31).unwrap();
//! let feb = timedelta(jan31, DateUnit::Month, 1);
//! assert_eq!((feb.month(), feb.day()), (2, 29));
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod calendar;
pub mod date;
pub mod format;

pub use calendar::{
    Calendar, DateUnit, DayCell, WEEK_LEN, WeekRow, generate_date_range, timedelta,
};
pub use date::{CalendarDate, Weekday, days_in_month, is_leap, week_day};
pub use format::{
    DateFormatter, DatePart, FieldStyle, FormatOptions, FormatOptionsPatch, FormatViews,
    FormatViewsPatch, FormattedParts, HeaderParts, Locale, format_part, format_to_parts,
};
