//! Locale-aware date part formatting.
//!
//! ## Usage
//!
//! [`format_to_parts`] decomposes a date into display parts through a
//! [`Locale`] name table; [`DateFormatter`] adds the per-field view
//! toggles the calendar header and pickers use. All functions are pure
//! given their inputs; nothing is cached.

use derive_setters::Setters;

use crate::date::CalendarDate;

/// A date part that can be requested from [`format_to_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    /// Era designator (BC/AD).
    Era,
    /// Year number.
    Year,
    /// Month name or number.
    Month,
    /// Day of the month.
    Day,
    /// Day of the week.
    Weekday,
}

/// Rendering style for a single date field, mirroring the option
/// values of the original locale formatting primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStyle {
    /// Plain number, no padding.
    Numeric,
    /// Zero-padded two-digit number.
    TwoDigit,
    /// Abbreviated name.
    Short,
    /// Full name.
    Long,
}

/// Display-name tables for one locale.
///
/// Weekday tables are indexed Sunday-first to match
/// [`Weekday::index`](crate::Weekday::index).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// Full month names, January first.
    pub months_long: [&'static str; 12],
    /// Abbreviated month names, January first.
    pub months_short: [&'static str; 12],
    /// Full weekday names, Sunday first.
    pub weekdays_long: [&'static str; 7],
    /// Abbreviated weekday names, Sunday first.
    pub weekdays_short: [&'static str; 7],
    /// Era names, `[before-common, common]`.
    pub eras: [&'static str; 2],
}

impl Locale {
    /// English locale tables.
    pub const EN: Locale = Locale {
        months_long: [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ],
        months_short: [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ],
        weekdays_long: [
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ],
        weekdays_short: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        eras: ["BC", "AD"],
    };
}

impl Default for Locale {
    fn default() -> Self {
        Locale::EN
    }
}

/// Field styles used when rendering each date part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Style for the day of the month.
    pub day: FieldStyle,
    /// Style for the month.
    pub month: FieldStyle,
    /// Style for the weekday.
    pub weekday: FieldStyle,
    /// Style for the year.
    pub year: FieldStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            day: FieldStyle::Numeric,
            month: FieldStyle::Short,
            weekday: FieldStyle::Short,
            year: FieldStyle::Numeric,
        }
    }
}

impl FormatOptions {
    /// Shallow-merges the provided fields into the current options.
    pub fn merge(&mut self, patch: FormatOptionsPatch) {
        if let Some(day) = patch.day {
            self.day = day;
        }
        if let Some(month) = patch.month {
            self.month = month;
        }
        if let Some(weekday) = patch.weekday {
            self.weekday = weekday;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
    }
}

/// Partial update for [`FormatOptions`]; absent fields keep their
/// current value.
#[derive(Debug, Clone, Copy, Default, Setters)]
#[setters(strip_option)]
pub struct FormatOptionsPatch {
    /// New style for the day field.
    pub day: Option<FieldStyle>,
    /// New style for the month field.
    pub month: Option<FieldStyle>,
    /// New style for the weekday field.
    pub weekday: Option<FieldStyle>,
    /// New style for the year field.
    pub year: Option<FieldStyle>,
}

/// Per-field toggles selecting locale-formatted names over raw
/// numeric strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatViews {
    /// Format the day through the locale.
    pub day: bool,
    /// Format the month through the locale.
    pub month: bool,
    /// Format the year through the locale.
    pub year: bool,
}

impl Default for FormatViews {
    fn default() -> Self {
        Self {
            day: false,
            month: true,
            year: false,
        }
    }
}

impl FormatViews {
    /// Shallow-merges the provided fields into the current toggles.
    pub fn merge(&mut self, patch: FormatViewsPatch) {
        if let Some(day) = patch.day {
            self.day = day;
        }
        if let Some(month) = patch.month {
            self.month = month;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
    }
}

/// Partial update for [`FormatViews`]; absent fields keep their
/// current value.
#[derive(Debug, Clone, Copy, Default, Setters)]
#[setters(strip_option)]
pub struct FormatViewsPatch {
    /// New toggle for the day field.
    pub day: Option<bool>,
    /// New toggle for the month field.
    pub month: Option<bool>,
    /// New toggle for the year field.
    pub year: Option<bool>,
}

/// A date decomposed into ordered display parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedParts {
    /// The date the parts were produced from.
    pub date: CalendarDate,
    /// The requested parts in request order, with their rendered text.
    pub parts: Vec<(DatePart, String)>,
    /// All rendered parts concatenated into one display string.
    pub full: String,
}

/// Weekday and month-day strings for the calendar header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderParts {
    /// Formatted weekday name.
    pub weekday: String,
    /// Formatted "month day" pair.
    pub monthday: String,
}

/// Renders one date part through the locale tables.
pub fn format_part(
    date: CalendarDate,
    locale: &Locale,
    options: &FormatOptions,
    part: DatePart,
) -> String {
    match part {
        DatePart::Era => {
            let idx = if date.year() <= 0 { 0 } else { 1 };
            locale.eras[idx].to_string()
        }
        DatePart::Year => match options.year {
            FieldStyle::TwoDigit => format!("{:02}", date.year().rem_euclid(100)),
            _ => date.year().to_string(),
        },
        DatePart::Month => match options.month {
            FieldStyle::Numeric => date.month().to_string(),
            FieldStyle::TwoDigit => format!("{:02}", date.month()),
            FieldStyle::Short => locale.months_short[date.month() as usize - 1].to_string(),
            FieldStyle::Long => locale.months_long[date.month() as usize - 1].to_string(),
        },
        DatePart::Day => match options.day {
            FieldStyle::TwoDigit => format!("{:02}", date.day()),
            _ => date.day().to_string(),
        },
        DatePart::Weekday => {
            let idx = date.weekday().index() as usize;
            match options.weekday {
                FieldStyle::Long => locale.weekdays_long[idx].to_string(),
                _ => locale.weekdays_short[idx].to_string(),
            }
        }
    }
}

/// Renders each requested part and concatenates them into one display
/// string, in request order.
pub fn format_to_parts(
    date: CalendarDate,
    locale: &Locale,
    options: &FormatOptions,
    parts: &[DatePart],
) -> FormattedParts {
    let parts: Vec<(DatePart, String)> = parts
        .iter()
        .map(|&part| (part, format_part(date, locale, options, part)))
        .collect();
    let full = parts
        .iter()
        .map(|(_, text)| text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    FormattedParts { date, parts, full }
}

/// Formats scalar date fields, honoring the per-field view toggles.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateFormatter {
    /// Locale name tables.
    pub locale: Locale,
    /// Field styles used when a view toggle is on.
    pub options: FormatOptions,
    /// Per-field toggles between raw numbers and locale names.
    pub views: FormatViews,
}

impl DateFormatter {
    /// Returns the month display string for `value`.
    ///
    /// With the month view toggled off this is the raw 1-based month
    /// number.
    pub fn formatted_month(&self, value: CalendarDate) -> String {
        if self.views.month {
            format_part(value, &self.locale, &self.options, DatePart::Month)
        } else {
            value.month().to_string()
        }
    }

    /// Returns the day display string for `value`.
    pub fn formatted_day(&self, value: CalendarDate) -> String {
        if self.views.day {
            format_part(value, &self.locale, &self.options, DatePart::Day)
        } else {
            value.day().to_string()
        }
    }

    /// Returns the year display string for `value`.
    pub fn formatted_year(&self, value: CalendarDate) -> String {
        if self.views.year {
            format_part(value, &self.locale, &self.options, DatePart::Year)
        } else {
            value.year().to_string()
        }
    }

    /// Returns the weekday display string for `value`.
    pub fn formatted_weekday(&self, value: CalendarDate) -> String {
        format_part(value, &self.locale, &self.options, DatePart::Weekday)
    }

    /// Composes the `{weekday, monthday}` pair for header display.
    pub fn header_parts(&self, value: CalendarDate) -> HeaderParts {
        let month = format_part(value, &self.locale, &self.options, DatePart::Month);
        let day = format_part(value, &self.locale, &self.options, DatePart::Day);
        HeaderParts {
            weekday: format_part(value, &self.locale, &self.options, DatePart::Weekday),
            monthday: format!("{month} {day}"),
        }
    }
}
