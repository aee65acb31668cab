//! Mode-scoped date selection state machine.
//!
//! ## Usage
//!
//! The renderer forwards clicked dates into
//! [`SelectionController::select_date`]; the controller turns them
//! into a canonical, ordered selection according to the active
//! [`SelectionMode`] and reports every change through an optional
//! callback.

use std::{fmt, str::FromStr, sync::Arc};

use almanac_core::{CalendarDate, generate_date_range};
use tracing::debug;

use crate::error::CalendarError;

/// Selection behavior of a calendar widget.
///
/// The mode is immutable for the lifetime of a selection: switching it
/// always resets the selection to the mode's empty representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// One scalar date; every pick replaces the previous one.
    #[default]
    Single,
    /// A free set of dates toggled in and out by day equality.
    Multi,
    /// A contiguous, day-expanded range built by a two-click protocol.
    Range,
}

impl SelectionMode {
    /// Returns the lowercase mode name.
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionMode::Single => "single",
            SelectionMode::Multi => "multi",
            SelectionMode::Range => "range",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "single" => Ok(SelectionMode::Single),
            "multi" => Ok(SelectionMode::Multi),
            "range" => Ok(SelectionMode::Range),
            _ => Err(CalendarError::InvalidMode {
                value: value.to_string(),
            }),
        }
    }
}

/// The current selection, shaped by its mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Single-mode selection; empty form is `None`.
    Single(Option<CalendarDate>),
    /// Multi-mode selection; empty form is an empty list.
    Multi(Vec<CalendarDate>),
    /// Range-mode selection, expanded day-by-day; empty form is an
    /// empty list.
    Range(Vec<CalendarDate>),
}

impl Selection {
    /// Returns the empty selection for the given mode.
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Selection::Single(None),
            SelectionMode::Multi => Selection::Multi(Vec::new()),
            SelectionMode::Range => Selection::Range(Vec::new()),
        }
    }

    /// Returns the mode this selection belongs to.
    pub fn mode(&self) -> SelectionMode {
        match self {
            Selection::Single(_) => SelectionMode::Single,
            Selection::Multi(_) => SelectionMode::Multi,
            Selection::Range(_) => SelectionMode::Range,
        }
    }

    /// Returns the selected dates as a slice.
    pub fn as_dates(&self) -> &[CalendarDate] {
        match self {
            Selection::Single(Some(date)) => std::slice::from_ref(date),
            Selection::Single(None) => &[],
            Selection::Multi(dates) | Selection::Range(dates) => dates,
        }
    }

    /// Returns true when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.as_dates().is_empty()
    }

    /// Returns the scalar selected date, if the selection holds
    /// exactly the single-mode form.
    pub fn scalar(&self) -> Option<CalendarDate> {
        match self {
            Selection::Single(date) => *date,
            _ => None,
        }
    }
}

/// Callback invoked with the new selection after every change.
pub type SelectionChanged = Arc<dyn Fn(&Selection) + Send + Sync>;

/// Turns user date picks into a canonical selection for the active
/// mode.
pub struct SelectionController {
    mode: SelectionMode,
    selection: Selection,
    range_anchor_pending: bool,
    on_change: Option<SelectionChanged>,
}

impl Default for SelectionController {
    fn default() -> Self {
        SelectionController::new(SelectionMode::Single)
    }
}

impl SelectionController {
    /// Creates a controller with an empty selection in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selection: Selection::empty(mode),
            range_anchor_pending: false,
            on_change: None,
        }
    }

    /// Returns the active selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Returns the current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns true between the first and second click of a range
    /// interaction.
    pub fn range_anchor_pending(&self) -> bool {
        self.range_anchor_pending
    }

    /// Registers the change callback.
    pub fn on_change<F>(&mut self, f: F)
    where
        F: Fn(&Selection) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(f));
    }

    /// Registers a shared change callback.
    pub fn on_change_shared(&mut self, f: SelectionChanged) {
        self.on_change = Some(f);
    }

    /// Switches the selection mode, resetting the selection to the
    /// mode's empty form and clearing any pending range anchor.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        debug!(from = %self.mode, to = %mode, "selection mode switch");
        self.mode = mode;
        self.selection = Selection::empty(mode);
        self.range_anchor_pending = false;
        self.notify();
    }

    /// Switches the selection mode from its string name.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMode`] for anything but
    /// `"single"`, `"multi"`, or `"range"`; the mode and selection are
    /// left untouched in that case.
    pub fn set_mode_str(&mut self, value: &str) -> Result<(), CalendarError> {
        self.set_mode(value.parse()?);
        Ok(())
    }

    /// Applies one scalar date pick according to the active mode.
    ///
    /// - `Single`: replaces the selection.
    /// - `Multi`: toggles the date by day equality.
    /// - `Range`: first pick records the anchor; the second expands
    ///   the pair into an ascending day range, or cancels the whole
    ///   selection when it lands on the anchor day again.
    ///
    /// The change callback fires exactly once per call.
    pub fn select_date(&mut self, date: CalendarDate) {
        match self.mode {
            SelectionMode::Single => {
                self.selection = Selection::Single(Some(date));
            }
            SelectionMode::Multi => {
                if let Selection::Multi(dates) = &mut self.selection {
                    if dates.contains(&date) {
                        dates.retain(|existing| *existing != date);
                    } else {
                        dates.push(date);
                    }
                }
            }
            SelectionMode::Range => {
                if !self.range_anchor_pending {
                    self.range_anchor_pending = true;
                    self.selection = Selection::Range(vec![date]);
                } else {
                    self.range_anchor_pending = false;
                    let anchor = self.selection.as_dates().first().copied();
                    if anchor == Some(date) {
                        // Re-clicking the anchor day is a cancel gesture.
                        self.selection = Selection::Range(Vec::new());
                    } else if let Some(anchor) = anchor {
                        let (start, end) = if anchor < date {
                            (anchor, date)
                        } else {
                            (date, anchor)
                        };
                        self.selection = Selection::Range(expand_range(start, end));
                    } else {
                        self.selection = Selection::Range(vec![date]);
                    }
                }
            }
        }
        self.notify();
    }

    /// Applies a bulk date pick according to the active mode.
    ///
    /// - `Single`: accepts exactly one date.
    /// - `Multi`: appends every element without deduplication;
    ///   callers supplying an array accept responsibility for its
    ///   contents.
    /// - `Range`: accepts exactly two dates, sorts them, and expands
    ///   the inclusive day range without touching the pending anchor
    ///   flag.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::MalformedSelection`] when the slice
    /// length does not fit the active mode; the selection is left
    /// untouched in that case.
    pub fn select_dates(&mut self, dates: &[CalendarDate]) -> Result<(), CalendarError> {
        match self.mode {
            SelectionMode::Single => {
                let [date] = dates else {
                    return Err(self.malformed(1, dates.len()));
                };
                self.selection = Selection::Single(Some(*date));
            }
            SelectionMode::Multi => {
                if let Selection::Multi(existing) = &mut self.selection {
                    existing.extend_from_slice(dates);
                }
            }
            SelectionMode::Range => {
                let [a, b] = dates else {
                    return Err(self.malformed(2, dates.len()));
                };
                let (start, end) = if a <= b { (*a, *b) } else { (*b, *a) };
                self.selection = Selection::Range(expand_range(start, end));
            }
        }
        self.notify();
        Ok(())
    }

    fn malformed(&self, expected: usize, len: usize) -> CalendarError {
        CalendarError::MalformedSelection {
            mode: self.mode.as_str(),
            expected,
            len,
        }
    }

    fn notify(&self) {
        if let Some(on_change) = &self.on_change {
            on_change(&self.selection);
        }
    }
}

fn expand_range(start: CalendarDate, end: CalendarDate) -> Vec<CalendarDate> {
    let mut dates = vec![start];
    dates.extend(generate_date_range(start, end));
    dates
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use rstest::rstest;

    use super::*;

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).expect("valid date")
    }

    #[rstest]
    #[case("single", SelectionMode::Single)]
    #[case("multi", SelectionMode::Multi)]
    #[case("range", SelectionMode::Range)]
    fn test_mode_parsing(#[case] input: &str, #[case] expected: SelectionMode) {
        assert_eq!(input.parse::<SelectionMode>(), Ok(expected));
    }

    #[test]
    fn test_mode_parsing_rejects_unknown() {
        let err = "weekly".parse::<SelectionMode>();
        assert_eq!(
            err,
            Err(CalendarError::InvalidMode {
                value: "weekly".to_string()
            })
        );

        let mut controller = SelectionController::default();
        controller.select_date(date(2024, 5, 1));
        assert!(controller.set_mode_str("weekly").is_err());
        // A rejected mode leaves the selection untouched.
        assert_eq!(controller.selection().scalar(), Some(date(2024, 5, 1)));
    }

    #[test]
    fn test_single_replaces() {
        let mut controller = SelectionController::new(SelectionMode::Single);
        controller.select_date(date(2024, 5, 1));
        controller.select_date(date(2024, 5, 9));
        assert_eq!(controller.selection().scalar(), Some(date(2024, 5, 9)));
    }

    #[test]
    fn test_single_fires_once_per_call() {
        let mut controller = SelectionController::new(SelectionMode::Single);
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        controller.on_change(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        controller.select_date(date(2024, 5, 1));
        controller.select_date(date(2024, 5, 1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_multi_toggle() {
        let mut controller = SelectionController::new(SelectionMode::Multi);
        controller.select_date(date(2024, 5, 1));
        controller.select_date(date(2024, 5, 2));
        assert_eq!(
            controller.selection().as_dates(),
            &[date(2024, 5, 1), date(2024, 5, 2)]
        );

        // Toggling an existing day removes it.
        controller.select_date(date(2024, 5, 1));
        assert_eq!(controller.selection().as_dates(), &[date(2024, 5, 2)]);

        // Added then removed leaves the selection empty.
        controller.select_date(date(2024, 5, 2));
        assert!(controller.selection().is_empty());
    }

    #[test]
    fn test_multi_bulk_append_keeps_duplicates() {
        let mut controller = SelectionController::new(SelectionMode::Multi);
        controller.select_date(date(2024, 5, 1));
        controller
            .select_dates(&[date(2024, 5, 1), date(2024, 5, 3)])
            .expect("bulk append");
        assert_eq!(
            controller.selection().as_dates(),
            &[date(2024, 5, 1), date(2024, 5, 1), date(2024, 5, 3)]
        );
    }

    #[test]
    fn test_range_two_click_ascending() {
        let mut controller = SelectionController::new(SelectionMode::Range);
        controller.select_date(date(2024, 5, 5));
        assert!(controller.range_anchor_pending());
        assert_eq!(controller.selection().as_dates(), &[date(2024, 5, 5)]);

        controller.select_date(date(2024, 5, 8));
        assert!(!controller.range_anchor_pending());
        assert_eq!(
            controller.selection().as_dates(),
            &[
                date(2024, 5, 5),
                date(2024, 5, 6),
                date(2024, 5, 7),
                date(2024, 5, 8),
            ]
        );
    }

    #[test]
    fn test_range_reversed_clicks_sort_ascending() {
        let mut controller = SelectionController::new(SelectionMode::Range);
        controller.select_date(date(2024, 5, 8));
        controller.select_date(date(2024, 5, 5));
        assert_eq!(
            controller.selection().as_dates(),
            &[
                date(2024, 5, 5),
                date(2024, 5, 6),
                date(2024, 5, 7),
                date(2024, 5, 8),
            ]
        );
    }

    #[test]
    fn test_range_same_day_cancels() {
        let mut controller = SelectionController::new(SelectionMode::Range);
        controller.select_date(date(2024, 5, 5));
        controller.select_date(date(2024, 5, 5));
        assert!(controller.selection().is_empty());
        assert!(!controller.range_anchor_pending());
    }

    #[test]
    fn test_range_spans_month_boundary() {
        let mut controller = SelectionController::new(SelectionMode::Range);
        controller.select_date(date(2024, 2, 28));
        controller.select_date(date(2024, 3, 1));
        assert_eq!(
            controller.selection().as_dates(),
            &[date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1)]
        );
    }

    #[test]
    fn test_range_bulk_set_skips_anchor_protocol() {
        let mut controller = SelectionController::new(SelectionMode::Range);
        controller.select_date(date(2024, 5, 1));
        assert!(controller.range_anchor_pending());

        controller
            .select_dates(&[date(2024, 5, 12), date(2024, 5, 10)])
            .expect("programmatic range");
        // The pending flag is untouched by the programmatic path.
        assert!(controller.range_anchor_pending());
        assert_eq!(
            controller.selection().as_dates(),
            &[date(2024, 5, 10), date(2024, 5, 11), date(2024, 5, 12)]
        );
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(3)]
    fn test_range_bulk_rejects_wrong_length(#[case] len: usize) {
        let mut controller = SelectionController::new(SelectionMode::Range);
        let dates = vec![date(2024, 5, 1); len];
        let result = controller.select_dates(&dates);
        assert_eq!(
            result,
            Err(CalendarError::MalformedSelection {
                mode: "range",
                expected: 2,
                len,
            })
        );
        assert!(controller.selection().is_empty());
    }

    #[test]
    fn test_single_bulk_rejects_arrays() {
        let mut controller = SelectionController::new(SelectionMode::Single);
        let result = controller.select_dates(&[date(2024, 5, 1), date(2024, 5, 2)]);
        assert!(result.is_err());
        assert!(controller.selection().is_empty());

        controller
            .select_dates(&[date(2024, 5, 3)])
            .expect("one date is the scalar form");
        assert_eq!(controller.selection().scalar(), Some(date(2024, 5, 3)));
    }

    #[test]
    fn test_mode_switch_resets_selection() {
        let mut controller = SelectionController::new(SelectionMode::Range);
        controller.select_date(date(2024, 5, 5));
        assert!(controller.range_anchor_pending());

        controller.set_mode(SelectionMode::Multi);
        assert_eq!(controller.selection(), &Selection::Multi(Vec::new()));
        assert!(!controller.range_anchor_pending());

        controller.set_mode(SelectionMode::Single);
        assert_eq!(controller.selection(), &Selection::Single(None));
    }
}
