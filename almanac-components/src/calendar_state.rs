//! Composed calendar widget state.
//!
//! ## Usage
//!
//! [`CalendarState`] is the single handle a calendar renderer holds:
//! it owns the grid model, the selection machine, and the view
//! navigator, and exposes the mutators and recomputed queries the
//! rendering layer consumes. Queries are derived from canonical state
//! on every call and never cached.

use almanac_core::{
    Calendar, CalendarDate, DateFormatter, DatePart, DayCell, FormatOptions, FormatOptionsPatch,
    FormatViews, FormatViewsPatch, FormattedParts, HeaderParts, Locale, WeekRow, Weekday,
    format_to_parts,
};
use derive_setters::Setters;

use crate::{
    error::CalendarError,
    selection::{Selection, SelectionChanged, SelectionController, SelectionMode},
    view::{ActiveView, MoveDirection, ViewNavigator},
};

/// All five date parts, in header display order.
const CONTEXT_PARTS: [DatePart; 5] = [
    DatePart::Era,
    DatePart::Year,
    DatePart::Month,
    DatePart::Day,
    DatePart::Weekday,
];

/// Configuration for [`CalendarState`].
#[derive(Clone, Copy, Setters)]
pub struct CalendarArgs {
    /// Day anchoring the left column of every week row.
    pub first_week_day: Weekday,
    /// Initial selection mode.
    pub mode: SelectionMode,
    /// Initial anchor date; defaults to today.
    #[setters(strip_option)]
    pub view_date: Option<CalendarDate>,
    /// Locale used for formatted output.
    pub locale: Locale,
    /// Initial field styles for formatted output.
    pub format_options: FormatOptions,
    /// Initial per-field view toggles.
    pub format_views: FormatViews,
}

impl Default for CalendarArgs {
    fn default() -> Self {
        Self {
            first_week_day: Weekday::Sunday,
            mode: SelectionMode::Single,
            view_date: None,
            locale: Locale::default(),
            format_options: FormatOptions::default(),
            format_views: FormatViews::default(),
        }
    }
}

/// Holds the full state of one calendar widget instance.
pub struct CalendarState {
    calendar: Calendar,
    formatter: DateFormatter,
    selection: SelectionController,
    navigator: ViewNavigator,
}

impl Default for CalendarState {
    fn default() -> Self {
        CalendarState::new(CalendarArgs::default())
    }
}

impl CalendarState {
    /// Creates a calendar state from the given configuration.
    pub fn new(args: CalendarArgs) -> Self {
        Self {
            calendar: Calendar::new(args.first_week_day),
            formatter: DateFormatter {
                locale: args.locale,
                options: args.format_options,
                views: args.format_views,
            },
            selection: SelectionController::new(args.mode),
            navigator: ViewNavigator::new(args.view_date.unwrap_or_else(CalendarDate::today)),
        }
    }

    // --- selection ---

    /// Returns the current selection.
    pub fn value(&self) -> &Selection {
        self.selection.selection()
    }

    /// Returns the active selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// Switches the selection mode, resetting the selection.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.selection.set_mode(mode);
    }

    /// Switches the selection mode from its string name.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMode`] for an unrecognized mode
    /// name.
    pub fn set_mode_str(&mut self, value: &str) -> Result<(), CalendarError> {
        self.selection.set_mode_str(value)
    }

    /// Applies one scalar date pick according to the active mode.
    pub fn select_date(&mut self, date: CalendarDate) {
        self.selection.select_date(date);
    }

    /// Applies a bulk date pick according to the active mode.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::MalformedSelection`] when the slice
    /// length does not fit the active mode.
    pub fn select_dates(&mut self, dates: &[CalendarDate]) -> Result<(), CalendarError> {
        self.selection.select_dates(dates)
    }

    /// Handles a grid-cell click: clicking a padding cell first
    /// navigates one month toward it, then the date is selected.
    pub fn child_clicked(&mut self, cell: DayCell) {
        if cell.is_prev_month {
            self.previous_month();
        }
        if cell.is_next_month {
            self.next_month();
        }
        self.select_date(cell.date);
    }

    /// Registers the selection-changed callback.
    pub fn on_selection_changed<F>(&mut self, f: F)
    where
        F: Fn(&Selection) + Send + Sync + 'static,
    {
        self.selection.on_change(f);
    }

    /// Registers a shared selection-changed callback.
    pub fn on_selection_changed_shared(&mut self, f: SelectionChanged) {
        self.selection.on_change_shared(f);
    }

    // --- week configuration ---

    /// Returns the configured first week day.
    pub fn first_week_day(&self) -> Weekday {
        self.calendar.first_week_day
    }

    /// Sets the day anchoring the left column of every week row.
    pub fn set_first_week_day(&mut self, day: Weekday) {
        self.calendar.first_week_day = day;
    }

    /// Returns the 7 weekdays in display order.
    pub fn weekdays(&self) -> [Weekday; 7] {
        self.calendar.weekdays()
    }

    // --- view navigation ---

    /// Returns the anchor date the displayed grid is computed from.
    pub fn view_date(&self) -> CalendarDate {
        self.navigator.view_date()
    }

    /// Sets the anchor date directly.
    pub fn set_view_date(&mut self, date: CalendarDate) {
        self.navigator.set_view_date(date);
    }

    /// Returns the active picker view.
    pub fn active_view(&self) -> ActiveView {
        self.navigator.active_view()
    }

    /// Returns the direction of the most recent month navigation.
    pub fn last_move_direction(&self) -> MoveDirection {
        self.navigator.last_move_direction()
    }

    /// Switches to the month picker.
    pub fn active_view_year(&mut self) {
        self.navigator.active_view_year();
    }

    /// Switches to the decade picker.
    pub fn active_view_decade(&mut self) {
        self.navigator.active_view_decade();
    }

    /// Accepts a month pick from the month picker.
    pub fn change_month(&mut self, date: CalendarDate) {
        self.navigator.change_month(date);
    }

    /// Accepts a year pick from the decade picker.
    pub fn change_year(&mut self, date: CalendarDate) {
        self.navigator.change_year(date);
    }

    /// Moves the displayed month one back.
    pub fn previous_month(&mut self) {
        self.navigator.previous_month();
    }

    /// Moves the displayed month one forward.
    pub fn next_month(&mut self) {
        self.navigator.next_month();
    }

    /// Moves the displayed year one back.
    pub fn previous_year(&mut self) {
        self.navigator.previous_year();
    }

    /// Moves the displayed year one forward.
    pub fn next_year(&mut self) {
        self.navigator.next_year();
    }

    /// Shifts the anchor by `delta` years for decade-view wheel/pan
    /// input, clamped to ±95 years around the current year.
    pub fn generate_year_range(&mut self, delta: i32) {
        self.navigator.generate_year_range(delta);
    }

    /// Registers the view-date-changed callback.
    pub fn on_view_date_changed<F>(&mut self, f: F)
    where
        F: Fn(CalendarDate, MoveDirection) + Send + Sync + 'static,
    {
        self.navigator.on_view_date_changed(f);
    }

    /// Registers the active-view-changed callback.
    pub fn on_active_view_changed<F>(&mut self, f: F)
    where
        F: Fn(ActiveView) + Send + Sync + 'static,
    {
        self.navigator.on_active_view_changed(f);
    }

    // --- derived grids ---

    /// Returns the week rows for the displayed month.
    ///
    /// With `extra_week`, one additional trailing week is appended so
    /// the renderer can pre-render the next page during a transition.
    pub fn month_grid(&self, extra_week: bool) -> Vec<WeekRow> {
        let anchor = self.navigator.view_date();
        self.calendar
            .monthdatescalendar(anchor.year(), anchor.month(), extra_week)
    }

    /// Returns the 12 first-of-month dates for the anchor's year.
    pub fn months(&self) -> [CalendarDate; 12] {
        self.navigator.months()
    }

    /// Returns the 7-year decade window around the anchor.
    pub fn decade(&self) -> [CalendarDate; 7] {
        self.navigator.decade()
    }

    /// Returns true when `date` falls in the displayed month.
    pub fn is_current_month(&self, date: CalendarDate) -> bool {
        self.navigator.view_date().month() == date.month()
    }

    /// Returns true when `date` falls in the displayed year.
    pub fn is_current_year(&self, date: CalendarDate) -> bool {
        self.navigator.view_date().year() == date.year()
    }

    // --- formatting ---

    /// Returns the locale used for formatted output.
    pub fn locale(&self) -> &Locale {
        &self.formatter.locale
    }

    /// Sets the locale used for formatted output.
    pub fn set_locale(&mut self, locale: Locale) {
        self.formatter.locale = locale;
    }

    /// Returns the current field styles.
    pub fn format_options(&self) -> &FormatOptions {
        &self.formatter.options
    }

    /// Shallow-merges the provided field styles into the current
    /// settings.
    pub fn set_format_options(&mut self, patch: FormatOptionsPatch) {
        self.formatter.options.merge(patch);
    }

    /// Returns the current per-field view toggles.
    pub fn format_views(&self) -> &FormatViews {
        &self.formatter.views
    }

    /// Shallow-merges the provided view toggles into the current
    /// settings.
    pub fn set_format_views(&mut self, patch: FormatViewsPatch) {
        self.formatter.views.merge(patch);
    }

    /// Returns the month display string for `value`.
    pub fn formatted_month(&self, value: CalendarDate) -> String {
        self.formatter.formatted_month(value)
    }

    /// Returns the day display string for `value`.
    pub fn formatted_day(&self, value: CalendarDate) -> String {
        self.formatter.formatted_day(value)
    }

    /// Returns the year display string for `value`.
    pub fn formatted_year(&self, value: CalendarDate) -> String {
        self.formatter.formatted_year(value)
    }

    /// Returns the weekday display labels for the first grid row.
    pub fn generate_week_header(&self) -> Vec<String> {
        let anchor = self.navigator.view_date();
        let rows = self
            .calendar
            .monthdatescalendar(anchor.year(), anchor.month(), false);
        let Some(first_row) = rows.first() else {
            return Vec::new();
        };
        first_row
            .iter()
            .map(|cell| self.formatter.formatted_weekday(cell.date))
            .collect()
    }

    /// Returns the date shown in the single-selection header: the
    /// selected date if one exists, otherwise today.
    pub fn header_date(&self) -> CalendarDate {
        self.value().scalar().unwrap_or_else(CalendarDate::today)
    }

    /// Composes the `{weekday, monthday}` pair for the header.
    pub fn formatted_header(&self) -> HeaderParts {
        self.formatter.header_parts(self.header_date())
    }

    /// Decomposes the anchor date into display parts for subheader
    /// templates.
    pub fn context(&self) -> FormattedParts {
        format_to_parts(
            self.navigator.view_date(),
            &self.formatter.locale,
            &self.formatter.options,
            &CONTEXT_PARTS,
        )
    }

    /// Decomposes the header date into display parts for header
    /// templates.
    pub fn header_context(&self) -> FormattedParts {
        format_to_parts(
            self.header_date(),
            &self.formatter.locale,
            &self.formatter.options,
            &CONTEXT_PARTS,
        )
    }
}

#[cfg(test)]
mod tests {
    use almanac_core::FieldStyle;

    use super::*;

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).expect("valid date")
    }

    fn state_at(year: i32, month: u8, day: u8) -> CalendarState {
        CalendarState::new(CalendarArgs::default().view_date(date(year, month, day)))
    }

    #[test]
    fn test_month_grid_matches_anchor() {
        let state = state_at(2024, 9, 15);
        let grid = state.month_grid(false);
        assert_eq!(grid.len(), 5);
        assert!(grid[2].iter().any(|cell| cell.date == date(2024, 9, 15)));

        let padded = state.month_grid(true);
        assert_eq!(padded.len(), 6);
    }

    #[test]
    fn test_child_clicked_padding_navigates() {
        // May 2021 starts on a Saturday, so the Sunday-first grid
        // leads with six April cells.
        let mut state = state_at(2021, 5, 15);
        let grid = state.month_grid(false);
        let prev_cell = grid[0][0];
        assert_eq!(prev_cell.date, date(2021, 4, 25));
        assert!(prev_cell.is_prev_month);

        state.child_clicked(prev_cell);
        assert_eq!(state.view_date(), date(2021, 4, 15));
        assert_eq!(state.value().scalar(), Some(prev_cell.date));
        assert_eq!(state.last_move_direction(), MoveDirection::Prev);

        let mut state = state_at(2021, 5, 15);
        let grid = state.month_grid(false);
        let next_cell = grid[5][6];
        assert_eq!(next_cell.date, date(2021, 6, 5));
        assert!(next_cell.is_next_month);

        state.child_clicked(next_cell);
        assert_eq!(state.view_date(), date(2021, 6, 15));
        assert_eq!(state.last_move_direction(), MoveDirection::Next);
    }

    #[test]
    fn test_child_clicked_current_month_only_selects() {
        let mut state = state_at(2024, 9, 15);
        let grid = state.month_grid(false);
        let cell = grid[2][3];
        assert!(cell.is_current_month);

        state.child_clicked(cell);
        assert_eq!(state.view_date(), date(2024, 9, 15));
        assert_eq!(state.value().scalar(), Some(cell.date));
    }

    #[test]
    fn test_week_header_rotation() {
        let mut state = state_at(2024, 9, 15);
        assert_eq!(
            state.generate_week_header(),
            vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );

        state.set_first_week_day(Weekday::Monday);
        assert_eq!(state.weekdays()[0], Weekday::Monday);
        assert_eq!(
            state.generate_week_header(),
            vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
    }

    #[test]
    fn test_header_date_prefers_selection() {
        let mut state = state_at(2024, 9, 15);
        state.select_date(date(2024, 9, 3));
        assert_eq!(state.header_date(), date(2024, 9, 3));
        let header = state.formatted_header();
        assert_eq!(header.weekday, "Tue");
        assert_eq!(header.monthday, "Sep 3");
    }

    #[test]
    fn test_format_merge_through_state() {
        let mut state = state_at(2024, 9, 15);
        assert_eq!(state.formatted_month(date(2024, 9, 15)), "Sep");

        state.set_format_options(FormatOptionsPatch::default().month(FieldStyle::Long));
        assert_eq!(state.formatted_month(date(2024, 9, 15)), "September");
        // Untouched fields keep their values.
        assert_eq!(state.format_options().day, FieldStyle::Numeric);

        state.set_format_views(FormatViewsPatch::default().month(false));
        assert_eq!(state.formatted_month(date(2024, 9, 15)), "9");
    }

    #[test]
    fn test_mode_switch_resets_through_state() {
        let mut state = state_at(2024, 9, 15);
        state.select_date(date(2024, 9, 3));
        state.set_mode(SelectionMode::Range);
        assert!(state.value().is_empty());

        state.set_mode_str("multi").expect("known mode");
        assert_eq!(state.mode(), SelectionMode::Multi);
        assert!(state.set_mode_str("bogus").is_err());
    }

    #[test]
    fn test_current_month_and_year() {
        let state = state_at(2024, 9, 15);
        assert!(state.is_current_month(date(1999, 9, 1)));
        assert!(!state.is_current_month(date(2024, 8, 1)));
        assert!(state.is_current_year(date(2024, 1, 1)));
        assert!(!state.is_current_year(date(2023, 9, 1)));
    }

    #[test]
    fn test_context_parts() {
        let state = state_at(2024, 9, 15);
        let context = state.context();
        assert_eq!(context.full, "AD 2024 Sep 15 Sun");
        assert_eq!(context.parts.len(), 5);
    }
}
