//! View navigation for calendar widgets.
//!
//! ## Usage
//!
//! [`ViewNavigator`] tracks the anchor date being displayed and which
//! of the three pickers (day grid, months of a year, years of a
//! decade) is active. It never touches the selection; the renderer
//! reads the anchor back through the grid queries after each move.

use std::sync::Arc;

use almanac_core::{CalendarDate, DateUnit, timedelta};
use tracing::{debug, warn};

/// Furthest the decade picker may wander from the current year, in
/// either direction. Keeps wheel/pan input from producing pathological
/// anchor dates.
const YEAR_RANGE_CEILING: i32 = 95;

/// Which picker the widget is currently displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    /// The day grid.
    #[default]
    Default,
    /// The 12-month picker.
    Year,
    /// The year picker showing the decade window around the anchor.
    Decade,
}

/// Direction of the most recent month navigation.
///
/// Advisory metadata for the renderer's transition animation; carries
/// no business meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveDirection {
    /// No month navigation has happened yet.
    #[default]
    None,
    /// The last move went to the previous month.
    Prev,
    /// The last move went to the next month.
    Next,
}

/// Callback invoked with the new anchor date and move direction after
/// every anchor change.
pub type ViewDateChanged = Arc<dyn Fn(CalendarDate, MoveDirection) + Send + Sync>;

/// Callback invoked after every active-view switch.
pub type ActiveViewChanged = Arc<dyn Fn(ActiveView) + Send + Sync>;

/// Tracks the displayed anchor date and the active picker view.
pub struct ViewNavigator {
    view_date: CalendarDate,
    active_view: ActiveView,
    last_move_direction: MoveDirection,
    on_view_date_changed: Option<ViewDateChanged>,
    on_active_view_changed: Option<ActiveViewChanged>,
}

impl Default for ViewNavigator {
    fn default() -> Self {
        ViewNavigator::new(CalendarDate::today())
    }
}

impl ViewNavigator {
    /// Creates a navigator anchored at the given date, showing the day
    /// grid.
    pub fn new(view_date: CalendarDate) -> Self {
        Self {
            view_date,
            active_view: ActiveView::Default,
            last_move_direction: MoveDirection::None,
            on_view_date_changed: None,
            on_active_view_changed: None,
        }
    }

    /// Returns the anchor date the displayed grid is computed from.
    pub fn view_date(&self) -> CalendarDate {
        self.view_date
    }

    /// Returns the active picker view.
    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    /// Returns true when the day grid is visible.
    pub fn is_default_view(&self) -> bool {
        self.active_view == ActiveView::Default
    }

    /// Returns true when the month picker is visible.
    pub fn is_year_view(&self) -> bool {
        self.active_view == ActiveView::Year
    }

    /// Returns true when the decade picker is visible.
    pub fn is_decade_view(&self) -> bool {
        self.active_view == ActiveView::Decade
    }

    /// Returns the direction of the most recent month navigation.
    pub fn last_move_direction(&self) -> MoveDirection {
        self.last_move_direction
    }

    /// Registers the anchor-changed callback.
    pub fn on_view_date_changed<F>(&mut self, f: F)
    where
        F: Fn(CalendarDate, MoveDirection) + Send + Sync + 'static,
    {
        self.on_view_date_changed = Some(Arc::new(f));
    }

    /// Registers the active-view-changed callback.
    pub fn on_active_view_changed<F>(&mut self, f: F)
    where
        F: Fn(ActiveView) + Send + Sync + 'static,
    {
        self.on_active_view_changed = Some(Arc::new(f));
    }

    /// Sets the anchor date directly.
    pub fn set_view_date(&mut self, date: CalendarDate) {
        self.view_date = date;
        self.notify_view_date();
    }

    /// Switches to the month picker.
    pub fn active_view_year(&mut self) {
        self.set_active_view(ActiveView::Year);
    }

    /// Switches to the decade picker.
    pub fn active_view_decade(&mut self) {
        self.set_active_view(ActiveView::Decade);
    }

    /// Accepts a month pick: keeps the anchor's year, takes the month
    /// from `date`, resets the day to 1, and returns to the day grid.
    pub fn change_month(&mut self, date: CalendarDate) {
        self.view_date = CalendarDate::first_of_month(self.view_date.year(), date.month());
        self.notify_view_date();
        self.set_active_view(ActiveView::Default);
    }

    /// Accepts a year pick: takes the year from `date`, keeps the
    /// anchor's month, resets the day to 1, and returns to the day
    /// grid.
    pub fn change_year(&mut self, date: CalendarDate) {
        self.view_date = CalendarDate::first_of_month(date.year(), self.view_date.month());
        self.notify_view_date();
        self.set_active_view(ActiveView::Default);
    }

    /// Moves the anchor one month back, recording the direction for
    /// the transition animation.
    pub fn previous_month(&mut self) {
        self.view_date = timedelta(self.view_date, DateUnit::Month, -1);
        self.last_move_direction = MoveDirection::Prev;
        self.notify_view_date();
    }

    /// Moves the anchor one month forward, recording the direction for
    /// the transition animation.
    pub fn next_month(&mut self) {
        self.view_date = timedelta(self.view_date, DateUnit::Month, 1);
        self.last_move_direction = MoveDirection::Next;
        self.notify_view_date();
    }

    /// Moves the anchor one year back.
    pub fn previous_year(&mut self) {
        self.view_date = timedelta(self.view_date, DateUnit::Year, -1);
        self.notify_view_date();
    }

    /// Moves the anchor one year forward.
    pub fn next_year(&mut self) {
        self.view_date = timedelta(self.view_date, DateUnit::Year, 1);
        self.notify_view_date();
    }

    /// Shifts the anchor by `delta` years for decade-view wheel/pan
    /// input.
    ///
    /// The shift is a no-op when it would land the anchor's year more
    /// than 95 years away from the real current year in either
    /// direction.
    pub fn generate_year_range(&mut self, delta: i32) {
        let current_year = CalendarDate::today().year();
        let target_year = self.view_date.year() + delta;
        if (target_year - current_year).abs() > YEAR_RANGE_CEILING {
            warn!(target_year, delta, "decade shift clamped");
            return;
        }
        self.view_date = timedelta(self.view_date, DateUnit::Year, delta);
        self.notify_view_date();
    }

    /// Returns the decade window: the 7 years centered on the anchor,
    /// each carried on the anchor's month and day (clamped for short
    /// months).
    pub fn decade(&self) -> [CalendarDate; 7] {
        let mut years = [self.view_date; 7];
        for (idx, slot) in years.iter_mut().enumerate() {
            *slot = timedelta(self.view_date, DateUnit::Year, idx as i32 - 3);
        }
        years
    }

    /// Returns the 12 first-of-month dates for the anchor's year.
    pub fn months(&self) -> [CalendarDate; 12] {
        let mut months = [self.view_date; 12];
        let mut current = CalendarDate::first_of_month(self.view_date.year(), 1);
        for slot in months.iter_mut() {
            *slot = current;
            current = timedelta(current, DateUnit::Month, 1);
        }
        months
    }

    fn set_active_view(&mut self, view: ActiveView) {
        debug!(?view, "active view switch");
        self.active_view = view;
        if let Some(on_change) = &self.on_active_view_changed {
            on_change(view);
        }
    }

    fn notify_view_date(&self) {
        if let Some(on_change) = &self.on_view_date_changed {
            on_change(self.view_date, self.last_move_direction);
        }
    }
}
