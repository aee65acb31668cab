//! Widget state machines for the almanac calendar.
//!
//! Builds on `almanac-core` with the stateful half of a calendar
//! widget: selection ([`SelectionController`]), view navigation
//! ([`ViewNavigator`]), and the composed per-instance state
//! ([`CalendarState`]) a renderer drives directly.
//!
//! # Example
//!
//! ```
//! use almanac_components::{CalendarArgs, CalendarState, SelectionMode};
//! use almanac_core::{CalendarDate, Weekday};
//!
//! let mut state = CalendarState::new(
//!     CalendarArgs::default()
//!         .first_week_day(Weekday::Monday)
//!         .mode(SelectionMode::Range)
//!         .view_date(CalendarDate::new(2024, 9, 15).unwrap()),
//! );
//! state.select_date(CalendarDate::new(2024, 9, 3).unwrap());
//! state.select_date(CalendarDate::new(2024, 9, 6).unwrap());
//! assert_eq!(state.value().as_dates().len(), 4);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod calendar_state;
pub mod error;
pub mod selection;
pub mod view;

pub use calendar_state::{CalendarArgs, CalendarState};
pub use error::CalendarError;
pub use selection::{Selection, SelectionChanged, SelectionController, SelectionMode};
pub use view::{ActiveView, ActiveViewChanged, MoveDirection, ViewDateChanged, ViewNavigator};
