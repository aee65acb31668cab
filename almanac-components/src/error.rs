//! Error types for the calendar state machines.

use thiserror::Error;

/// Errors raised synchronously by calendar state mutators.
///
/// The core never recovers from these internally; the rendering layer
/// validates user-facing inputs before calling in, or surfaces the
/// error state itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// An unrecognized selection mode string was supplied.
    #[error("invalid selection mode `{value}`")]
    InvalidMode {
        /// The rejected mode string.
        value: String,
    },
    /// A date array of the wrong shape was supplied for the active
    /// selection mode.
    #[error("expected {expected} date(s) for {mode} selection, got {len}")]
    MalformedSelection {
        /// Name of the active selection mode.
        mode: &'static str,
        /// Number of dates the mode expects from a bulk call.
        expected: usize,
        /// Number of dates actually supplied.
        len: usize,
    },
}
