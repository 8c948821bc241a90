//! Calendar engine: date grids, event layout, and a navigable view state for
//! day, week, month and year granularities.
//!
//! The engine owns no events. Hosts keep the event list and hand a snapshot
//! to [`views::render`] whenever a [`state::CalendarViewState`] listener
//! reports a change.

pub mod grid;
pub mod layout;
pub mod locale;
pub mod model;
pub mod navigation;
pub mod state;
pub mod views;

pub use locale::{Locale, LocaleKind};
pub use model::{CalendarEvent, CalendarView, EngineError, EventColor};
pub use state::{CalendarOptions, CalendarViewState, ViewChange};
