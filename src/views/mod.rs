//! One pure renderer per granularity, selected by the active view.

pub mod day;
pub mod month;
pub mod title;
pub mod triggers;
pub mod week;
pub mod year;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

use crate::grid::HOURS_PER_DAY;
use crate::layout::DEFAULT_HOUR_HEIGHT;
use crate::model::{CalendarEvent, CalendarView};
use crate::state::CalendarViewState;

pub use day::DayView;
pub use month::{MonthCell, MonthView};
pub use week::{WeekColumn, WeekView};
pub use year::{MonthTile, YearView};

/// Per-render inputs that are not part of the calendar state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Renders around this date instead of the anchor.
    pub date: Option<NaiveDate>,
    pub hour_height: f64,
    /// Current instant, for today and current-hour highlights.
    pub now: NaiveDateTime,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            date: None,
            hour_height: DEFAULT_HOUR_HEIGHT,
            now: Local::now().naive_local(),
        }
    }
}

impl RenderOptions {
    pub fn at(now: NaiveDateTime) -> Self {
        RenderOptions {
            now,
            ..RenderOptions::default()
        }
    }

    pub(crate) fn focus(&self, state: &CalendarViewState) -> NaiveDate {
        self.date.unwrap_or_else(|| state.anchor_day())
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.now.date()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedView {
    Day(DayView),
    Week(WeekView),
    Month(MonthView),
    Year(YearView),
}

impl RenderedView {
    pub fn kind(&self) -> CalendarView {
        match self {
            RenderedView::Day(_) => CalendarView::Day,
            RenderedView::Week(_) => CalendarView::Week,
            RenderedView::Month(_) => CalendarView::Month,
            RenderedView::Year(_) => CalendarView::Year,
        }
    }
}

/// Renders whichever view is active.
pub fn render(
    state: &CalendarViewState,
    events: &[CalendarEvent],
    options: &RenderOptions,
) -> Option<RenderedView> {
    match state.active_view() {
        CalendarView::Day => day::render(state, events, options).map(RenderedView::Day),
        CalendarView::Week => week::render(state, events, options).map(RenderedView::Week),
        CalendarView::Month => month::render(state, events, options).map(RenderedView::Month),
        CalendarView::Year => year::render(state, events, options).map(RenderedView::Year),
    }
}

/// A renderer draws only when its view is both visible and active.
pub(crate) fn is_shown(state: &CalendarViewState, view: CalendarView) -> bool {
    state.is_visible(view) && state.active_view() == view
}

pub fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour)
}

pub fn hour_labels() -> Vec<String> {
    (0..HOURS_PER_DAY).map(hour_label).collect()
}

/// The hour row to highlight in `day`'s column, if `now` falls on that day.
pub(crate) fn current_hour(day: NaiveDate, now: NaiveDateTime) -> Option<u32> {
    (now.date() == day).then(|| now.hour())
}
