use chrono::NaiveDate;

use super::{is_shown, RenderOptions};
use crate::grid;
use crate::layout::{bucket_by_day, MONTH_CELL_LABELS};
use crate::model::{CalendarEvent, CalendarView, EventColor, EventId};
use crate::state::CalendarViewState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLabel {
    pub event_id: EventId,
    pub title: String,
    pub color: Option<EventColor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCell {
    pub date: NaiveDate,
    /// Belongs to the previous or next month; drawn dimmed but still clickable.
    pub overflow: bool,
    pub is_today: bool,
    pub labels: Vec<EventLabel>,
    pub more: usize,
}

impl MonthCell {
    pub fn event_count(&self) -> usize {
        self.labels.len() + self.more
    }

    pub fn more_label(&self) -> Option<String> {
        (self.more > 0).then(|| format!("+ {} more", self.more))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub anchor: NaiveDate,
    pub weekday_headers: Vec<String>,
    pub weeks: Vec<Vec<MonthCell>>,
}

impl MonthView {
    pub fn cells(&self) -> impl Iterator<Item = &MonthCell> {
        self.weeks.iter().flatten()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&MonthCell> {
        self.cells().find(|cell| cell.date == date)
    }
}

pub fn render(
    state: &CalendarViewState,
    events: &[CalendarEvent],
    options: &RenderOptions,
) -> Option<MonthView> {
    if !is_shown(state, CalendarView::Month) {
        return None;
    }
    let anchor = options.focus(state);
    let today = options.today();
    let buckets = bucket_by_day(events);

    let weeks = grid::month_grid(anchor)
        .into_iter()
        .map(|week| {
            week.into_iter()
                .map(|date| {
                    let day_events = buckets.get(&date).map(Vec::as_slice).unwrap_or_default();
                    let labels = day_events
                        .iter()
                        .take(MONTH_CELL_LABELS)
                        .map(|event| EventLabel {
                            event_id: event.id.clone(),
                            title: event.title.clone(),
                            color: event.color,
                        })
                        .collect();
                    MonthCell {
                        date,
                        overflow: !grid::is_same_month(date, anchor),
                        is_today: date == today,
                        labels,
                        more: day_events.len().saturating_sub(MONTH_CELL_LABELS),
                    }
                })
                .collect()
        })
        .collect();

    Some(MonthView {
        anchor,
        weekday_headers: state.locale().weekday_headers(),
        weeks,
    })
}

/// Handles a click on a day cell. The anchor always moves to `day`. With a
/// host callback the callback receives the date; without one the calendar
/// drills down into Day view.
pub fn select_day(
    state: &mut CalendarViewState,
    day: NaiveDate,
    on_select: Option<&mut dyn FnMut(NaiveDate)>,
) {
    state.set_date(grid::start_of_day(day));
    match on_select {
        Some(callback) => callback(day),
        None => {
            state.set_view(CalendarView::Day);
        }
    }
}
