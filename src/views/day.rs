use chrono::NaiveDate;

use super::{current_hour, hour_label, is_shown, RenderOptions};
use crate::grid::HOURS_PER_DAY;
use crate::layout::{events_starting_within, EventBlock, EventPositioner};
use crate::model::{CalendarEvent, CalendarView};
use crate::state::CalendarViewState;

#[derive(Debug, Clone, PartialEq)]
pub struct HourRow {
    pub hour: u32,
    pub label: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub date: NaiveDate,
    pub hour_height: f64,
    pub hours: Vec<HourRow>,
    pub blocks: Vec<EventBlock>,
}

pub fn render(
    state: &CalendarViewState,
    events: &[CalendarEvent],
    options: &RenderOptions,
) -> Option<DayView> {
    if !is_shown(state, CalendarView::Day) {
        return None;
    }
    let date = options.focus(state);
    let positioner = EventPositioner::new(options.hour_height);
    let highlight = current_hour(date, options.now);

    let hours = (0..HOURS_PER_DAY)
        .map(|hour| HourRow {
            hour,
            label: hour_label(hour),
            highlighted: highlight == Some(hour),
        })
        .collect();
    let blocks = events_starting_within(events, date)
        .into_iter()
        .map(|event| positioner.block(event, true))
        .collect();

    Some(DayView {
        date,
        hour_height: positioner.hour_height(),
        hours,
        blocks,
    })
}
