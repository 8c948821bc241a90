use chrono::{Datelike, NaiveDate};

use super::{current_hour, hour_labels, is_shown, RenderOptions};
use crate::grid;
use crate::layout::{EventBlock, EventPositioner, WEEK_TIME_LINE_MIN_HEIGHT};
use crate::model::{CalendarEvent, CalendarView};
use crate::state::CalendarViewState;

#[derive(Debug, Clone, PartialEq)]
pub struct WeekColumn {
    pub date: NaiveDate,
    pub weekday: String,
    pub day_of_month: u32,
    pub is_today: bool,
    pub highlighted_hour: Option<u32>,
    pub blocks: Vec<EventBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekView {
    pub hour_height: f64,
    pub hour_labels: Vec<String>,
    pub columns: Vec<WeekColumn>,
}

impl WeekView {
    pub fn start(&self) -> Option<NaiveDate> {
        self.columns.first().map(|c| c.date)
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.columns.last().map(|c| c.date)
    }
}

pub fn render(
    state: &CalendarViewState,
    events: &[CalendarEvent],
    options: &RenderOptions,
) -> Option<WeekView> {
    if !is_shown(state, CalendarView::Week) {
        return None;
    }
    let positioner = EventPositioner::new(options.hour_height);
    let locale = state.locale();
    let today = options.today();

    let columns = grid::week_days(options.focus(state))
        .into_iter()
        .map(|date| {
            let blocks = events
                .iter()
                .filter_map(|event| {
                    positioner.position_on(event, date).map(|geometry| {
                        positioner.block_at(
                            event,
                            geometry,
                            geometry.height > WEEK_TIME_LINE_MIN_HEIGHT,
                        )
                    })
                })
                .collect();
            WeekColumn {
                date,
                weekday: locale.weekday_abbrev(date.weekday()).to_string(),
                day_of_month: date.day(),
                is_today: date == today,
                highlighted_hour: current_hour(date, options.now),
                blocks,
            }
        })
        .collect();

    Some(WeekView {
        hour_height: positioner.hour_height(),
        hour_labels: hour_labels(),
        columns,
    })
}
