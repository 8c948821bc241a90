use chrono::{NaiveDate, Timelike};
use std::collections::BTreeMap;

use crate::grid;
use crate::model::{CalendarEvent, EventColor, EventId};

pub const DEFAULT_HOUR_HEIGHT: f64 = 60.0;
/// Labels a month cell shows before folding the rest into "+N more".
pub const MONTH_CELL_LABELS: usize = 3;
/// Week blocks at or below this height drop their time line.
pub const WEEK_TIME_LINE_MIN_HEIGHT: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockGeometry {
    pub top: f64,
    pub height: f64,
}

/// A positioned rectangle for one event inside an hour-row column.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    pub event_id: EventId,
    pub title: String,
    pub color: Option<EventColor>,
    pub time_label: String,
    pub geometry: BlockGeometry,
    pub show_time: bool,
}

/// Maps event times onto hour-row geometry. Overlapping events are not
/// packed into lanes; their blocks simply overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventPositioner {
    hour_height: f64,
}

impl Default for EventPositioner {
    fn default() -> Self {
        EventPositioner {
            hour_height: DEFAULT_HOUR_HEIGHT,
        }
    }
}

impl EventPositioner {
    pub fn new(hour_height: f64) -> Self {
        let hour_height = if hour_height.is_finite() && hour_height > 0.0 {
            hour_height
        } else {
            tracing::warn!(hour_height, "ignoring non-positive hour height");
            DEFAULT_HOUR_HEIGHT
        };
        EventPositioner { hour_height }
    }

    pub fn hour_height(&self) -> f64 {
        self.hour_height
    }

    /// Offset and height of `event` in its start day's column. A reversed
    /// range (`end < start`) gets zero height.
    pub fn geometry(&self, event: &CalendarEvent) -> BlockGeometry {
        let hour = f64::from(event.start.hour());
        let minute = f64::from(event.start.minute());
        let top = hour * self.hour_height + (minute / 60.0) * self.hour_height;
        if event.is_malformed() {
            tracing::warn!(event = %event.id, "event ends before it starts; zero height");
        }
        let minutes = event.duration_minutes().max(0) as f64;
        BlockGeometry {
            top,
            height: (minutes / 60.0) * self.hour_height,
        }
    }

    /// Geometry for `event` in the column for `day`, or `None` when the event
    /// starts on another day.
    pub fn position_on(&self, event: &CalendarEvent, day: NaiveDate) -> Option<BlockGeometry> {
        (event.start_day() == day).then(|| self.geometry(event))
    }

    pub fn block(&self, event: &CalendarEvent, show_time: bool) -> EventBlock {
        self.block_at(event, self.geometry(event), show_time)
    }

    /// Builds a block from geometry the caller already computed.
    pub fn block_at(
        &self,
        event: &CalendarEvent,
        geometry: BlockGeometry,
        show_time: bool,
    ) -> EventBlock {
        EventBlock {
            event_id: event.id.clone(),
            title: event.title.clone(),
            color: event.color,
            time_label: time_range_label(event),
            geometry,
            show_time,
        }
    }
}

pub fn time_range_label(event: &CalendarEvent) -> String {
    format!("{} - {}", event.start.format("%H:%M"), event.end.format("%H:%M"))
}

/// Events whose start lies within `day`, in input order.
pub fn events_starting_within<'a>(
    events: &'a [CalendarEvent],
    day: NaiveDate,
) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|event| event.start_day() == day)
        .collect()
}

/// Buckets events by the calendar day their start falls on.
pub fn bucket_by_day(events: &[CalendarEvent]) -> BTreeMap<NaiveDate, Vec<&CalendarEvent>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&CalendarEvent>> = BTreeMap::new();
    for event in events {
        buckets.entry(event.start_day()).or_default().push(event);
    }
    buckets
}

pub fn count_in_month(events: &[CalendarEvent], month: NaiveDate) -> usize {
    events
        .iter()
        .filter(|event| grid::is_same_month(event.start_day(), month))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, d)
            .expect("valid date")
            .and_hms_opt(h, m, 0)
            .expect("valid time")
    }

    fn event(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> CalendarEvent {
        CalendarEvent::new(id, id.to_uppercase(), start, end)
    }

    #[test]
    fn morning_meeting_geometry() {
        let positioner = EventPositioner::default();
        let geometry = positioner.geometry(&event("a", at(2, 9, 0), at(2, 10, 30)));
        assert_eq!(geometry, BlockGeometry { top: 540.0, height: 90.0 });
    }

    #[test]
    fn midnight_hour_geometry() {
        let positioner = EventPositioner::default();
        let geometry = positioner.geometry(&event("a", at(2, 0, 0), at(2, 1, 0)));
        assert_eq!(geometry, BlockGeometry { top: 0.0, height: 60.0 });
    }

    #[test]
    fn geometry_scales_with_hour_height() {
        let positioner = EventPositioner::new(48.0);
        let geometry = positioner.geometry(&event("a", at(2, 12, 15), at(2, 12, 45)));
        assert_eq!(geometry, BlockGeometry { top: 588.0, height: 24.0 });
    }

    #[test]
    fn reversed_range_is_clamped_to_zero_height() {
        let positioner = EventPositioner::default();
        let geometry = positioner.geometry(&event("bad", at(2, 10, 0), at(2, 9, 0)));
        assert_eq!(geometry.top, 600.0);
        assert_eq!(geometry.height, 0.0);
    }

    #[test]
    fn invalid_hour_height_falls_back_to_default() {
        assert_eq!(EventPositioner::new(0.0).hour_height(), DEFAULT_HOUR_HEIGHT);
        assert_eq!(EventPositioner::new(f64::NAN).hour_height(), DEFAULT_HOUR_HEIGHT);
    }

    #[test]
    fn events_only_position_on_their_start_day() {
        let positioner = EventPositioner::default();
        let overnight = event("late", at(2, 23, 0), at(3, 1, 0));
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date");
        let next = NaiveDate::from_ymd_opt(2026, 3, 3).expect("valid date");
        assert!(positioner.position_on(&overnight, day).is_some());
        assert!(positioner.position_on(&overnight, next).is_none());
    }

    #[test]
    fn overlapping_events_keep_independent_geometry() {
        let positioner = EventPositioner::default();
        let a = positioner.block(&event("a", at(2, 9, 0), at(2, 10, 0)), true);
        let b = positioner.block(&event("b", at(2, 9, 0), at(2, 10, 0)), true);
        assert_eq!(a.geometry, b.geometry);
        assert_eq!(a.time_label, "09:00 - 10:00");
    }

    #[test]
    fn counts_and_buckets_use_start_day() {
        let events = vec![
            event("a", at(1, 8, 0), at(1, 9, 0)),
            event("b", at(1, 23, 30), at(2, 0, 30)),
            event("c", at(31, 12, 0), at(31, 13, 0)),
        ];
        let buckets = bucket_by_day(&events);
        assert_eq!(buckets.len(), 2);
        let first = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        assert_eq!(buckets[&first].len(), 2);
        assert_eq!(events_starting_within(&events, first).len(), 2);
        assert_eq!(count_in_month(&events, first), 3);
        let april = NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date");
        assert_eq!(count_in_month(&events, april), 0);
    }

    #[test]
    fn last_instant_of_a_day_still_belongs_to_it() {
        let last_day = NaiveDate::from_ymd_opt(2026, 3, 31).expect("valid date");
        let start = last_day
            .and_hms_nano_opt(23, 59, 59, 999_500_000)
            .expect("valid time");
        let april = NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date");
        let end = april.and_hms_opt(0, 30, 0).expect("valid time");
        let late = event("late", start, end);
        let events = vec![late.clone()];

        assert_eq!(events_starting_within(&events, last_day).len(), 1);
        assert!(EventPositioner::default().position_on(&late, last_day).is_some());
        assert_eq!(bucket_by_day(&events)[&last_day].len(), 1);
        assert_eq!(count_in_month(&events, last_day), 1);
        assert!(events_starting_within(&events, april).is_empty());
        assert_eq!(count_in_month(&events, april), 0);
    }

    #[test]
    fn block_at_reuses_supplied_geometry() {
        let positioner = EventPositioner::default();
        let meeting = event("a", at(2, 9, 0), at(2, 10, 30));
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date");
        let geometry = positioner.position_on(&meeting, day).expect("same day");
        let block = positioner.block_at(&meeting, geometry, false);
        assert_eq!(block.geometry, geometry);
        assert_eq!(block, positioner.block(&meeting, false));
    }
}
