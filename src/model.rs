use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type EventId = String;

/// A time-ranged entry supplied by the host. The engine never mutates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<EventColor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Red,
    Pink,
    Green,
    Blue,
    Yellow,
    Purple,
    Indigo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Day,
    Week,
    Month,
    Year,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("at least one calendar view must be visible")]
    NoVisibleViews,
    #[error("unknown calendar view: {0}")]
    UnknownView(String),
}

impl CalendarEvent {
    pub fn new(
        id: impl Into<EventId>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        CalendarEvent {
            id: id.into(),
            title: title.into(),
            start,
            end,
            color: None,
        }
    }

    pub fn with_color(mut self, color: EventColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn start_day(&self) -> NaiveDate {
        self.start.date()
    }

    /// Signed length in whole minutes; negative when `end` precedes `start`.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn is_malformed(&self) -> bool {
        self.end < self.start
    }
}

impl CalendarView {
    pub const ALL: [CalendarView; 4] = [
        CalendarView::Day,
        CalendarView::Week,
        CalendarView::Month,
        CalendarView::Year,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CalendarView::Day => "Day",
            CalendarView::Week => "Week",
            CalendarView::Month => "Month",
            CalendarView::Year => "Year",
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            CalendarView::Day => "day",
            CalendarView::Week => "week",
            CalendarView::Month => "month",
            CalendarView::Year => "year",
        }
    }

    /// Letter that switches to this view from the keyboard.
    pub fn shortcut(&self) -> char {
        match self {
            CalendarView::Day => 'd',
            CalendarView::Week => 'w',
            CalendarView::Month => 'm',
            CalendarView::Year => 'y',
        }
    }

    pub fn from_shortcut(ch: char) -> Option<Self> {
        CalendarView::ALL.into_iter().find(|v| v.shortcut() == ch)
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for CalendarView {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        CalendarView::ALL
            .into_iter()
            .find(|v| v.as_key() == key)
            .ok_or_else(|| EngineError::UnknownView(s.to_string()))
    }
}
