use chrono::{Datelike, NaiveDate};

use super::{is_shown, RenderOptions};
use crate::grid;
use crate::layout::count_in_month;
use crate::model::{CalendarEvent, CalendarView};
use crate::state::CalendarViewState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthTile {
    /// First day of the month.
    pub month: NaiveDate,
    pub name: String,
    pub event_count: usize,
    pub is_current: bool,
}

impl MonthTile {
    /// Count badge text; months without events get no badge.
    pub fn badge(&self) -> Option<String> {
        (self.event_count > 0).then(|| self.event_count.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearView {
    pub year: i32,
    pub tiles: Vec<MonthTile>,
}

pub fn render(
    state: &CalendarViewState,
    events: &[CalendarEvent],
    options: &RenderOptions,
) -> Option<YearView> {
    if !is_shown(state, CalendarView::Year) {
        return None;
    }
    let year = options.focus(state).year();
    let today = options.today();
    let locale = state.locale();

    let tiles = grid::year_months(year)
        .into_iter()
        .map(|month| MonthTile {
            month,
            name: locale.month_name(month.month()).to_string(),
            event_count: count_in_month(events, month),
            is_current: grid::is_same_month(month, today),
        })
        .collect();

    Some(YearView { year, tiles })
}

/// Handles a click on a month tile: anchors on the month's first day and
/// opens Month view when it is visible.
pub fn select_month(state: &mut CalendarViewState, month: NaiveDate) {
    state.set_date(grid::start_of_day(grid::first_day_of_month(month)));
    state.set_view(CalendarView::Month);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::state::CalendarOptions;
    use chrono::NaiveDateTime;

    fn at(m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, m, d)
            .expect("valid date")
            .and_hms_opt(12, 0, 0)
            .expect("valid time")
    }

    fn year_state(visible: Vec<CalendarView>) -> CalendarViewState {
        CalendarViewState::new(CalendarOptions {
            default_date: at(6, 15),
            default_view: CalendarView::Year,
            locale: Locale::en(),
            visible_views: visible,
        })
        .expect("valid options")
    }

    #[test]
    fn tiles_show_counts_only_for_busy_months() {
        let events: Vec<CalendarEvent> = (1..=5)
            .map(|d| CalendarEvent::new(format!("m{d}"), "Meal", at(3, d), at(3, d)))
            .chain(std::iter::once(CalendarEvent::new(
                "late",
                "Last",
                at(12, 31),
                at(12, 31),
            )))
            .collect();
        let view = render(&year_state(CalendarView::ALL.to_vec()), &events, &RenderOptions::at(at(10, 17)))
            .expect("year shown");

        assert_eq!(view.year, 2026);
        assert_eq!(view.tiles.len(), 12);
        assert_eq!(view.tiles[0].badge(), None);
        assert_eq!(view.tiles[2].name, "March");
        assert_eq!(view.tiles[2].badge().as_deref(), Some("5"));
        assert_eq!(view.tiles[11].event_count, 1);
        assert!(view.tiles[9].is_current);
        assert_eq!(view.tiles.iter().filter(|t| t.is_current).count(), 1);
    }

    #[test]
    fn month_click_opens_month_view_on_first_day() {
        let mut state = year_state(CalendarView::ALL.to_vec());
        let march = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        select_month(&mut state, march);
        assert_eq!(state.active_view(), CalendarView::Month);
        assert_eq!(state.anchor_day(), march);
    }

    #[test]
    fn month_click_with_hidden_month_view_only_moves_anchor() {
        let mut state = year_state(vec![CalendarView::Year, CalendarView::Day]);
        let march = NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date");
        select_month(&mut state, march);
        assert_eq!(state.active_view(), CalendarView::Year);
        assert_eq!(state.anchor_day(), march);
    }
}
