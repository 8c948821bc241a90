use chrono::{Datelike, NaiveDate};

use crate::grid;
use crate::locale::Locale;
use crate::model::CalendarView;

/// Toolbar label for the period on screen. Day view prefers relative words
/// ("Today", "Yesterday", "Tomorrow") when they apply.
pub fn date_range_label(
    view: CalendarView,
    date: NaiveDate,
    today: NaiveDate,
    locale: &Locale,
) -> String {
    match view {
        CalendarView::Day => locale
            .relative_day(date, today)
            .map(str::to_string)
            .unwrap_or_else(|| locale.long_date(date)),
        CalendarView::Week => format!(
            "{} - {}",
            locale.medium_date(grid::start_of_week(date)),
            locale.medium_date(grid::end_of_week(date))
        ),
        CalendarView::Month => locale.month_year(date),
        CalendarView::Year => date.year().to_string(),
    }
}

/// Heading for the period on screen, without relative words.
pub fn current_date_label(view: CalendarView, date: NaiveDate, locale: &Locale) -> String {
    match view {
        CalendarView::Day => locale.long_date(date),
        CalendarView::Week => {
            let end = grid::end_of_week(date);
            format!(
                "{} - {}, {}",
                locale.month_day(grid::start_of_week(date)),
                locale.month_day(end),
                end.year()
            )
        }
        CalendarView::Month => locale.month_year(date),
        CalendarView::Year => date.year().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).expect("valid date")
    }

    #[test]
    fn day_label_uses_relative_words() {
        let en = Locale::en();
        let today = date(10, 17);
        assert_eq!(date_range_label(CalendarView::Day, today, today, &en), "Today");
        assert_eq!(date_range_label(CalendarView::Day, date(10, 18), today, &en), "Tomorrow");
        assert_eq!(
            date_range_label(CalendarView::Day, date(10, 20), today, &en),
            "October 20, 2026"
        );
        assert_eq!(
            date_range_label(CalendarView::Day, date(10, 16), today, &Locale::zh_cn()),
            "昨天"
        );
    }

    #[test]
    fn week_labels_span_monday_to_sunday() {
        let en = Locale::en();
        assert_eq!(
            date_range_label(CalendarView::Week, date(12, 30), date(1, 1), &en),
            "Dec 28, 2026 - Jan 3, 2027"
        );
        assert_eq!(
            current_date_label(CalendarView::Week, date(12, 30), &en),
            "Dec 28 - Jan 03, 2027"
        );
    }

    #[test]
    fn month_and_year_labels() {
        let en = Locale::en();
        assert_eq!(current_date_label(CalendarView::Month, date(2, 9), &en), "February 2026");
        assert_eq!(date_range_label(CalendarView::Year, date(2, 9), date(2, 9), &en), "2026");
        assert_eq!(current_date_label(CalendarView::Day, date(2, 9), &en), "February 9, 2026");
    }
}
