//! Calendar-correct date arithmetic shared by the renderers and navigation.
//!
//! Every shift goes through chrono's checked operations, so month and year
//! lengths come from the proleptic Gregorian rules rather than fixed offsets.
//! A shift that would leave chrono's representable range returns the input
//! unchanged.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::model::CalendarView;

pub const DAYS_PER_WEEK: usize = 7;
pub const HOURS_PER_DAY: u32 = 24;

pub fn add_days(at: NaiveDateTime, days: i64) -> NaiveDateTime {
    Duration::try_days(days)
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(at)
}

pub fn add_date_days(day: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| day.checked_add_signed(delta))
        .unwrap_or(day)
}

/// Shifts by whole months, clamping the day to the target month's length.
pub fn add_months(at: NaiveDateTime, months: i32) -> NaiveDateTime {
    let span = Months::new(months.unsigned_abs());
    let shifted = if months >= 0 {
        at.checked_add_months(span)
    } else {
        at.checked_sub_months(span)
    };
    shifted.unwrap_or(at)
}

pub fn add_years(at: NaiveDateTime, years: i32) -> NaiveDateTime {
    match years.checked_mul(12) {
        Some(months) => add_months(at, months),
        None => at,
    }
}

/// Moves `at` by `steps` units of the given view's granularity.
pub fn step(view: CalendarView, at: NaiveDateTime, steps: i32) -> NaiveDateTime {
    match view {
        CalendarView::Day => add_days(at, i64::from(steps)),
        CalendarView::Week => add_days(at, i64::from(steps) * 7),
        CalendarView::Month => add_months(at, steps),
        CalendarView::Year => add_years(at, steps),
    }
}

pub fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

pub fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    day.and_time(last)
}

pub fn first_day_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

pub fn last_day_of_month(day: NaiveDate) -> NaiveDate {
    let first = first_day_of_month(day);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or_else(|| {
            // Only the final representable month lacks a successor.
            NaiveDate::from_ymd_opt(day.year(), day.month(), 31)
                .or_else(|| NaiveDate::from_ymd_opt(day.year(), day.month(), 30))
                .unwrap_or(day)
        })
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| last_day_of_month(first).day())
        .unwrap_or(0)
}

pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Monday on or before `day`.
pub fn start_of_week(day: NaiveDate) -> NaiveDate {
    let offset = day.weekday().num_days_from_monday();
    add_date_days(day, -i64::from(offset))
}

/// Sunday on or after `day`.
pub fn end_of_week(day: NaiveDate) -> NaiveDate {
    let offset = Weekday::Sun.num_days_from_monday() - day.weekday().num_days_from_monday();
    add_date_days(day, i64::from(offset))
}

/// The seven days of the Monday-first week containing `day`.
pub fn week_days(day: NaiveDate) -> Vec<NaiveDate> {
    let monday = start_of_week(day);
    monday.iter_days().take(DAYS_PER_WEEK).collect()
}

/// First and last cell of the Monday-first grid covering `day`'s month.
pub fn month_grid_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    (
        start_of_week(first_day_of_month(day)),
        end_of_week(last_day_of_month(day)),
    )
}

/// Whole weeks covering `day`'s month; always 4 to 6 rows of 7 dates.
pub fn month_grid(day: NaiveDate) -> Vec<Vec<NaiveDate>> {
    let (start, end) = month_grid_bounds(day);
    let days: Vec<NaiveDate> = start.iter_days().take_while(|d| *d <= end).collect();
    days.chunks(DAYS_PER_WEEK).map(|week| week.to_vec()).collect()
}

/// First day of every month in `year`.
pub fn year_months(year: i32) -> Vec<NaiveDate> {
    (1..=12)
        .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).expect("valid time")
    }

    #[test]
    fn month_lengths_follow_leap_rules() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2026, 12), 31);
        assert_eq!(days_in_month(2026, 13), 0);
    }

    #[test]
    fn month_shift_clamps_to_short_months() {
        assert_eq!(add_months(at(2026, 1, 31, 9), 1), at(2026, 2, 28, 9));
        assert_eq!(add_months(at(2024, 3, 31, 9), -1), at(2024, 2, 29, 9));
        assert_eq!(add_months(at(2026, 12, 15, 9), 1), at(2027, 1, 15, 9));
        assert_eq!(add_months(at(2026, 1, 15, 9), -13), at(2024, 12, 15, 9));
    }

    #[test]
    fn year_shift_moves_leap_day_to_february_end() {
        assert_eq!(add_years(at(2024, 2, 29, 0), 1), at(2025, 2, 28, 0));
        assert_eq!(add_years(at(2024, 2, 29, 0), 4), at(2028, 2, 29, 0));
        assert_eq!(add_years(at(2024, 2, 29, 0), -1), at(2023, 2, 28, 0));
    }

    #[test]
    fn steps_use_view_granularity() {
        let anchor = at(2026, 10, 17, 14);
        assert_eq!(step(CalendarView::Day, anchor, 1), at(2026, 10, 18, 14));
        assert_eq!(step(CalendarView::Week, anchor, -1), at(2026, 10, 10, 14));
        assert_eq!(step(CalendarView::Month, anchor, 3), at(2027, 1, 17, 14));
        assert_eq!(step(CalendarView::Year, anchor, -2), at(2024, 10, 17, 14));
    }

    #[test]
    fn shifts_past_representable_range_leave_date_unchanged() {
        let last = NaiveDate::MAX.and_hms_opt(0, 0, 0).expect("valid time");
        assert_eq!(add_days(last, 1), last);
        assert_eq!(add_months(last, 1), last);
        assert_eq!(add_years(last, i32::MAX), last);
    }

    #[test]
    fn far_future_months_are_still_calendar_correct() {
        assert_eq!(days_in_month(200_000, 2), 29);
        assert_eq!(add_months(at(199_999, 12, 31, 0), 2), at(200_000, 2, 29, 0));
    }

    #[test]
    fn week_bounds_are_monday_to_sunday() {
        // 2026-10-17 is a Saturday.
        assert_eq!(start_of_week(date(2026, 10, 17)), date(2026, 10, 12));
        assert_eq!(end_of_week(date(2026, 10, 17)), date(2026, 10, 18));
        assert_eq!(start_of_week(date(2026, 10, 12)), date(2026, 10, 12));
        assert_eq!(end_of_week(date(2026, 10, 18)), date(2026, 10, 18));
        let days = week_days(date(2026, 10, 14));
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].weekday(), Weekday::Mon);
        assert_eq!(days[6], date(2026, 10, 18));
    }

    #[test]
    fn thirty_one_day_month_starting_wednesday_fills_five_rows() {
        // July 2026 starts on a Wednesday and ends on a Friday.
        assert_eq!(date(2026, 7, 1).weekday(), Weekday::Wed);
        let weeks = month_grid(date(2026, 7, 20));
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks.iter().map(Vec::len).sum::<usize>(), 35);
        assert_eq!(weeks[0][0], date(2026, 6, 29));
        assert_eq!(weeks[4][6], date(2026, 8, 2));
    }

    #[test]
    fn thirty_one_day_month_starting_saturday_needs_six_rows() {
        // August 2026 starts on a Saturday.
        assert_eq!(date(2026, 8, 1).weekday(), Weekday::Sat);
        let weeks = month_grid(date(2026, 8, 15));
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks.iter().map(Vec::len).sum::<usize>(), 42);
        assert_eq!(weeks[0][0], date(2026, 7, 27));
        assert_eq!(weeks[5][6], date(2026, 9, 6));
        assert_eq!(month_grid_bounds(date(2026, 8, 15)), (date(2026, 7, 27), date(2026, 9, 6)));
    }

    #[test]
    fn february_starting_monday_fills_exactly_four_rows() {
        // February 2027 starts on a Monday and has 28 days.
        let weeks = month_grid(date(2027, 2, 10));
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0][0], date(2027, 2, 1));
        assert_eq!(weeks[3][6], date(2027, 2, 28));
    }

    #[test]
    fn year_months_start_on_the_first() {
        let months = year_months(2026);
        assert_eq!(months.len(), 12);
        assert!(months.iter().all(|m| m.day() == 1 && m.year() == 2026));
        assert_eq!(months[11], date(2026, 12, 1));
    }

    #[test]
    fn day_bounds_cover_whole_day() {
        let day = date(2026, 5, 5);
        assert_eq!(start_of_day(day), at(2026, 5, 5, 0));
        assert!(end_of_day(day) > at(2026, 5, 5, 23));
        assert!(end_of_day(day) < at(2026, 5, 6, 0));
    }
}
