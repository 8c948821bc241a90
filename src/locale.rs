use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocaleKind {
    #[default]
    En,
    ZhCn,
}

/// Month and weekday names plus the relative day words used in headers.
/// Grids are always Monday-first; the locale only affects text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    kind: LocaleKind,
    month_names: [&'static str; 12],
    month_abbrevs: [&'static str; 12],
    weekday_abbrevs: [&'static str; 7],
    today: &'static str,
    yesterday: &'static str,
    tomorrow: &'static str,
}

const EN: Locale = Locale {
    kind: LocaleKind::En,
    month_names: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    month_abbrevs: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    weekday_abbrevs: ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
    today: "Today",
    yesterday: "Yesterday",
    tomorrow: "Tomorrow",
};

const ZH_CN: Locale = Locale {
    kind: LocaleKind::ZhCn,
    month_names: [
        "一月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月",
        "十二月",
    ],
    month_abbrevs: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    weekday_abbrevs: ["周一", "周二", "周三", "周四", "周五", "周六", "周日"],
    today: "今天",
    yesterday: "昨天",
    tomorrow: "明天",
};

impl Default for Locale {
    fn default() -> Self {
        EN
    }
}

impl From<LocaleKind> for Locale {
    fn from(kind: LocaleKind) -> Self {
        match kind {
            LocaleKind::En => EN,
            LocaleKind::ZhCn => ZH_CN,
        }
    }
}

impl Locale {
    pub fn en() -> Self {
        EN
    }

    pub fn zh_cn() -> Self {
        ZH_CN
    }

    pub fn kind(&self) -> LocaleKind {
        self.kind
    }

    pub fn month_name(&self, month: u32) -> &'static str {
        self.month_names[month_index(month)]
    }

    pub fn month_abbrev(&self, month: u32) -> &'static str {
        self.month_abbrevs[month_index(month)]
    }

    pub fn weekday_abbrev(&self, weekday: Weekday) -> &'static str {
        self.weekday_abbrevs[weekday.num_days_from_monday() as usize]
    }

    /// Monday-first short weekday names for grid headers.
    pub fn weekday_headers(&self) -> Vec<String> {
        self.weekday_abbrevs.iter().map(|s| s.to_string()).collect()
    }

    pub fn relative_day(&self, day: NaiveDate, today: NaiveDate) -> Option<&'static str> {
        match (day - today).num_days() {
            0 => Some(self.today),
            -1 => Some(self.yesterday),
            1 => Some(self.tomorrow),
            _ => None,
        }
    }

    pub fn long_date(&self, day: NaiveDate) -> String {
        match self.kind {
            LocaleKind::En => format!(
                "{} {}, {}",
                self.month_name(day.month()),
                day.day(),
                day.year()
            ),
            LocaleKind::ZhCn => format!("{}年{}月{}日", day.year(), day.month(), day.day()),
        }
    }

    pub fn medium_date(&self, day: NaiveDate) -> String {
        match self.kind {
            LocaleKind::En => format!(
                "{} {}, {}",
                self.month_abbrev(day.month()),
                day.day(),
                day.year()
            ),
            LocaleKind::ZhCn => format!("{}年{}月{}日", day.year(), day.month(), day.day()),
        }
    }

    pub fn month_day(&self, day: NaiveDate) -> String {
        match self.kind {
            LocaleKind::En => format!("{} {:02}", self.month_abbrev(day.month()), day.day()),
            LocaleKind::ZhCn => format!("{}{:02}日", self.month_abbrev(day.month()), day.day()),
        }
    }

    pub fn month_year(&self, day: NaiveDate) -> String {
        format!("{} {}", self.month_name(day.month()), day.year())
    }
}

fn month_index(month: u32) -> usize {
    (month.clamp(1, 12) - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn relative_words_cover_adjacent_days_only() {
        let locale = Locale::en();
        let today = date(2026, 10, 17);
        assert_eq!(locale.relative_day(today, today), Some("Today"));
        assert_eq!(locale.relative_day(date(2026, 10, 16), today), Some("Yesterday"));
        assert_eq!(locale.relative_day(date(2026, 10, 18), today), Some("Tomorrow"));
        assert_eq!(locale.relative_day(date(2026, 10, 19), today), None);
    }

    #[test]
    fn chinese_preset_formats_dates() {
        let locale = Locale::from(LocaleKind::ZhCn);
        assert_eq!(locale.long_date(date(2026, 3, 8)), "2026年3月8日");
        assert_eq!(locale.weekday_abbrev(Weekday::Sun), "周日");
        assert_eq!(locale.month_year(date(2026, 10, 1)), "十月 2026");
    }

    #[test]
    fn english_headers_start_on_monday() {
        let headers = Locale::en().weekday_headers();
        assert_eq!(headers.first().map(String::as_str), Some("Mon"));
        assert_eq!(headers.last().map(String::as_str), Some("Sun"));
        assert_eq!(Locale::en().month_day(date(2026, 1, 5)), "Jan 05");
    }

    #[test]
    fn locale_kind_uses_kebab_case_names() {
        let kind: LocaleKind = serde_yaml::from_str("zh-cn").expect("parse locale");
        assert_eq!(kind, LocaleKind::ZhCn);
    }
}
