use anyhow::{Context, Result};
use chrono::{Duration, NaiveTime};
use directories::ProjectDirs;
use mealcal::layout::DEFAULT_HOUR_HEIGHT;
use mealcal::{CalendarView, EngineError, LocaleKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::meals::MealSlot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_view: CalendarView,
    pub visible_views: Vec<CalendarView>,
    pub hour_height: f64,
    pub locale: LocaleKind,
    pub data_file: Option<PathBuf>,
    pub meal_times: MealTimes,
    /// Month clicks open the details panel instead of drilling into Day view.
    pub open_details_on_select: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MealTimes {
    pub breakfast: MealWindow,
    pub lunch: MealWindow,
    pub dinner: MealWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealWindow {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    pub minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_view: CalendarView::Month,
            visible_views: CalendarView::ALL.to_vec(),
            hour_height: DEFAULT_HOUR_HEIGHT,
            locale: LocaleKind::default(),
            data_file: None,
            meal_times: MealTimes::default(),
            open_details_on_select: true,
        }
    }
}

impl Default for MealTimes {
    fn default() -> Self {
        MealTimes {
            breakfast: MealWindow::at(8, 0, 30),
            lunch: MealWindow::at(12, 0, 45),
            dinner: MealWindow::at(18, 30, 60),
        }
    }
}

impl MealTimes {
    pub fn window(&self, slot: MealSlot) -> MealWindow {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
        }
    }
}

impl MealWindow {
    fn at(hour: u32, minute: u32, minutes: u32) -> Self {
        MealWindow {
            start: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN),
            minutes,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.minutes))
    }
}

impl Settings {
    pub fn data_path(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("meals.yml")),
        }
    }

    fn validate(mut self) -> Result<Self> {
        if self.visible_views.is_empty() {
            return Err(
                anyhow::Error::new(EngineError::NoVisibleViews).context("visible_views is empty")
            );
        }
        if !self.hour_height.is_finite() || self.hour_height <= 0.0 {
            tracing::warn!(hour_height = self.hour_height, "invalid hour_height; using default");
            self.hour_height = DEFAULT_HOUR_HEIGHT;
        }
        if !self.visible_views.contains(&self.default_view) {
            tracing::warn!(
                default_view = %self.default_view,
                "default_view is not visible; the first visible view will be used"
            );
        }
        Ok(self)
    }
}

/// Reads settings from `path`, or from the per-user config file when no path
/// is given. A missing file yields defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file; using defaults");
        return Settings::default().validate();
    }
    let data = fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
    let settings = parse_settings(&data).with_context(|| format!("loading config {:?}", path))?;
    tracing::info!(path = %path.display(), "loaded config");
    Ok(settings)
}

pub fn parse_settings(data: &str) -> Result<Settings> {
    let settings: Settings = serde_yaml::from_str(data).context("parsing config file")?;
    settings.validate()
}

pub fn log_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join("mealcal.log"))
}

fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.yml"))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "mealcal").context("locating config directory")
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        crate::meals::parse_time(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = parse_settings(
            "default_view: week\nlocale: zh-cn\nmeal_times:\n  dinner:\n    start: \"19:15\"\n    minutes: 90\n",
        )
        .expect("valid config");
        assert_eq!(settings.default_view, CalendarView::Week);
        assert_eq!(settings.locale, LocaleKind::ZhCn);
        assert_eq!(settings.visible_views.len(), 4);
        assert_eq!(settings.hour_height, DEFAULT_HOUR_HEIGHT);
        assert_eq!(settings.meal_times.breakfast, MealTimes::default().breakfast);
        assert_eq!(
            settings.meal_times.dinner.start,
            NaiveTime::from_hms_opt(19, 15, 0).expect("valid time")
        );
        assert!(settings.open_details_on_select);
    }

    #[test]
    fn empty_visible_views_is_a_configuration_error() {
        let err = parse_settings("visible_views: []\n").expect_err("must reject");
        assert!(format!("{err:#}").contains("at least one calendar view"));
    }

    #[test]
    fn malformed_meal_time_is_rejected() {
        let err = parse_settings("meal_times:\n  lunch:\n    start: noon\n    minutes: 30\n")
            .expect_err("must reject");
        assert!(format!("{err:#}").contains("parsing config file"));
    }

    #[test]
    fn non_positive_hour_height_falls_back() {
        let settings = parse_settings("hour_height: -4\n").expect("valid config");
        assert_eq!(settings.hour_height, DEFAULT_HOUR_HEIGHT);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = load_settings(Some(&dir.path().join("absent.yml"))).expect("defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn explicit_data_file_wins() {
        let settings = parse_settings("data_file: /tmp/plans.yml\n").expect("valid config");
        assert_eq!(settings.data_path().expect("path"), PathBuf::from("/tmp/plans.yml"));
    }
}
