use chrono::{NaiveDate, NaiveTime};
use mealcal::{CalendarEvent, EventColor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::config::MealTimes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<String>,
}

/// Every planned day, keyed by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealBook {
    #[serde(default)]
    pub plans: BTreeMap<NaiveDate, MealPlan>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("unknown meal slot: {0} (expected breakfast, lunch or dinner)")]
    UnknownSlot(String),
    #[error("recipe name is required")]
    EmptyRecipe,
    #[error("invalid meal time: {0} (expected HH:MM)")]
    InvalidTime(String),
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }

    pub fn color(&self) -> EventColor {
        match self {
            MealSlot::Breakfast => EventColor::Red,
            MealSlot::Lunch => EventColor::Green,
            MealSlot::Dinner => EventColor::Blue,
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MealSlot {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        MealSlot::ALL
            .into_iter()
            .find(|slot| slot.key() == key)
            .ok_or_else(|| PlanError::UnknownSlot(s.to_string()))
    }
}

impl MealPlan {
    pub fn get(&self, slot: MealSlot) -> Option<&str> {
        match slot {
            MealSlot::Breakfast => self.breakfast.as_deref(),
            MealSlot::Lunch => self.lunch.as_deref(),
            MealSlot::Dinner => self.dinner.as_deref(),
        }
    }

    fn slot_mut(&mut self, slot: MealSlot) -> &mut Option<String> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    pub fn is_empty(&self) -> bool {
        MealSlot::ALL.iter().all(|slot| self.get(*slot).is_none())
    }
}

impl MealBook {
    pub fn plan_for(&self, date: NaiveDate) -> Option<&MealPlan> {
        self.plans.get(&date)
    }

    pub fn assign(&mut self, date: NaiveDate, slot: MealSlot, recipe: &str) -> Result<(), PlanError> {
        let recipe = recipe.trim();
        if recipe.is_empty() {
            return Err(PlanError::EmptyRecipe);
        }
        *self.plans.entry(date).or_default().slot_mut(slot) = Some(recipe.to_string());
        Ok(())
    }

    /// Clears a slot; returns the recipe that was there, if any.
    pub fn clear(&mut self, date: NaiveDate, slot: MealSlot) -> Option<String> {
        let plan = self.plans.get_mut(&date)?;
        let removed = plan.slot_mut(slot).take();
        if plan.is_empty() {
            self.plans.remove(&date);
        }
        removed
    }

    /// One calendar event per planned meal, in date then slot order.
    pub fn events(&self, times: &MealTimes) -> Vec<CalendarEvent> {
        let mut events = Vec::new();
        for (date, plan) in &self.plans {
            for slot in MealSlot::ALL {
                let Some(recipe) = plan.get(slot) else {
                    continue;
                };
                let window = times.window(slot);
                let start = date.and_time(window.start);
                let end = start.checked_add_signed(window.duration()).unwrap_or(start);
                events.push(
                    CalendarEvent::new(
                        format!("{}:{}", date.format("%Y-%m-%d"), slot.key()),
                        format!("{}: {}", slot.label(), recipe),
                        start,
                        end,
                    )
                    .with_color(slot.color()),
                );
            }
        }
        events
    }
}

pub fn parse_time(raw: &str) -> Result<NaiveTime, PlanError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| PlanError::InvalidTime(raw.to_string()))
}
