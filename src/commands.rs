use crate::config::Settings;
use crate::meals::{MealBook, MealSlot};
use crate::storage::{load_book, save_book, BookLocation};
use crate::ui;
use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use mealcal::views::{self, title, RenderOptions, RenderedView};
use mealcal::{CalendarOptions, CalendarView, CalendarViewState, Locale};

pub fn tui(settings: Settings) -> Result<()> {
    let (book, location) = load_current_book(&settings)?;
    ui::run(settings, book, location)
}

pub fn show(settings: Settings, view: Option<String>, date: Option<String>) -> Result<()> {
    let (book, _) = load_current_book(&settings)?;
    let view = match view {
        Some(raw) => raw.parse::<CalendarView>()?,
        None => settings.default_view,
    };
    let now = Local::now().naive_local();
    let anchor = match date {
        Some(raw) => parse_date(&raw)?.and_time(now.time()),
        None => now,
    };
    let state = calendar_state(&settings, anchor, view)?;
    if state.active_view() != view {
        println!("{} view is hidden; showing {}", view.label(), state.active_view().label());
    }

    let events = book.events(&settings.meal_times);
    let options = RenderOptions {
        hour_height: settings.hour_height,
        ..RenderOptions::at(now)
    };
    let rendered = views::render(&state, &events, &options)
        .ok_or_else(|| anyhow!("active view did not render"))?;
    println!(
        "{}",
        title::current_date_label(state.active_view(), state.anchor_day(), state.locale())
    );
    for line in render_text(&rendered, state.locale()) {
        println!("{}", line);
    }
    Ok(())
}

pub fn plan(settings: Settings, date: String, slot: String, recipe: String) -> Result<()> {
    let (mut book, location) = load_current_book(&settings)?;
    let day = parse_date(&date)?;
    let slot: MealSlot = slot.parse()?;
    book.assign(day, slot, &recipe)
        .with_context(|| format!("planning {} on {}", slot, day))?;
    save_book(&location, &book)?;
    println!("Planned {} for {} on {}", recipe.trim(), slot, day);
    Ok(())
}

pub fn unplan(settings: Settings, date: String, slot: String) -> Result<()> {
    let (mut book, location) = load_current_book(&settings)?;
    let day = parse_date(&date)?;
    let slot: MealSlot = slot.parse()?;
    match book.clear(day, slot) {
        Some(recipe) => {
            save_book(&location, &book)?;
            println!("Removed {} from {} on {}", recipe, slot, day);
        }
        None => println!("Nothing planned for {} on {}", slot, day),
    }
    Ok(())
}

pub fn list(settings: Settings) -> Result<()> {
    let (book, location) = load_current_book(&settings)?;
    println!("Meal plans ({})", location.path.display());
    if book.plans.is_empty() {
        println!("  (empty)");
    }
    for (day, plan) in &book.plans {
        println!("{}", day.format("%Y-%m-%d (%a)"));
        for slot in MealSlot::ALL {
            if let Some(recipe) = plan.get(slot) {
                println!("  - {}: {}", slot.label(), recipe);
            }
        }
    }
    Ok(())
}

pub fn calendar_state(
    settings: &Settings,
    anchor: NaiveDateTime,
    view: CalendarView,
) -> Result<CalendarViewState> {
    let state = CalendarViewState::new(CalendarOptions {
        default_date: anchor,
        default_view: view,
        locale: Locale::from(settings.locale),
        visible_views: settings.visible_views.clone(),
    })
    .context("configuring calendar")?;
    Ok(state)
}

fn load_current_book(settings: &Settings) -> Result<(MealBook, BookLocation)> {
    let location = BookLocation::new(settings.data_path()?);
    let book = load_book(&location)?;
    Ok((book, location))
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    let raw = input.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date format (use YYYY-MM-DD): {}", raw))
}

pub fn render_text(rendered: &RenderedView, locale: &Locale) -> Vec<String> {
    match rendered {
        RenderedView::Day(day) => {
            let mut lines = Vec::new();
            for row in &day.hours {
                let marker = if row.highlighted { ">" } else { " " };
                let starting: Vec<String> = day
                    .blocks
                    .iter()
                    .filter(|b| (b.geometry.top / day.hour_height).floor() as u32 == row.hour)
                    .map(|b| format!("{} ({})", b.title, b.time_label))
                    .collect();
                lines.push(format!("{}{} | {}", marker, row.label, starting.join("; ")));
            }
            lines
        }
        RenderedView::Week(week) => {
            let mut lines = Vec::new();
            for column in &week.columns {
                let marker = if column.is_today { "*" } else { " " };
                lines.push(format!("{}{} {:>2}", marker, column.weekday, column.day_of_month));
                for block in &column.blocks {
                    if block.show_time {
                        lines.push(format!("    {}  {}", block.time_label, block.title));
                    } else {
                        lines.push(format!("    {}", block.title));
                    }
                }
            }
            lines
        }
        RenderedView::Month(month) => {
            let mut lines = vec![month
                .weekday_headers
                .iter()
                .map(|h| format!("{:^6}", h))
                .collect::<String>()];
            for week in &month.weeks {
                let row: String = week
                    .iter()
                    .map(|cell| {
                        let day = if cell.overflow {
                            format!("({})", cell.date.day())
                        } else {
                            cell.date.day().to_string()
                        };
                        let count = cell.event_count();
                        let text = if count > 0 {
                            format!("{}*{}", day, count)
                        } else {
                            day
                        };
                        format!("{:^6}", text)
                    })
                    .collect();
                lines.push(row);
            }
            for cell in month.cells().filter(|c| !c.overflow && c.event_count() > 0) {
                let mut labels: Vec<String> = cell.labels.iter().map(|l| l.title.clone()).collect();
                labels.extend(cell.more_label());
                lines.push(format!("{}: {}", locale.month_day(cell.date), labels.join(", ")));
            }
            lines
        }
        RenderedView::Year(year) => year
            .tiles
            .iter()
            .map(|tile| {
                let marker = if tile.is_current { "*" } else { " " };
                match tile.badge() {
                    Some(badge) => format!("{}{:<10} {} events", marker, tile.name, badge),
                    None => format!("{}{}", marker, tile.name),
                }
            })
            .collect(),
    }
}
