use crate::commands::calendar_state;
use crate::config::Settings;
use crate::meals::{MealBook, MealSlot};
use crate::storage::{save_book, BookLocation};
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use mealcal::layout::EventBlock;
use mealcal::navigation::{mount_shortcuts, HotkeyHub, HotkeySubscription, Key};
use mealcal::views::day::DayView;
use mealcal::views::triggers::{self, Trigger};
use mealcal::views::{self, month, title, year, MonthView, RenderOptions, RenderedView};
use mealcal::views::{WeekView, YearView};
use mealcal::{CalendarEvent, CalendarView, CalendarViewState, EventColor, ViewChange};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Terminal;
use std::cell::{Cell, RefCell};
use std::io::{stdout, Stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};

pub fn run(settings: Settings, book: MealBook, location: BookLocation) -> Result<()> {
    let mut app = App::new(settings, book, location)?;
    let mut terminal = setup_terminal()?;
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App {
    settings: Settings,
    book: MealBook,
    location: BookLocation,
    events: Vec<CalendarEvent>,
    calendar: Rc<RefCell<CalendarViewState>>,
    hotkeys: HotkeyHub,
    _shortcuts: HotkeySubscription,
    last_change: Rc<Cell<Option<ViewChange>>>,
    details: DetailsPanel,
    status: String,
    last_save: Option<Instant>,
}

/// Side panel listing the meals planned for one date.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct DetailsPanel {
    date: Option<NaiveDate>,
}

impl DetailsPanel {
    fn is_open(&self) -> bool {
        self.date.is_some()
    }

    fn open(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    /// Closes the panel, handing the date it showed to `on_close`.
    fn close(&mut self, on_close: impl FnOnce(NaiveDate)) {
        if let Some(date) = self.date.take() {
            on_close(date);
        }
    }
}

impl App {
    fn new(settings: Settings, book: MealBook, location: BookLocation) -> Result<Self> {
        let now = Local::now().naive_local();
        let mut state = calendar_state(&settings, now, settings.default_view)?;

        let last_change = Rc::new(Cell::new(None));
        let recorder = Rc::clone(&last_change);
        state.subscribe(move |change: &ViewChange| recorder.set(Some(*change)));

        let calendar = Rc::new(RefCell::new(state));
        let hotkeys = HotkeyHub::new();
        let shortcuts = mount_shortcuts(&hotkeys, Rc::clone(&calendar));
        let events = book.events(&settings.meal_times);
        let status = format!("Loaded meal plans from {}", location.path.display());
        Ok(App {
            settings,
            book,
            location,
            events,
            calendar,
            hotkeys,
            _shortcuts: shortcuts,
            last_change,
            details: DetailsPanel::default(),
            status,
            last_save: None,
        })
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key)? {
                        break;
                    }
                    self.report_change();
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc => {
                let status = &mut self.status;
                self.details
                    .close(|date| *status = format!("Closed details for {}", date));
            }
            KeyCode::Enter => self.click(),
            KeyCode::Char(ch @ '1'..='9') => self.press_trigger(ch),
            KeyCode::Char(ch @ ('B' | 'L' | 'D')) if self.details.is_open() => {
                let slot = match ch {
                    'B' => MealSlot::Breakfast,
                    'L' => MealSlot::Lunch,
                    _ => MealSlot::Dinner,
                };
                self.clear_slot(slot)?;
            }
            code => {
                if let Some(key) = to_key(code) {
                    if !self.hotkeys.dispatch(key) {
                        self.status = format!("No shortcut for {:?}", key);
                    }
                }
            }
        }
        Ok(false)
    }

    fn press_trigger(&mut self, digit: char) {
        let Some(index) = digit.to_digit(10).map(|d| d as usize) else {
            return;
        };
        let mut state = self.calendar.borrow_mut();
        match triggers::view_triggers(&state).get(index.saturating_sub(1)) {
            Some(trigger) => triggers::activate(&mut state, Trigger::View(trigger.view)),
            None => self.status = format!("No view bound to {}", digit),
        }
    }

    /// Enter acts as a click on whatever sits under the anchor.
    fn click(&mut self) {
        let mut state = self.calendar.borrow_mut();
        let day = state.anchor_day();
        match state.active_view() {
            CalendarView::Month => {
                let mut picked = None;
                if self.settings.open_details_on_select {
                    let mut record = |date: NaiveDate| picked = Some(date);
                    month::select_day(&mut state, day, Some(&mut record));
                } else {
                    month::select_day(&mut state, day, None);
                }
                if let Some(date) = picked {
                    self.details.open(date);
                }
            }
            CalendarView::Year => year::select_month(&mut state, day),
            CalendarView::Day | CalendarView::Week => {
                if self.details.date == Some(day) {
                    self.details.close(|_| {});
                } else {
                    self.details.open(day);
                }
            }
        }
    }

    fn clear_slot(&mut self, slot: MealSlot) -> Result<()> {
        let Some(date) = self.details.date else {
            return Ok(());
        };
        match self.book.clear(date, slot) {
            Some(recipe) => {
                save_book(&self.location, &self.book)?;
                self.last_save = Some(Instant::now());
                self.events = self.book.events(&self.settings.meal_times);
                self.status = format!("Removed {} from {} on {}", recipe, slot, date);
            }
            None => self.status = format!("Nothing planned for {} on {}", slot, date),
        }
        Ok(())
    }

    fn report_change(&mut self) {
        let Some(change) = self.last_change.take() else {
            return;
        };
        let state = self.calendar.borrow();
        tracing::debug!(anchor = %change.anchor, view = %change.view, "calendar changed");
        self.status = format!(
            "{} view: {}",
            change.view.label(),
            title::current_date_label(change.view, change.anchor.date(), state.locale())
        );
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);
        self.draw_triggers(f, layout[1]);

        let body = if self.details.is_open() {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(layout[2]);
            self.draw_details(f, split[1]);
            split[0]
        } else {
            layout[2]
        };

        let options = RenderOptions {
            hour_height: self.settings.hour_height,
            ..RenderOptions::at(Local::now().naive_local())
        };
        let state = self.calendar.borrow();
        match views::render(&state, &self.events, &options) {
            Some(RenderedView::Day(view)) => draw_day(f, body, &view),
            Some(RenderedView::Week(view)) => draw_week(f, body, &view),
            Some(RenderedView::Month(view)) => draw_month(f, body, &view, state.anchor_day()),
            Some(RenderedView::Year(view)) => draw_year(f, body, &view, state.anchor_day()),
            None => {
                let msg = Paragraph::new("Nothing to show")
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(Clear, body);
                f.render_widget(msg, body);
            }
        }
        drop(state);

        self.draw_footer(f, layout[3]);
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let state = self.calendar.borrow();
        let view = state.active_view();
        let today = Local::now().date_naive();
        let saved = match self.last_save {
            Some(at) => format!("saved {}", format_elapsed(at)),
            None => "not saved yet".into(),
        };
        let line = Line::from(vec![
            Span::styled(
                "mealcal ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                title::date_range_label(view, state.anchor_day(), today, state.locale()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  "),
            Span::styled(
                title::current_date_label(view, state.anchor_day(), state.locale()),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("{}", self.location.path.display()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  •  "),
            Span::styled(saved, Style::default().fg(Color::Gray)),
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_triggers(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let state = self.calendar.borrow();
        let mut spans = Vec::new();
        for (idx, trigger) in triggers::view_triggers(&state).iter().enumerate() {
            let style = if trigger.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(
                format!(" {} {} ", idx + 1, trigger.view.label()),
                style,
            ));
            spans.push(Span::raw(" "));
        }
        spans.extend([
            Span::styled(" ↑ prev ", Style::default().fg(Color::LightCyan)),
            Span::styled(" t today ", Style::default().fg(Color::LightCyan)),
            Span::styled(" ↓ next ", Style::default().fg(Color::LightCyan)),
        ]);
        f.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }

    fn draw_details(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(date) = self.details.date else {
            return;
        };
        let state = self.calendar.borrow();
        let plan = self.book.plan_for(date);
        let mut lines = Vec::new();
        for slot in MealSlot::ALL {
            let window = self.settings.meal_times.window(slot);
            let recipe = plan.and_then(|p| p.get(slot));
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<10}", slot.label()),
                    Style::default()
                        .fg(event_color(Some(slot.color())))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{} ", window.start.format("%H:%M")),
                    Style::default().fg(Color::DarkGray),
                ),
                match recipe {
                    Some(name) => Span::raw(name.to_string()),
                    None => Span::styled("(nothing planned)", Style::default().fg(Color::DarkGray)),
                },
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("B/L/D", Style::default().fg(Color::LightRed)),
            Span::raw(" clear slot  "),
            Span::styled("Esc", Style::default().fg(Color::LightYellow)),
            Span::raw(" close"),
        ]));

        let block = Block::default()
            .title(Span::styled(
                state.locale().long_date(date),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            area,
        );
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            footer_help_line(self.calendar.borrow().active_view()),
            Line::from(Span::styled(
                self.status.clone(),
                Style::default().fg(Color::Gray),
            )),
        ];
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn draw_day(f: &mut ratatui::Frame<'_>, area: Rect, view: &DayView) {
    let rows = area.height.saturating_sub(2) as usize;
    let first = first_visible_hour(&view.blocks, view.hour_height, rows);
    let lines: Vec<Line<'static>> = view
        .hours
        .iter()
        .skip(first)
        .take(rows)
        .map(|row| {
            let label_style = if row.highlighted {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mut spans = vec![Span::styled(format!("{} │ ", row.label), label_style)];
            for block in view
                .blocks
                .iter()
                .filter(|b| block_hour(b, view.hour_height) == row.hour as usize)
            {
                spans.push(block_span(block));
                spans.push(Span::raw("  "));
            }
            Line::from(spans)
        })
        .collect();

    let block = Block::default()
        .title(view.date.format("%A").to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_week(f: &mut ratatui::Frame<'_>, area: Rect, view: &WeekView) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, 7); view.columns.len().max(1)])
        .split(area);

    for (column, rect) in view.columns.iter().zip(columns.iter()) {
        let mut lines = Vec::new();
        if let Some(hour) = column.highlighted_hour {
            lines.push(Line::from(Span::styled(
                format!("now {}", views::hour_label(hour)),
                Style::default().fg(Color::Yellow),
            )));
        }
        for block in &column.blocks {
            if block.show_time {
                lines.push(Line::from(Span::styled(
                    block.time_label.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines.push(Line::from(block_span(block)));
        }

        let heading_style = if column.is_today {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .title(Span::styled(
                format!("{} {}", column.weekday, column.day_of_month),
                heading_style,
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if column.is_today {
                Color::Yellow
            } else {
                Color::DarkGray
            }));
        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            *rect,
        );
    }
}

fn draw_month(f: &mut ratatui::Frame<'_>, area: Rect, view: &MonthView, cursor: NaiveDate) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(4)])
        .split(area);

    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, 7); 7])
        .split(sections[0]);
    for (heading, rect) in view.weekday_headers.iter().zip(header_cols.iter()) {
        f.render_widget(
            Paragraph::new(Span::styled(heading.clone(), Style::default().fg(Color::Gray)))
                .alignment(Alignment::Center),
            *rect,
        );
    }

    let weeks = view.weeks.len().max(1) as u32;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, weeks); weeks as usize])
        .split(sections[1]);
    for (week, row) in view.weeks.iter().zip(rows.iter()) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, 7); 7])
            .split(*row);
        for (cell, rect) in week.iter().zip(cols.iter()) {
            let mut number_style = Style::default().fg(if cell.overflow {
                Color::DarkGray
            } else {
                Color::White
            });
            if cell.is_today {
                number_style = number_style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
            }
            let mut lines = vec![Line::from(Span::styled(
                cell.date.day().to_string(),
                number_style,
            ))];
            for label in &cell.labels {
                let style = if cell.overflow {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(event_color(label.color))
                };
                lines.push(Line::from(Span::styled(label.title.clone(), style)));
            }
            if let Some(more) = cell.more_label() {
                lines.push(Line::from(Span::styled(
                    more,
                    Style::default().fg(Color::Gray),
                )));
            }

            let border = if cell.date == cursor {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let block = Block::default().borders(Borders::ALL).border_style(border);
            f.render_widget(Paragraph::new(lines).block(block), *rect);
        }
    }
}

fn draw_year(f: &mut ratatui::Frame<'_>, area: Rect, view: &YearView, cursor: NaiveDate) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, 3); 3])
        .split(area);
    for (tiles, row) in view.tiles.chunks(4).zip(rows.iter()) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, 4); 4])
            .split(*row);
        for (tile, rect) in tiles.iter().zip(cols.iter()) {
            let selected =
                tile.month.year() == cursor.year() && tile.month.month() == cursor.month();
            let name_style = if tile.is_current {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let badge = match tile.badge() {
                Some(count) => Span::styled(
                    format!("{} meals", count),
                    Style::default().fg(Color::LightGreen),
                ),
                None => Span::raw(""),
            };
            let lines = vec![
                Line::from(Span::styled(tile.name.clone(), name_style)),
                Line::from(badge),
            ];
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if selected {
                    Color::Cyan
                } else {
                    Color::DarkGray
                }));
            f.render_widget(
                Paragraph::new(lines)
                    .alignment(Alignment::Center)
                    .block(block),
                *rect,
            );
        }
    }
}

fn footer_help_line(view: CalendarView) -> Line<'static> {
    let mut spans = vec![
        Span::styled("d/w/m/y", Style::default().fg(Color::LightCyan)),
        Span::raw(" view  "),
        Span::styled("↑↓", Style::default().fg(Color::LightCyan)),
        Span::raw(" prev/next  "),
        Span::styled("←→", Style::default().fg(Color::LightCyan)),
        Span::raw(" move  "),
        Span::styled("t", Style::default().fg(Color::LightGreen)),
        Span::raw(" today  "),
    ];
    let enter = match view {
        CalendarView::Month => " open day  ",
        CalendarView::Year => " open month  ",
        CalendarView::Day | CalendarView::Week => " details  ",
    };
    spans.extend([
        Span::styled("Enter", Style::default().fg(Color::LightYellow)),
        Span::raw(enter),
        Span::styled("q", Style::default().fg(Color::LightRed)),
        Span::raw(" quit"),
    ]);
    Line::from(spans)
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char(ch) => Some(Key::Char(ch)),
        _ => None,
    }
}

fn event_color(color: Option<EventColor>) -> Color {
    match color {
        Some(EventColor::Red) => Color::LightRed,
        Some(EventColor::Pink) => Color::LightMagenta,
        Some(EventColor::Green) => Color::LightGreen,
        Some(EventColor::Blue) => Color::LightBlue,
        Some(EventColor::Yellow) => Color::LightYellow,
        Some(EventColor::Purple) => Color::Magenta,
        Some(EventColor::Indigo) => Color::Blue,
        None => Color::Cyan,
    }
}

fn block_span(block: &EventBlock) -> Span<'static> {
    Span::styled(
        block.title.clone(),
        Style::default()
            .fg(event_color(block.color))
            .add_modifier(Modifier::BOLD),
    )
}

fn block_hour(block: &EventBlock, hour_height: f64) -> usize {
    (block.geometry.top / hour_height).floor() as usize
}

/// First hour row to draw so the earliest event fits in `rows` lines.
fn first_visible_hour(blocks: &[EventBlock], hour_height: f64, rows: usize) -> usize {
    let earliest = blocks
        .iter()
        .map(|b| block_hour(b, hour_height))
        .min()
        .unwrap_or(7);
    earliest.min(24usize.saturating_sub(rows))
}

fn format_elapsed(last: Instant) -> String {
    let secs = last.elapsed().as_secs();
    if secs < 60 {
        format!("{}s ago", secs)
    } else {
        format!("{}m ago", secs / 60)
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app(dir: &tempfile::TempDir, open_details_on_select: bool) -> App {
        let settings = Settings {
            open_details_on_select,
            ..Settings::default()
        };
        let location = BookLocation::new(dir.path().join("meals.yml"));
        let mut book = MealBook::default();
        let today = Local::now().date_naive();
        book.assign(today, MealSlot::Lunch, "Noodles").expect("recipe given");
        App::new(settings, book, location).expect("valid settings")
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        let quit = app
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .expect("key handled");
        app.report_change();
        quit
    }

    #[test]
    fn month_click_opens_details_when_configured() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app(&dir, true);
        assert_eq!(app.calendar.borrow().active_view(), CalendarView::Month);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.details.date, Some(Local::now().date_naive()));
        assert_eq!(app.calendar.borrow().active_view(), CalendarView::Month);

        press(&mut app, KeyCode::Esc);
        assert!(!app.details.is_open());
        assert!(app.status.starts_with("Closed details"));
    }

    #[test]
    fn month_click_drills_down_without_details() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app(&dir, false);
        press(&mut app, KeyCode::Enter);
        assert!(!app.details.is_open());
        assert_eq!(app.calendar.borrow().active_view(), CalendarView::Day);
        assert!(app.status.starts_with("Day view"));
    }

    #[test]
    fn shortcuts_and_triggers_switch_views() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app(&dir, true);
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.calendar.borrow().active_view(), CalendarView::Year);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.calendar.borrow().active_view(), CalendarView::Week);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.status, "No view bound to 9");
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn clearing_a_slot_saves_the_book() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app(&dir, true);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('L'));
        assert!(app.book.plans.is_empty());
        assert!(app.events.is_empty());
        assert!(app.location.path.exists());
        assert!(app.last_save.is_some());
    }

    #[test]
    fn day_view_scrolls_to_first_meal() {
        assert_eq!(first_visible_hour(&[], 60.0, 10), 7);
        assert_eq!(first_visible_hour(&[], 60.0, 20), 4);
        assert_eq!(to_key(KeyCode::Left), Some(Key::Left));
        assert_eq!(to_key(KeyCode::Enter), None);
        assert_eq!(event_color(Some(EventColor::Green)), Color::LightGreen);
    }
}
