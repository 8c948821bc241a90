use chrono::{Local, NaiveDateTime};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::grid;
use crate::model::CalendarView;
use crate::state::CalendarViewState;

/// Keys the calendar reacts to, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Prev,
    Next,
    StepBack,
    StepForward,
    SwitchView(CalendarView),
    Today,
}

impl Shortcut {
    pub fn from_key(key: Key) -> Option<Shortcut> {
        match key {
            Key::Up => Some(Shortcut::Prev),
            Key::Down => Some(Shortcut::Next),
            Key::Left => Some(Shortcut::StepBack),
            Key::Right => Some(Shortcut::StepForward),
            Key::Char('t') => Some(Shortcut::Today),
            Key::Char(ch) => CalendarView::from_shortcut(ch).map(Shortcut::SwitchView),
        }
    }
}

impl CalendarViewState {
    pub fn next(&mut self) {
        self.shift(1);
    }

    pub fn prev(&mut self) {
        self.shift(-1);
    }

    pub fn today(&mut self) {
        self.today_at(Local::now().naive_local());
    }

    pub fn today_at(&mut self, now: NaiveDateTime) {
        tracing::debug!(%now, "jumping to today");
        self.set_date(now);
    }

    fn shift(&mut self, steps: i32) {
        let view = self.active_view();
        let target = grid::step(view, self.anchor(), steps);
        tracing::debug!(%view, steps, from = %self.anchor(), to = %target, "navigating");
        self.set_date(target);
    }

    /// Arrow-key step: one day, except one month in Year view.
    fn nudge(&mut self, steps: i32) {
        let target = match self.active_view() {
            CalendarView::Year => grid::add_months(self.anchor(), steps),
            CalendarView::Day | CalendarView::Week | CalendarView::Month => {
                grid::add_days(self.anchor(), i64::from(steps))
            }
        };
        self.set_date(target);
    }

    /// Applies a shortcut. View switches to hidden views do nothing, the same
    /// as a trigger that was never rendered.
    pub fn apply_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::Prev => self.prev(),
            Shortcut::Next => self.next(),
            Shortcut::StepBack => self.nudge(-1),
            Shortcut::StepForward => self.nudge(1),
            Shortcut::SwitchView(view) => {
                self.set_view(view);
            }
            Shortcut::Today => self.today(),
        }
    }

    /// Returns whether `key` is bound to a calendar shortcut.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match Shortcut::from_key(key) {
            Some(shortcut) => {
                self.apply_shortcut(shortcut);
                true
            }
            None => false,
        }
    }
}

type Handler = Box<dyn FnMut(Key) -> bool>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    handlers: Vec<(u64, Rc<RefCell<Handler>>)>,
}

/// Page-wide key listener registry. Handlers stay bound only as long as the
/// [`HotkeySubscription`] returned by [`HotkeyHub::subscribe`] is alive.
#[derive(Clone, Default)]
pub struct HotkeyHub {
    inner: Rc<RefCell<HubInner>>,
}

#[must_use = "dropping the subscription unbinds its handler"]
pub struct HotkeySubscription {
    id: u64,
    hub: Weak<RefCell<HubInner>>,
}

impl HotkeyHub {
    pub fn new() -> Self {
        HotkeyHub::default()
    }

    pub fn subscribe(&self, handler: impl FnMut(Key) -> bool + 'static) -> HotkeySubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .handlers
            .push((id, Rc::new(RefCell::new(Box::new(handler) as Handler))));
        HotkeySubscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Delivers `key` to every bound handler. Returns whether any handled it.
    pub fn dispatch(&self, key: Key) -> bool {
        let handlers: Vec<Rc<RefCell<Handler>>> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        let mut handled = false;
        for handler in handlers {
            if let Ok(mut handler) = handler.try_borrow_mut() {
                let call: &mut Handler = &mut handler;
                handled |= call(key);
            }
        }
        handled
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for HotkeySubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            inner
                .borrow_mut()
                .handlers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

/// Binds the calendar shortcuts of `state` for the lifetime of the returned
/// subscription.
pub fn mount_shortcuts(
    hub: &HotkeyHub,
    state: Rc<RefCell<CalendarViewState>>,
) -> HotkeySubscription {
    hub.subscribe(move |key| match state.try_borrow_mut() {
        Ok(mut state) => state.handle_key(key),
        Err(_) => {
            tracing::warn!(?key, "calendar state busy; dropping shortcut");
            false
        }
    })
}
