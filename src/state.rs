//! The single source of truth for one mounted calendar.
//!
//! Every mutation goes through a method here (navigation adds `next`, `prev`
//! and `today` in [`crate::navigation`]). Effective changes are pushed to
//! subscribed listeners so hosts re-render on notification instead of polling.

use chrono::{Local, NaiveDate, NaiveDateTime};
use std::fmt;

use crate::locale::Locale;
use crate::model::{CalendarView, EngineError};

pub type ListenerId = u64;

type Listener = Box<dyn FnMut(&ViewChange)>;

/// Snapshot handed to listeners after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewChange {
    pub anchor: NaiveDateTime,
    pub view: CalendarView,
}

/// Construction parameters. Events are not part of the state; the host
/// passes its current snapshot to each render.
#[derive(Debug, Clone)]
pub struct CalendarOptions {
    pub default_date: NaiveDateTime,
    pub default_view: CalendarView,
    pub locale: Locale,
    pub visible_views: Vec<CalendarView>,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        CalendarOptions {
            default_date: Local::now().naive_local(),
            default_view: CalendarView::Month,
            locale: Locale::default(),
            visible_views: CalendarView::ALL.to_vec(),
        }
    }
}

pub struct CalendarViewState {
    anchor: NaiveDateTime,
    active_view: CalendarView,
    visible_views: Vec<CalendarView>,
    locale: Locale,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: ListenerId,
}

impl CalendarViewState {
    /// Fails only when no view is visible. A default view outside the visible
    /// set resolves to the first visible view.
    pub fn new(options: CalendarOptions) -> Result<Self, EngineError> {
        let visible_views = normalize_views(options.visible_views)?;
        let active_view = resolve_view(options.default_view, &visible_views);
        if active_view != options.default_view {
            tracing::debug!(
                requested = %options.default_view,
                resolved = %active_view,
                "default view is hidden; using first visible view"
            );
        }
        Ok(CalendarViewState {
            anchor: options.default_date,
            active_view,
            visible_views,
            locale: options.locale,
            listeners: Vec::new(),
            next_listener: 0,
        })
    }

    pub fn anchor(&self) -> NaiveDateTime {
        self.anchor
    }

    pub fn anchor_day(&self) -> NaiveDate {
        self.anchor.date()
    }

    pub fn active_view(&self) -> CalendarView {
        self.active_view
    }

    pub fn visible_views(&self) -> &[CalendarView] {
        &self.visible_views
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn is_visible(&self, view: CalendarView) -> bool {
        self.visible_views.contains(&view)
    }

    pub fn set_date(&mut self, anchor: NaiveDateTime) {
        if self.anchor == anchor {
            return;
        }
        self.anchor = anchor;
        self.notify();
    }

    /// Switches the active view. Hidden views are ignored and `false` is
    /// returned; no error is surfaced.
    pub fn set_view(&mut self, view: CalendarView) -> bool {
        if !self.is_visible(view) {
            tracing::debug!(%view, "ignoring switch to hidden view");
            return false;
        }
        if self.active_view != view {
            self.active_view = view;
            self.notify();
        }
        true
    }

    /// Replaces the visible set. When the active view drops out, the first
    /// newly visible view becomes active.
    pub fn set_visible_views(&mut self, views: Vec<CalendarView>) -> Result<(), EngineError> {
        let visible_views = normalize_views(views)?;
        let active_view = resolve_view(self.active_view, &visible_views);
        let changed = active_view != self.active_view;
        self.visible_views = visible_views;
        self.active_view = active_view;
        if changed {
            tracing::debug!(view = %active_view, "active view hidden; switched");
            self.notify();
        }
        Ok(())
    }

    pub fn set_locale(&mut self, locale: Locale) {
        if self.locale != locale {
            self.locale = locale;
            self.notify();
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ViewChange) + 'static) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(crate) fn notify(&mut self) {
        let change = ViewChange {
            anchor: self.anchor,
            view: self.active_view,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }
}

impl fmt::Debug for CalendarViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarViewState")
            .field("anchor", &self.anchor)
            .field("active_view", &self.active_view)
            .field("visible_views", &self.visible_views)
            .field("locale", &self.locale.kind())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn normalize_views(views: Vec<CalendarView>) -> Result<Vec<CalendarView>, EngineError> {
    let mut unique = Vec::with_capacity(views.len());
    for view in views {
        if !unique.contains(&view) {
            unique.push(view);
        }
    }
    if unique.is_empty() {
        return Err(EngineError::NoVisibleViews);
    }
    Ok(unique)
}

fn resolve_view(requested: CalendarView, visible: &[CalendarView]) -> CalendarView {
    if visible.contains(&requested) {
        requested
    } else {
        visible[0]
    }
}
