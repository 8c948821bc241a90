use crate::model::CalendarView;
use crate::state::CalendarViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    View(CalendarView),
    Prev,
    Next,
    Today,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTrigger {
    pub view: CalendarView,
    pub active: bool,
}

/// View-switch buttons, one per visible view in configured order.
pub fn view_triggers(state: &CalendarViewState) -> Vec<ViewTrigger> {
    state
        .visible_views()
        .iter()
        .map(|&view| ViewTrigger {
            view,
            active: view == state.active_view(),
        })
        .collect()
}

pub fn activate(state: &mut CalendarViewState, trigger: Trigger) {
    match trigger {
        Trigger::View(view) => {
            state.set_view(view);
        }
        Trigger::Prev => state.prev(),
        Trigger::Next => state.next(),
        Trigger::Today => state.today(),
    }
}
