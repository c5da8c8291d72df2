//! Drill-down state machine and fetch planning

use geodrill_core::models::{DataSource, Scope, Snapshot, ViewState};
use serde::{Deserialize, Serialize};

/// User interaction that may move the cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A state was clicked on the map or in the national table
    ClickState(String),
    /// A district row was clicked
    ClickDistrict(String),
    /// Explicit return to the national view
    Reset,
}

/// Next view state for an event, or `None` when the event is ignored.
///
/// Clicking the selected state or district again steps back out of it.
/// District clicks need a selected state; blank names are ignored.
pub fn next_view(current: &ViewState, event: &Event) -> Option<ViewState> {
    match event {
        Event::Reset => Some(ViewState::National),

        Event::ClickState(name) => {
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            match current.selected_state() {
                Some(selected) if selected == name => Some(ViewState::National),
                _ => Some(ViewState::state(name)),
            }
        }

        Event::ClickDistrict(name) => {
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            match current {
                ViewState::National => None,
                ViewState::State { state } => Some(ViewState::district(state.clone(), name)),
                ViewState::District { state, district } if district == name => {
                    Some(ViewState::state(state.clone()))
                }
                ViewState::District { state, .. } => Some(ViewState::district(state.clone(), name)),
            }
        }
    }
}

/// Owner of the current view state
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    view: ViewState,
}

impl Navigator {
    /// Start at the national view
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Apply an event; returns the new view state if the event was accepted
    pub fn apply(&mut self, event: &Event) -> Option<ViewState> {
        let next = next_view(&self.view, event)?;
        tracing::debug!(from = %self.view, to = %next, ?event, "View transition");
        self.view = next.clone();
        Some(next)
    }
}

/// Which geo breakdown fills the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableSource {
    /// The national per-state list, shared with the map
    National,
    /// Districts of one state
    Districts(String),
}

/// Fetches required to move from a committed snapshot to a target view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchPlan {
    /// Target view state
    pub view: ViewState,

    /// Scope for the KPI and trend requests
    pub scope: Scope,

    /// Whether the unscoped geo dataset behind the map is (re)loaded
    pub map: bool,

    /// Table reload, `None` to keep the base table
    pub table: Option<TableSource>,
}

impl FetchPlan {
    /// Plan the fetches for `target` given what `base` already holds.
    ///
    /// The map only reloads when entering the national view, or when the base
    /// has no map data at all. Entering a state always reloads its districts;
    /// selecting a district reuses the table when it already lists that state.
    pub fn between(base: &Snapshot, target: &ViewState) -> Self {
        let missing_map = base.map_data.is_empty();

        let (map, table) = match target {
            ViewState::National => (true, Some(TableSource::National)),
            ViewState::State { state } => (missing_map, Some(TableSource::Districts(state.clone()))),
            ViewState::District { state, .. } => {
                let table = if base.table_scope.as_deref() == Some(state.as_str()) {
                    None
                } else {
                    Some(TableSource::Districts(state.clone()))
                };
                (missing_map, table)
            }
        };

        Self {
            view: target.clone(),
            scope: target.scope(),
            map,
            table,
        }
    }

    /// Whether any geo request is part of the plan
    pub fn fetches_geo(&self) -> bool {
        self.map || self.table.is_some()
    }

    /// Data sources this plan touches
    pub fn sources(&self) -> Vec<DataSource> {
        let mut sources = vec![DataSource::Kpi, DataSource::Trends];
        if self.fetches_geo() {
            sources.push(DataSource::Geo);
        }
        sources
    }
}
