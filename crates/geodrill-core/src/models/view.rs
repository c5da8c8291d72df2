use serde::{Deserialize, Serialize};
use std::fmt;

use super::region::Level;

/// The drill-down cursor.
///
/// A district can only be selected together with its parent state, so the
/// "district without state" combination has no representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    National,
    State {
        state: String,
    },
    District {
        state: String,
        district: String,
    },
}

impl ViewState {
    pub fn national() -> Self {
        ViewState::National
    }

    pub fn state(state: impl Into<String>) -> Self {
        ViewState::State {
            state: state.into(),
        }
    }

    pub fn district(state: impl Into<String>, district: impl Into<String>) -> Self {
        ViewState::District {
            state: state.into(),
            district: district.into(),
        }
    }

    pub fn selected_state(&self) -> Option<&str> {
        match self {
            ViewState::National => None,
            ViewState::State { state } | ViewState::District { state, .. } => Some(state),
        }
    }

    pub fn selected_district(&self) -> Option<&str> {
        match self {
            ViewState::District { district, .. } => Some(district),
            _ => None,
        }
    }

    pub fn level(&self) -> Level {
        match self {
            ViewState::National => Level::National,
            ViewState::State { .. } => Level::State,
            ViewState::District { .. } => Level::District,
        }
    }

    /// Query scope for the KPI and trend endpoints
    pub fn scope(&self) -> Scope {
        Scope {
            state: self.selected_state().map(str::to_string),
            district: self.selected_district().map(str::to_string),
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::National => write!(f, "National Overview"),
            ViewState::State { state } => write!(f, "Regional View: {}", state),
            ViewState::District { state, district } => write!(f, "{} > {}", state, district),
        }
    }
}

/// Query parameters shared by the stats endpoints. Omitted fields mean unscoped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}

impl Scope {
    pub fn national() -> Self {
        Self::default()
    }

    /// Key/value pairs for the present parameters, in request order
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(state) = self.state.as_deref() {
            pairs.push(("state", state));
        }
        if let Some(district) = self.district.as_deref() {
            pairs.push(("district", district));
        }
        pairs
    }
}
