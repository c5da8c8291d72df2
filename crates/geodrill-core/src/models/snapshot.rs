use serde::{Deserialize, Serialize};
use std::fmt;

use super::region::Region;
use super::stats::{AgeBand, KpiBlock, TrendPoint};
use super::view::ViewState;

/// One independently failable stats endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Kpi,
    Trends,
    Geo,
}

impl DataSource {
    /// Endpoint path relative to the API base, with the trailing slash the backend expects
    pub fn path(&self) -> &'static str {
        match self {
            DataSource::Kpi => "stats/kpi/",
            DataSource::Trends => "stats/trends/",
            DataSource::Geo => "stats/geo/",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Kpi => write!(f, "KPI"),
            DataSource::Trends => write!(f, "trends"),
            DataSource::Geo => write!(f, "geo"),
        }
    }
}

/// Everything the presentation layer needs for one view state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// View state the data was loaded for
    pub view: ViewState,

    pub kpi: KpiBlock,

    pub trends: Vec<TrendPoint>,

    pub age_bands: Vec<AgeBand>,

    /// National per-state values driving the choropleth
    pub map_data: Vec<Region>,

    /// Rows of the breakdown table
    pub table_data: Vec<Region>,

    /// State whose districts fill the table; `None` for the national state list
    pub table_scope: Option<String>,

    /// Sources that failed or timed out while building this snapshot
    pub degraded: Vec<DataSource>,
}

impl Snapshot {
    /// Zero/empty snapshot for a view state
    pub fn empty(view: ViewState) -> Self {
        Self {
            view,
            kpi: KpiBlock::default(),
            trends: Vec::new(),
            age_bands: Vec::new(),
            map_data: Vec::new(),
            table_data: Vec::new(),
            table_scope: None,
            degraded: Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }

    pub fn table_title(&self) -> String {
        match &self.table_scope {
            Some(state) => format!("DISTRICTS OF {}", state),
            None => "TOP PERFORMING STATES".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::empty(ViewState::state("Goa"));
        assert!(snapshot.kpi.is_zero());
        assert!(snapshot.map_data.is_empty());
        assert!(!snapshot.is_degraded());
        assert_eq!(snapshot.view.selected_state(), Some("Goa"));
    }

    #[test]
    fn test_table_title() {
        let mut snapshot = Snapshot::empty(ViewState::National);
        assert_eq!(snapshot.table_title(), "TOP PERFORMING STATES");
        snapshot.table_scope = Some("Maharashtra".to_string());
        assert_eq!(snapshot.table_title(), "DISTRICTS OF Maharashtra");
    }

    #[test]
    fn test_data_source_paths() {
        assert_eq!(DataSource::Kpi.path(), "stats/kpi/");
        assert_eq!(DataSource::Geo.path(), "stats/geo/");
        assert_eq!(DataSource::Trends.path(), "stats/trends/");
    }
}
