//! In-memory stats source for development and testing.

use async_trait::async_trait;
use geodrill_core::error::{GeodrillError, Result};
use geodrill_core::models::{DataSource, KpiBlock, Region, Scope, TrendReport};
use geodrill_core::ports::StatsSource;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Stats for one KPI/trend scope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeStats {
    pub kpi: KpiBlock,
    pub trends: TrendReport,
}

/// Fixture data for one state: its own stats, its district breakdown, and per-district stats
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateFixture {
    #[serde(flatten)]
    pub stats: ScopeStats,

    /// District rows returned by the geo endpoint for this state
    pub geo: Vec<Region>,

    pub districts: BTreeMap<String, ScopeStats>,
}

/// Complete fixture document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixture {
    #[serde(flatten)]
    pub national: ScopeStats,

    /// State rows returned by the unscoped geo endpoint
    pub geo: Vec<Region>,

    pub states: BTreeMap<String, StateFixture>,
}

impl Fixture {
    /// Load a fixture from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            GeodrillError::Serialization(format!(
                "Failed to parse fixture {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// State entry by name, ignoring ASCII case like the backend's filters do
    fn state(&self, name: &str) -> Option<&StateFixture> {
        self.states
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, state)| state)
    }

    fn scope_stats(&self, scope: &Scope) -> Option<&ScopeStats> {
        match (scope.state.as_deref(), scope.district.as_deref()) {
            (None, _) => Some(&self.national),
            (Some(state), None) => self.state(state).map(|s| &s.stats),
            (Some(state), Some(district)) => self.state(state).and_then(|s| {
                s.districts
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(district))
                    .map(|(_, stats)| stats)
            }),
        }
    }
}

/// One request served by a `MemoryStatsSource`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub source: DataSource,
    pub scope: Scope,
}

/// Fixture-backed implementation of `StatsSource`
#[derive(Debug, Clone, Default)]
pub struct MemoryStatsSource {
    fixture: Arc<Fixture>,
    failing: Arc<RwLock<HashSet<DataSource>>>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
    latency: Duration,
    state_latency: HashMap<String, Duration>,
}

impl MemoryStatsSource {
    /// Create a new in-memory source
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture: Arc::new(fixture),
            ..Self::default()
        }
    }

    /// Delay every request
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Delay requests scoped to one state (replaces the global latency for them)
    pub fn with_state_latency(mut self, state: impl Into<String>, latency: Duration) -> Self {
        self.state_latency.insert(state.into(), latency);
        self
    }

    /// Make every request to `source` fail until cleared
    pub fn set_failing(&self, source: DataSource, failing: bool) {
        let mut set = self.failing.write().unwrap();
        if failing {
            set.insert(source);
        } else {
            set.remove(&source);
        }
    }

    /// Requests served so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().unwrap().clone()
    }

    /// Number of requests served for one source
    pub fn request_count(&self, source: DataSource) -> usize {
        self.requests.read().unwrap().iter().filter(|r| r.source == source).count()
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    async fn serve(&self, source: DataSource, scope: Scope) -> Result<()> {
        let delay = scope
            .state
            .as_ref()
            .and_then(|state| self.state_latency.get(state))
            .copied()
            .unwrap_or(self.latency);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.requests.write().unwrap().push(RecordedRequest { source, scope });

        if self.failing.read().unwrap().contains(&source) {
            return Err(GeodrillError::Fetch {
                endpoint: source,
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl StatsSource for MemoryStatsSource {
    async fn kpi(&self, scope: &Scope) -> Result<KpiBlock> {
        self.serve(DataSource::Kpi, scope.clone()).await?;
        Ok(self.fixture.scope_stats(scope).map(|s| s.kpi.clone()).unwrap_or_default())
    }

    async fn geo(&self, state: Option<&str>) -> Result<Vec<Region>> {
        let scope = Scope {
            state: state.map(str::to_string),
            district: None,
        };
        self.serve(DataSource::Geo, scope).await?;

        Ok(match state {
            None => self.fixture.geo.clone(),
            Some(state) => self.fixture.state(state).map(|s| s.geo.clone()).unwrap_or_default(),
        })
    }

    async fn trends(&self, scope: &Scope) -> Result<TrendReport> {
        self.serve(DataSource::Trends, scope.clone()).await?;
        Ok(self.fixture.scope_stats(scope).map(|s| s.trends.clone()).unwrap_or_default())
    }
}
