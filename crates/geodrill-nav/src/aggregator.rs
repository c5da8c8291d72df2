//! Snapshot aggregation
//!
//! Runs the planned fetches concurrently and merges whatever comes back.
//! Each source degrades on its own: a failure empties that source's part of
//! the snapshot and nothing else.

use geodrill_core::error::{GeodrillError, Result};
use geodrill_core::models::{DataSource, Region, Snapshot};
use geodrill_core::ports::StatsSource;
use std::future::Future;
use std::time::Duration;

use crate::navigator::{FetchPlan, TableSource};

/// Loads snapshots from a stats source
pub struct Aggregator<S> {
    source: S,
    timeout: Duration,
}

impl<S: StatsSource> Aggregator<S> {
    /// Create an aggregator; every request is bounded by `timeout`
    pub fn new(source: S, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Execute a fetch plan on top of a committed base snapshot
    pub async fn load_snapshot(&self, plan: &FetchPlan, base: &Snapshot) -> Snapshot {
        let scope = &plan.scope;
        let district_state = match &plan.table {
            Some(TableSource::Districts(state)) => Some(state.as_str()),
            _ => None,
        };
        // The national table shares the map's request
        let national_geo = plan.map || plan.table == Some(TableSource::National);

        let (kpi, trends, national, districts) = tokio::join!(
            self.bounded(DataSource::Kpi, self.source.kpi(scope)),
            self.bounded(DataSource::Trends, self.source.trends(scope)),
            async {
                if national_geo {
                    Some(self.bounded(DataSource::Geo, self.source.geo(None)).await)
                } else {
                    None
                }
            },
            async {
                match district_state {
                    Some(state) => Some(self.bounded(DataSource::Geo, self.source.geo(Some(state))).await),
                    None => None,
                }
            },
        );

        let mut snapshot = Snapshot::empty(plan.view.clone());

        match kpi {
            Ok(kpi) => snapshot.kpi = kpi,
            Err(e) => self.degrade(&mut snapshot, DataSource::Kpi, e),
        }

        match trends {
            Ok(report) => {
                snapshot.trends = report.trends;
                snapshot.age_bands = report.age_data;
            }
            Err(e) => self.degrade(&mut snapshot, DataSource::Trends, e),
        }

        let national: Option<Vec<Region>> = match national {
            Some(Ok(regions)) => Some(regions),
            Some(Err(e)) => {
                self.degrade(&mut snapshot, DataSource::Geo, e);
                Some(Vec::new())
            }
            None => None,
        };

        snapshot.map_data = if plan.map {
            national.clone().unwrap_or_default()
        } else {
            base.map_data.clone()
        };

        match &plan.table {
            Some(TableSource::National) => {
                snapshot.table_data = national.unwrap_or_default();
                snapshot.table_scope = None;
            }
            Some(TableSource::Districts(state)) => {
                snapshot.table_data = match districts {
                    Some(Ok(regions)) => regions,
                    Some(Err(e)) => {
                        self.degrade(&mut snapshot, DataSource::Geo, e);
                        Vec::new()
                    }
                    None => Vec::new(),
                };
                snapshot.table_scope = Some(state.clone());
            }
            None => {
                snapshot.table_data = base.table_data.clone();
                snapshot.table_scope = base.table_scope.clone();
            }
        }

        tracing::debug!(
            view = %snapshot.view,
            map_rows = snapshot.map_data.len(),
            table_rows = snapshot.table_data.len(),
            trend_points = snapshot.trends.len(),
            degraded = ?snapshot.degraded,
            "Snapshot loaded"
        );

        snapshot
    }

    /// Await a request under the configured timeout
    async fn bounded<T, F>(&self, source: DataSource, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(GeodrillError::Timeout {
                endpoint: source,
                millis: self.timeout.as_millis() as u64,
            }),
        }
    }

    fn degrade(&self, snapshot: &mut Snapshot, source: DataSource, error: GeodrillError) {
        tracing::warn!(view = %snapshot.view, endpoint = %source, error = %error, "Fetch failed; showing empty data");
        if !snapshot.degraded.contains(&source) {
            snapshot.degraded.push(source);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::FetchPlan;
    use geodrill_core::models::{KpiBlock, Scope, TrendReport, ViewState};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that counts geo calls and never answers trends in time
    #[derive(Default)]
    struct SlowTrends {
        geo_calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl StatsSource for SlowTrends {
        async fn kpi(&self, _scope: &Scope) -> Result<KpiBlock> {
            Ok(KpiBlock {
                total_enrolments: 42,
                ..KpiBlock::default()
            })
        }

        async fn geo(&self, state: Option<&str>) -> Result<Vec<Region>> {
            self.geo_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Region::new(state.unwrap_or("Goa"), 7)])
        }

        async fn trends(&self, _scope: &Scope) -> Result<TrendReport> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(TrendReport::default())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_degrades_only_the_slow_source() {
        let aggregator = Aggregator::new(SlowTrends::default(), Duration::from_millis(50));
        let base = Snapshot::empty(ViewState::National);
        let plan = FetchPlan::between(&base, &ViewState::National);

        let snapshot = aggregator.load_snapshot(&plan, &base).await;

        assert_eq!(snapshot.kpi.total_enrolments, 42);
        assert!(snapshot.trends.is_empty());
        assert_eq!(snapshot.degraded, vec![DataSource::Trends]);
        assert_eq!(snapshot.map_data, vec![Region::new("Goa", 7)]);
        assert_eq!(snapshot.table_data, snapshot.map_data);
        // Map and national table share one request
        assert_eq!(aggregator.source().geo_calls.load(Ordering::SeqCst), 1);
    }

    /// Source whose KPI endpoint fails with an error that names no endpoint
    struct BrokenKpi;

    #[async_trait::async_trait]
    impl StatsSource for BrokenKpi {
        async fn kpi(&self, _scope: &Scope) -> Result<KpiBlock> {
            Err(GeodrillError::Io(std::io::Error::other("disk cache unreadable")))
        }

        async fn geo(&self, _state: Option<&str>) -> Result<Vec<Region>> {
            Ok(vec![Region::new("Goa", 7)])
        }

        async fn trends(&self, _scope: &Scope) -> Result<TrendReport> {
            Ok(TrendReport::default())
        }
    }

    #[tokio::test]
    async fn test_failure_is_recorded_against_the_failing_source() {
        let aggregator = Aggregator::new(BrokenKpi, Duration::from_millis(50));
        let base = Snapshot::empty(ViewState::National);
        let plan = FetchPlan::between(&base, &ViewState::National);

        let snapshot = aggregator.load_snapshot(&plan, &base).await;

        assert_eq!(snapshot.degraded, vec![DataSource::Kpi]);
        assert!(snapshot.kpi.is_zero());
        assert_eq!(snapshot.map_data, vec![Region::new("Goa", 7)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_map_bootstrap_and_district_table_run_together() {
        let aggregator = Aggregator::new(SlowTrends::default(), Duration::from_millis(50));
        let base = Snapshot::empty(ViewState::National);
        let plan = FetchPlan::between(&base, &ViewState::state("Kerala"));

        let snapshot = aggregator.load_snapshot(&plan, &base).await;

        assert_eq!(snapshot.map_data, vec![Region::new("Goa", 7)]);
        assert_eq!(snapshot.table_data, vec![Region::new("Kerala", 7)]);
        assert_eq!(snapshot.table_scope.as_deref(), Some("Kerala"));
        assert_eq!(aggregator.source().geo_calls.load(Ordering::SeqCst), 2);
    }
}
