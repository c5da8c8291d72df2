//! Port definitions for the stats backend

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{KpiBlock, Region, Scope, TrendReport};

/// Port for the read-only statistics backend.
///
/// Each method maps to one endpoint and may fail independently of the others.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Headline metrics for a scope
    async fn kpi(&self, scope: &Scope) -> Result<KpiBlock>;

    /// Per-region values: states when `state` is `None`, otherwise that state's districts
    async fn geo(&self, state: Option<&str>) -> Result<Vec<Region>>;

    /// Daily series and age bands for a scope
    async fn trends(&self, scope: &Scope) -> Result<TrendReport>;
}

#[async_trait]
impl<T: StatsSource + ?Sized> StatsSource for std::sync::Arc<T> {
    async fn kpi(&self, scope: &Scope) -> Result<KpiBlock> {
        (**self).kpi(scope).await
    }

    async fn geo(&self, state: Option<&str>) -> Result<Vec<Region>> {
        (**self).geo(state).await
    }

    async fn trends(&self, scope: &Scope) -> Result<TrendReport> {
        (**self).trends(scope).await
    }
}
