use async_trait::async_trait;
use geodrill_core::config::LayeredConfig;
use geodrill_core::error::{GeodrillError, Result};
use geodrill_core::models::{DataSource, KpiBlock, Region, Scope, TrendReport};
use geodrill_core::ports::StatsSource;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// REST adapter for the stats backend
pub struct HttpStatsSource {
    /// Base URL without trailing slash (e.g., "http://127.0.0.1:8000/api/v1")
    base_url: String,

    /// Per-request timeout, also reported in timeout errors
    timeout: Duration,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpStatsSource {
    /// Create a new adapter with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            GeodrillError::ConfigInvalid {
                key: "http_client".to_string(),
                reason: format!("Failed to build HTTP client: {}", e),
            }
        })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client,
        })
    }

    /// Create from resolved configuration
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        Self::new(config.api_base.value.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, source: DataSource) -> String {
        format!("{}/{}", self.base_url, source.path())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        source: DataSource,
        params: &[(&'static str, &str)],
    ) -> Result<T> {
        let url = self.endpoint_url(source);
        tracing::debug!(endpoint = %source, url = %url, ?params, "GET");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.transport_error(source, e))?;

        if !response.status().is_success() {
            return Err(GeodrillError::HttpStatus {
                endpoint: source,
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(source, e))?;

        serde_json::from_slice(&body).map_err(|e| GeodrillError::Decode {
            endpoint: source,
            reason: e.to_string(),
        })
    }

    fn transport_error(&self, source: DataSource, err: reqwest::Error) -> GeodrillError {
        if err.is_timeout() {
            GeodrillError::Timeout {
                endpoint: source,
                millis: self.timeout.as_millis() as u64,
            }
        } else {
            GeodrillError::Fetch {
                endpoint: source,
                reason: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn kpi(&self, scope: &Scope) -> Result<KpiBlock> {
        self.get_json(DataSource::Kpi, &scope.query_pairs()).await
    }

    async fn geo(&self, state: Option<&str>) -> Result<Vec<Region>> {
        let params: Vec<(&'static str, &str)> = state.map(|s| ("state", s)).into_iter().collect();
        // The backend may answer `null` for an empty breakdown
        let regions: Option<Vec<Region>> = self.get_json(DataSource::Geo, &params).await?;
        Ok(regions.unwrap_or_default())
    }

    async fn trends(&self, scope: &Scope) -> Result<TrendReport> {
        self.get_json(DataSource::Trends, &scope.query_pairs()).await
    }
}
