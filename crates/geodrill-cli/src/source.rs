use anyhow::{Context, Result};
use geodrill_client::{Fixture, HttpStatsSource, MemoryStatsSource};
use geodrill_core::config::LayeredConfig;
use geodrill_core::ports::StatsSource;
use std::path::Path;
use std::sync::Arc;

/// Pick the stats backend: a fixture when given, the REST API otherwise
pub fn open(config: &LayeredConfig, fixture: Option<&Path>) -> Result<Arc<dyn StatsSource>> {
    match fixture {
        Some(path) => {
            let fixture = Fixture::from_path(path)
                .with_context(|| format!("Failed to load fixture {}", path.display()))?;
            tracing::info!(fixture = %path.display(), "Using in-memory stats source");
            Ok(Arc::new(MemoryStatsSource::new(fixture)))
        }
        None => {
            let source = HttpStatsSource::from_config(config)?;
            tracing::info!(
                api_base = %source.base_url(),
                timeout_ms = config.timeout_ms.value,
                "Using REST stats source"
            );
            Ok(Arc::new(source))
        }
    }
}
