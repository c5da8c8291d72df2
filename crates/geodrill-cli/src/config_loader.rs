//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use geodrill_core::config::{CliConfigOverrides, LayeredConfig};
use geodrill_geo::{GeoValueResolver, NameTable, Palette};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::output::OutputWriter;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "geodrill.toml";

/// Load layered configuration: defaults, file, environment, then CLI flags
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_path(cli.config.as_deref()) {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        api_base: cli.api_base.clone(),
        timeout_ms: cli.timeout_ms,
        name_map: cli.name_map.clone(),
    })?;

    Ok(config)
}

/// An explicit path must exist; the implicit one is optional
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
            implicit.is_file().then_some(implicit)
        }
    }
}

/// Configured name table, or the built-in one
pub fn load_names(config: &LayeredConfig) -> Result<NameTable> {
    Ok(match &config.name_map.value {
        Some(path) => NameTable::from_path(path)?,
        None => NameTable::builtin(),
    })
}

/// Build the resolver from the configured name table.
///
/// An open table still loads; each defect is reported as a warning.
pub fn load_resolver(config: &LayeredConfig, output: &OutputWriter) -> Result<GeoValueResolver> {
    let names = load_names(config)?;

    let defects = names.closure_defects();
    for (raw, target) in &defects {
        tracing::warn!(raw = %raw, target = %target, "Name mapping target is not canonical");
    }
    if !defects.is_empty() {
        output.warning(format!(
            "{} name mapping(s) do not end on a canonical name; run 'geodrill names check'",
            defects.len()
        ));
    }

    Ok(GeoValueResolver::new(names, Palette::default()))
}
