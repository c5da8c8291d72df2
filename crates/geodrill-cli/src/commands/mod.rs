//! Command implementations

mod config;
mod explore;
mod map;
mod names;
mod snapshot;

use crate::cli::{Cli, Commands};
use crate::config_loader::{load_config, load_resolver};
use crate::output::OutputWriter;
use crate::source;
use anyhow::Result;
use geodrill_core::config::LayeredConfig;
use geodrill_core::ports::StatsSource;
use geodrill_nav::DrillDown;
use std::sync::Arc;

/// Controller over whichever backend the flags select
pub type Dashboard = DrillDown<Arc<dyn StatsSource>>;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Snapshot(args) => {
            let dashboard = dashboard(&cli, &config, &output)?;
            snapshot::execute(args, dashboard, &output).await
        }
        Commands::Explore => {
            let dashboard = dashboard(&cli, &config, &output)?;
            explore::execute(dashboard, &output).await
        }
        Commands::Map(args) => {
            let dashboard = dashboard(&cli, &config, &output)?;
            map::execute(args, dashboard, &output).await
        }
        Commands::Names(args) => names::execute(args, &config, &output),
        Commands::Config => config::execute(&config, &output),
    }
}

fn dashboard(cli: &Cli, config: &LayeredConfig, output: &OutputWriter) -> Result<Dashboard> {
    let resolver = load_resolver(config, output)?;
    let source = source::open(config, cli.fixture.as_deref())?;
    Ok(DrillDown::new(source, resolver, config.timeout()))
}
