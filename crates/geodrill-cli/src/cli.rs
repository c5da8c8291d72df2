use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Geodrill - Regional statistics drill-down
#[derive(Parser, Debug)]
#[command(name = "geodrill")]
#[command(about = "Drill from national to state to district statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./geodrill.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// REST base URL of the stats backend
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Name mapping file (JSON object or TOML [names] table)
    #[arg(long, global = true, value_name = "FILE")]
    pub name_map: Option<PathBuf>,

    /// Serve stats from a JSON fixture instead of the REST backend
    #[arg(long, global = true, value_name = "FILE")]
    pub fixture: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and print one dashboard snapshot
    Snapshot(SnapshotArgs),

    /// Interactive drill-down session
    Explore,

    /// Colour boundary geometry with the current map data
    Map(MapArgs),

    /// Inspect the name reconciliation table
    Names(NamesArgs),

    /// Show the resolved configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct SnapshotArgs {
    /// State to drill into
    #[arg(long)]
    pub state: Option<String>,

    /// District within --state
    #[arg(long, requires = "state")]
    pub district: Option<String>,
}

#[derive(Parser, Debug)]
pub struct MapArgs {
    /// GeoJSON boundary file
    #[arg(long, value_name = "FILE")]
    pub geometry: PathBuf,

    /// Highlight this state (map labels and aliases accepted)
    #[arg(long)]
    pub state: Option<String>,
}

#[derive(Parser, Debug)]
pub struct NamesArgs {
    #[command(subcommand)]
    pub command: NamesCommand,
}

#[derive(Subcommand, Debug)]
pub enum NamesCommand {
    /// Verify every mapping target is a canonical name
    Check,

    /// Show the canonical name for a geometry label
    Resolve {
        /// Label as it appears in the geometry
        label: String,
    },
}
