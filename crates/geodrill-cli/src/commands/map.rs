//! Map command implementation

use crate::cli::MapArgs;
use crate::output::OutputWriter;
use crate::output_types::{LegendRow, MapOutput, MapRow};
use anyhow::Result;
use geodrill_geo::labels::read_labels;

use super::Dashboard;

pub async fn execute(args: &MapArgs, mut dashboard: Dashboard, output: &OutputWriter) -> Result<()> {
    let labels = read_labels(&args.geometry)?;
    tracing::debug!(geometry = %args.geometry.display(), labels = labels.len(), "Geometry loaded");

    dashboard.start().await;
    if let Some(state) = &args.state {
        if dashboard.click_map(state).await.is_none() {
            output.warning(format!("Ignoring state '{}'", state));
        }
    }

    let snapshot = dashboard.snapshot();
    let regions = dashboard.render_map(labels.as_slice());
    let legend = dashboard.resolver().legend(&snapshot.map_data);

    if output.is_json() {
        return output.result(MapOutput {
            view: snapshot.view.clone(),
            regions,
            legend,
        });
    }

    output.section(&snapshot.view);
    for source in &snapshot.degraded {
        output.warning(format!("{} data unavailable", source));
    }
    output.table(regions.iter().map(MapRow::from).collect());

    let without_data = regions.iter().filter(|r| r.value == 0).count();
    if without_data > 0 {
        output.info(format!("{} of {} regions have no data", without_data, regions.len()));
    }

    output.section("Legend");
    output.table(legend.iter().map(LegendRow::from).collect());

    Ok(())
}
