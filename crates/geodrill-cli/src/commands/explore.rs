//! Explore command implementation

use crate::interactive::{choose_next, Choice};
use crate::output::OutputWriter;
use anyhow::Result;
use geodrill_nav::{CommitOutcome, Event};

use super::snapshot::render;
use super::Dashboard;

pub async fn execute(mut dashboard: Dashboard, output: &OutputWriter) -> Result<()> {
    dashboard.start().await;

    loop {
        let snapshot = dashboard.snapshot();
        render(&snapshot, output)?;

        let outcome = match choose_next(&snapshot)? {
            Choice::Row(name) => dashboard.click_table_row(&name).await,
            Choice::MapLabel(label) => dashboard.click_map(&label).await,
            Choice::Reset => dashboard.navigate(Event::Reset).await,
            Choice::Quit => break,
        };

        match outcome {
            None => output.info("Nothing to drill into here"),
            Some(CommitOutcome::Discarded) => tracing::debug!("Superseded snapshot dropped"),
            Some(CommitOutcome::Applied) => {}
        }
    }

    Ok(())
}
