//! Snapshot command implementation

use crate::cli::SnapshotArgs;
use crate::output::OutputWriter;
use crate::output_types::{AgeRow, RegionRow, SnapshotOutput, TrendRow};
use anyhow::Result;
use geodrill_core::models::{DataSource, KpiBlock, Snapshot};
use geodrill_geo::format_count;
use geodrill_nav::Event;

use super::Dashboard;

pub async fn execute(args: &SnapshotArgs, mut dashboard: Dashboard, output: &OutputWriter) -> Result<()> {
    dashboard.start().await;

    if let Some(state) = &args.state {
        if dashboard.click_map(state).await.is_none() {
            output.warning(format!("Ignoring state '{}'", state));
        }
    }

    if let Some(district) = &args.district {
        let event = Event::ClickDistrict(district.clone());
        if dashboard.navigate(event).await.is_none() {
            output.warning(format!("Ignoring district '{}'", district));
        }
    }

    render(&dashboard.snapshot(), output)
}

/// Print a committed snapshot
pub fn render(snapshot: &Snapshot, output: &OutputWriter) -> Result<()> {
    if output.is_json() {
        return output.result(SnapshotOutput::new(snapshot));
    }

    output.section(&snapshot.view);
    for source in &snapshot.degraded {
        output.warning(degraded_message(*source));
    }

    for (label, value) in kpi_lines(&snapshot.kpi) {
        output.kv(label, value);
    }

    output.section("Enrolment Trends");
    output.table(snapshot.trends.iter().map(TrendRow::from).collect());

    output.section("Age Distribution");
    output.table(snapshot.age_bands.iter().map(AgeRow::from).collect());

    output.section(snapshot.table_title());
    output.table(RegionRow::from_regions(&snapshot.table_data));

    Ok(())
}

/// Headline metrics as display label and formatted value
pub fn kpi_lines(kpi: &KpiBlock) -> Vec<(&'static str, String)> {
    vec![
        ("Total Enrolments", format_count(kpi.total_enrolments)),
        ("Total Updates", format_count(kpi.total_updates)),
        ("Operational Ratio", format!("{:.2}", kpi.operational_ratio)),
        ("Data Quality Index", format!("{}%", kpi.data_quality_index)),
    ]
}

fn degraded_message(source: DataSource) -> String {
    let part = match source {
        DataSource::Kpi => "Headline metrics",
        DataSource::Trends => "Trend and age data",
        DataSource::Geo => "Regional breakdown",
    };
    format!("{} unavailable; showing empty values", part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpi_lines_formatting() {
        let kpi = KpiBlock {
            total_enrolments: 1_234_567,
            total_updates: 89,
            operational_ratio: 0.3,
            data_quality_index: 98.5,
        };

        let lines = kpi_lines(&kpi);
        assert_eq!(lines[0], ("Total Enrolments", "1,234,567".to_string()));
        assert_eq!(lines[1].1, "89");
        assert_eq!(lines[2].1, "0.30");
        assert_eq!(lines[3].1, "98.5%");
    }

    #[test]
    fn test_zeroed_kpi_still_renders() {
        let lines = kpi_lines(&KpiBlock::default());
        assert_eq!(lines[0].1, "0");
        assert_eq!(lines[2].1, "0.00");
        assert_eq!(lines[3].1, "0%");
    }

    #[test]
    fn test_degraded_message_names_the_part() {
        assert!(degraded_message(DataSource::Kpi).starts_with("Headline metrics"));
        assert!(degraded_message(DataSource::Geo).contains("unavailable"));
    }
}
