use geodrill_core::models::{AgeBand, Region, Snapshot, TrendPoint, ViewState};
use geodrill_geo::{format_count, LegendEntry, RenderedRegion};
use serde::Serialize;
use tabled::Tabled;

/// Output for snapshot and explore commands
#[derive(Debug, Serialize)]
pub struct SnapshotOutput<'a> {
    pub heading: String,
    pub table_title: String,
    #[serde(flatten)]
    pub snapshot: &'a Snapshot,
}

impl<'a> SnapshotOutput<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            heading: snapshot.view.to_string(),
            table_title: snapshot.table_title(),
            snapshot,
        }
    }
}

/// Output for map command
#[derive(Debug, Serialize)]
pub struct MapOutput {
    pub view: ViewState,
    pub regions: Vec<RenderedRegion>,
    pub legend: Vec<LegendEntry>,
}

/// Output for names check command
#[derive(Debug, Serialize)]
pub struct NamesCheckOutput {
    pub entries: usize,
    pub canonical_names: usize,
    pub defects: Vec<NameDefectRow>,
}

/// Output for names resolve command
#[derive(Debug, Serialize)]
pub struct ResolveOutput {
    pub label: String,
    pub canonical: String,
    pub is_canonical: bool,
}

#[derive(Debug, Serialize, Tabled)]
pub struct NameDefectRow {
    #[tabled(rename = "Label")]
    pub raw: String,
    #[tabled(rename = "Maps To")]
    pub target: String,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

#[derive(Tabled)]
pub struct RegionRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Records")]
    pub records: String,
}

impl RegionRow {
    /// Rows in dataset order, numbered from one
    pub fn from_regions(regions: &[Region]) -> Vec<Self> {
        regions
            .iter()
            .enumerate()
            .map(|(i, region)| Self {
                rank: i + 1,
                name: region.name.clone(),
                records: format_count(region.value),
            })
            .collect()
    }
}

#[derive(Tabled)]
pub struct TrendRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Enrolments")]
    pub enrolments: String,
    #[tabled(rename = "Updates")]
    pub updates: String,
    #[tabled(rename = "Biometric")]
    pub biometric: String,
    #[tabled(rename = "Demographic")]
    pub demographic: String,
}

impl From<&TrendPoint> for TrendRow {
    fn from(point: &TrendPoint) -> Self {
        Self {
            date: point.date.format("%Y-%m-%d").to_string(),
            enrolments: format_count(point.enrolments),
            updates: format_count(point.total_updates()),
            biometric: format_count(point.biometric_updates),
            demographic: format_count(point.demographic_updates),
        }
    }
}

#[derive(Tabled)]
pub struct AgeRow {
    #[tabled(rename = "Age")]
    pub range: String,
    #[tabled(rename = "Count")]
    pub count: String,
}

impl From<&AgeBand> for AgeRow {
    fn from(band: &AgeBand) -> Self {
        Self {
            range: band.range.clone(),
            count: format_count(band.count),
        }
    }
}

#[derive(Tabled)]
pub struct MapRow {
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Region")]
    pub tooltip: String,
    #[tabled(rename = "Fill")]
    pub fill: String,
    #[tabled(rename = "Selected")]
    pub selected: String,
}

impl From<&RenderedRegion> for MapRow {
    fn from(region: &RenderedRegion) -> Self {
        Self {
            label: region.label.clone(),
            tooltip: region.tooltip(),
            fill: region.fill.clone(),
            selected: if region.selected { "●" } else { "" }.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct LegendRow {
    #[tabled(rename = "From")]
    pub from: String,
    #[tabled(rename = "Fill")]
    pub fill: String,
}

impl From<&LegendEntry> for LegendRow {
    fn from(entry: &LegendEntry) -> Self {
        Self {
            from: format_count(entry.from.round() as u64),
            fill: entry.fill.clone(),
        }
    }
}
