//! Geo value resolver
//!
//! Joins geometry labels with the regional dataset and decides each region's fill.

use geodrill_core::models::Region;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::quantile::QuantileScale;
use crate::reconcile::NameTable;

/// Fill colours used by the choropleth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Ordered from the lowest to the highest quantile
    pub buckets: Vec<String>,

    /// Fill of the currently selected region, regardless of value
    pub selected: String,

    /// Fill of regions without data
    pub no_data: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            buckets: [
                "#fef9c3", "#fde047", "#facc15", "#eab308", "#ca8a04", "#ea580c", "#dc2626",
                "#991b1b", "#7f1d1d",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            selected: "#1e293b".to_string(),
            no_data: "#fffbeb".to_string(),
        }
    }
}

/// A geometry ready to paint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedRegion {
    /// Label as found in the geometry source
    pub label: String,

    /// Canonical name the label resolved to
    pub name: String,

    /// Dataset value, zero when the region has no entry
    pub value: u64,

    pub fill: String,

    pub selected: bool,
}

impl RenderedRegion {
    pub fn tooltip(&self) -> String {
        format!("{}: {} records", self.name, format_count(self.value))
    }
}

/// Lower bound and fill of one quantile class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub from: f64,
    pub fill: String,
}

/// Resolves geometry labels to values and fills
#[derive(Debug, Clone)]
pub struct GeoValueResolver {
    names: NameTable,
    palette: Palette,
}

impl GeoValueResolver {
    pub fn new(names: NameTable, palette: Palette) -> Self {
        Self { names, palette }
    }

    /// Resolver over the built-in state table and default palette
    pub fn builtin() -> Self {
        Self::new(NameTable::builtin(), Palette::default())
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Canonical name for a clicked geometry label
    pub fn canonical_click<'a>(&'a self, label: &'a str) -> &'a str {
        self.names.resolve(label)
    }

    /// Quantile scale over the dataset's positive values
    pub fn scale_for(&self, dataset: &[Region]) -> QuantileScale {
        QuantileScale::new(dataset.iter().map(|r| r.value as f64), self.palette.buckets.len())
    }

    /// Resolve every label to a value and fill.
    ///
    /// `selected` is the canonical name of the selected region, if any.
    pub fn resolve_values<S: AsRef<str>>(
        &self,
        labels: &[S],
        dataset: &[Region],
        selected: Option<&str>,
    ) -> Vec<RenderedRegion> {
        let values = index_dataset(dataset);
        let scale = self.scale_for(dataset);
        let selected = selected.map(|s| self.names.resolve(s));

        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                let name = self.names.resolve(label);
                let value = values.get(name).copied().unwrap_or(0);
                let is_selected = selected == Some(name);

                let fill = if is_selected {
                    self.palette.selected.clone()
                } else if value > 0 {
                    self.bucket_fill(scale.bucket(value as f64))
                } else {
                    self.palette.no_data.clone()
                };

                RenderedRegion {
                    label: label.to_string(),
                    name: name.to_string(),
                    value,
                    fill,
                    selected: is_selected,
                }
            })
            .collect()
    }

    /// Class boundaries and fills for a dataset, lowest first
    pub fn legend(&self, dataset: &[Region]) -> Vec<LegendEntry> {
        let scale = self.scale_for(dataset);
        let lowest = scale.domain().first().copied().unwrap_or(0.0);

        std::iter::once(lowest)
            .chain(scale.thresholds().iter().copied())
            .enumerate()
            .map(|(i, from)| LegendEntry {
                from,
                fill: self.bucket_fill(i),
            })
            .collect()
    }

    fn bucket_fill(&self, bucket: usize) -> String {
        self.palette
            .buckets
            .get(bucket)
            .or_else(|| self.palette.buckets.last())
            .cloned()
            .unwrap_or_else(|| self.palette.no_data.clone())
    }
}

/// Name -> value index; the first entry wins when a name repeats.
fn index_dataset(dataset: &[Region]) -> HashMap<&str, u64> {
    let mut values = HashMap::with_capacity(dataset.len());
    for region in dataset {
        if values.contains_key(region.name.as_str()) {
            tracing::warn!(region = %region.name, "Duplicate region in dataset; keeping first value");
            continue;
        }
        values.insert(region.name.as_str(), region.value);
    }
    values
}

/// Format a count with comma thousands separators
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
