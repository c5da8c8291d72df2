//! Geodrill Geo - Name reconciliation and choropleth colouring
//!
//! This crate turns geometry labels into canonical region names, resolves
//! each rendered region to its value, and assigns quantile-bucketed colours.

pub mod labels;
pub mod quantile;
pub mod reconcile;
pub mod resolver;

pub use quantile::QuantileScale;
pub use reconcile::NameTable;
pub use resolver::{format_count, GeoValueResolver, LegendEntry, Palette, RenderedRegion};
