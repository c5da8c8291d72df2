//! Geodrill Nav - Drill-down navigation and snapshot aggregation
//!
//! The navigator decides the next view state, the aggregator loads the data
//! for it, and the controller ties both together with tagged requests so that
//! late responses never overwrite a newer view.

pub mod aggregator;
pub mod controller;
pub mod navigator;

pub use aggregator::Aggregator;
pub use controller::{CommitOutcome, DrillDown, RequestTag, Ticket};
pub use navigator::{next_view, Event, FetchPlan, Navigator, TableSource};
