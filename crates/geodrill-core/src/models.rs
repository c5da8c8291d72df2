pub mod region;
pub mod snapshot;
pub mod stats;
pub mod view;

pub use region::{Level, Region};
pub use snapshot::{DataSource, Snapshot};
pub use stats::{AgeBand, KpiBlock, TrendPoint, TrendReport};
pub use view::{Scope, ViewState};
