//! Derived views over parsed sale points.
//!
//! [`degrade`] keeps the most recent price per fuel for each station, and
//! [`aggregate`] folds those snapshots into per-department metrics with a
//! national `"total"` rollup. [`LatestSnapshot`] is the compact JSON shape of
//! the degraded list consumed by the map front-end.

pub mod department;
pub mod error;
pub mod latest;
pub mod metrics;
pub mod snapshot;

pub use department::Department;
pub use error::ReportError;
pub use latest::LatestSnapshot;
pub use metrics::{aggregate, FuelBreakdown, FuelMetrics, MetricsReport, TOTAL_KEY};
pub use snapshot::{degrade, latest_observation, DegradedSalePoint};
