/// Per-task, per-algorithm aggregation of evaluation returns
pub mod aggregate;

/// Task tables, palette and figure styling
pub mod config;

/// Error type shared by every stage
pub mod error;

/// Reading result stores from disk
pub mod loader;

/// Load, aggregate and render in one pass
pub mod pipeline;

/// Result records and the in-memory table
pub mod record;

/// Drawing figures
pub mod render;

/// CSV table of aggregated results
pub mod report;

/// Summary statistics
pub mod stats;

pub use aggregate::{aggregate, AlgorithmCurve, CurvePoint, TaskSummary};
pub use config::{PlotConfig, Style, TaskInfo};
pub use error::{Error, Result};
pub use pipeline::{run, RunOutput};
pub use record::{ResultRecord, ResultTable};
pub use stats::Summary;
