//! Forecast-vs-actual charts for oilfield well production.
//!
//! The crate computes bounded relative errors between actual and forecast
//! production series ([`metrics::relative_error`]) and assembles
//! renderer-agnostic [`Figure`]s from per-model tables:
//!
//! * [`well_plot`] – one well, every model, rate and error panels
//! * [`error_histogram`] – distribution of per-well mean error
//! * [`wells_bar_chart`] – per-well mean error, sorted
//! * [`performance_plot`] – field totals per model with error
//! * [`statistics_plot`] – mean / std of cumulative and daily error
//!
//! ```rust
//! use oilfield_charts::{well_plot, Models, PlotContext, ProductionMode, Table};
//!
//! let table = Table::new(vec!["2021-01".into(), "2021-02".into()])
//!     .with_column("17_oil_true", vec![100.0, 100.0])?
//!     .with_column("17_oil_pred", vec![150.0, 50.0])?;
//! let datasets = Models::new().with("crm", table);
//!
//! let fig = well_plot(&PlotContext::new("North"), &datasets, "17", ProductionMode::Oil);
//! assert_eq!(fig.traces.len(), 3);
//! # Ok::<(), oilfield_charts::TableError>(())
//! ```

pub mod color;
pub mod context;
pub mod data;
pub mod figure;
pub mod labels;
pub mod metrics;
pub mod plots;

pub use color::Palette;
pub use context::PlotContext;
pub use data::{Models, ProductionMode, Side, Table, TableError};
pub use figure::Figure;
pub use labels::Labels;
pub use plots::{
    error_histogram, performance_plot, statistics_plot, well_plot, wells_bar_chart,
    AggregatePerformance, ErrorStatistics,
};
