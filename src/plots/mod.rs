//! Chart builders. Each takes prepared tables plus a [`PlotContext`] and
//! returns a [`Figure`](crate::figure::Figure); none of them fail.
//!
//! [`PlotContext`]: crate::context::PlotContext
pub mod distribution;
pub mod performance;
pub mod statistics;
pub mod well;

pub use distribution::{error_histogram, sorted_well_means, well_means, wells_bar_chart};
pub use performance::{performance_plot, AggregatePerformance};
pub use statistics::{statistics_plot, ErrorStatistics};
pub use well::well_plot;
