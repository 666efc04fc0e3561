use crate::context::PlotContext;
use crate::data::{Models, Table};
use crate::figure::{DrawMode, Figure, Scatter, Subplots, Title};
use crate::labels::fill;

pub const MEAN_CUMULATIVE_COLUMN: &str = "mean_cumulative";
pub const STD_CUMULATIVE_COLUMN: &str = "std_cumulative";
pub const MEAN_DAILY_COLUMN: &str = "mean_daily";
pub const STD_DAILY_COLUMN: &str = "std_daily";

/// Per-period error statistics of one model across all wells.
#[derive(Debug, Clone, Default)]
pub struct ErrorStatistics {
    pub mean_cumulative: Vec<f64>,
    pub std_cumulative: Vec<f64>,
    pub mean_daily: Vec<f64>,
    pub std_daily: Vec<f64>,
}

impl ErrorStatistics {
    /// Read the four statistic columns; `None` if any is missing.
    pub fn from_table(table: &Table) -> Option<Self> {
        Some(Self {
            mean_cumulative: table.column(MEAN_CUMULATIVE_COLUMN)?.to_vec(),
            std_cumulative: table.column(STD_CUMULATIVE_COLUMN)?.to_vec(),
            mean_daily: table.column(MEAN_DAILY_COLUMN)?.to_vec(),
            std_daily: table.column(STD_DAILY_COLUMN)?.to_vec(),
        })
    }

    fn series(&self) -> [&[f64]; 4] {
        [
            &self.mean_cumulative,
            &self.std_cumulative,
            &self.mean_daily,
            &self.std_daily,
        ]
    }
}

/// Four stacked panels of error statistics against `dates`, one line per
/// model on each. Only the top panel's trace is named after the model.
pub fn statistics_plot(
    ctx: &PlotContext,
    statistics: &Models<ErrorStatistics>,
    dates: &[String],
) -> Figure {
    let labels = &ctx.labels;
    let mut fig = Subplots::new(4, 1)
        .shared_xaxes(true)
        .vertical_spacing(0.05)
        .titles([
            labels.statistics_mean_cumulative.clone(),
            labels.statistics_std_cumulative.clone(),
            labels.statistics_mean_daily.clone(),
            labels.statistics_std_daily.clone(),
        ])
        .build();
    fig.layout.title = Some(
        Title::new(fill(
            &labels.statistics_title,
            &[("oilfield", ctx.oilfield.as_str())],
        ))
        .left(0.05),
    );
    fig.layout.font_size = 10;
    fig.layout.height = Some(630);

    for (ind, (model, stats)) in statistics.iter().enumerate() {
        let color = ctx.color(ind);
        for (row, values) in (1..).zip(stats.series()) {
            let name = if row == 1 { ctx.display_name(model) } else { "" };
            let trace = Scatter::new(name, dates.to_vec(), values.to_vec())
                .mode(DrawMode::MarkersLines)
                .marker(ctx.marker_size, None)
                .line(ctx.line_width, color.clone());
            fig.add_trace(row, 1, trace);
        }
    }
    fig
}
