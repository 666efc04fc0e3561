use std::cmp::Ordering;

use crate::context::PlotContext;
use crate::data::Table;
use crate::figure::{Bar, Figure, Histogram, Subplots, Title};
use crate::labels::{fill, stat};
use crate::metrics::{mean, std_dev};

// ---------------------------------------------------------------------------
// Per-well mean error
// ---------------------------------------------------------------------------

/// Mean error of every well (column) over all periods (rows), in column order.
pub fn well_means(errors: &Table) -> Vec<(String, f64)> {
    errors.column_means()
}

/// [`well_means`] sorted ascending. NaN means sort last; ties keep column order.
pub fn sorted_well_means(errors: &Table) -> Vec<(String, f64)> {
    let mut means = well_means(errors);
    means.sort_by(|(_, a), (_, b)| nan_last(*a, *b));
    means
}

fn nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Histogram of per-well mean errors with bins of `bin_size` percent.
///
/// The x-axis title reports the mean and standard deviation of the per-well
/// means together with the well count.
pub fn error_histogram(ctx: &PlotContext, errors: &Table, bin_size: f64) -> Figure {
    let labels = &ctx.labels;
    let means: Vec<f64> = well_means(errors).into_iter().map(|(_, m)| m).collect();

    let mut fig = Subplots::new(1, 1).build();
    fig.layout.title = Some(Title::new(labels.histogram_title.clone()));
    fig.layout.bargap = Some(0.005);
    fig.layout.show_legend = false;
    fig.layout.height = Some(500);

    let x_title = fill(
        &labels.histogram_x_axis,
        &[
            ("mean", stat(mean(&means)).as_str()),
            ("std", stat(std_dev(&means)).as_str()),
            ("oilfield", ctx.oilfield.as_str()),
            ("count", errors.width().to_string().as_str()),
        ],
    );

    fig.add_trace(
        1,
        1,
        Histogram {
            x: means,
            bin_size,
            opacity: 0.9,
        },
    );
    fig.update_x_axis(1, 1, |axis| {
        axis.dtick = Some(bin_size);
        axis.title = Some(x_title);
        axis.title_font_size = Some(16);
    });
    fig.update_y_axis(1, 1, |axis| {
        axis.title = Some(labels.histogram_y_axis.clone());
        axis.title_font_size = Some(15);
    });
    fig
}

/// Bar per well, sorted by mean error ascending.
pub fn wells_bar_chart(ctx: &PlotContext, errors: &Table) -> Figure {
    let labels = &ctx.labels;
    let (wells, means): (Vec<String>, Vec<f64>) = sorted_well_means(errors).into_iter().unzip();

    let mut fig = Subplots::new(1, 1).build();
    fig.layout.title = Some(Title::new(labels.wells_title.clone()));

    let x_title = fill(&labels.wells_x_axis, &[("mean", stat(mean(&means)).as_str())]);
    fig.add_trace(1, 1, Bar { x: wells, y: means });
    fig.update_x_axis(1, 1, |axis| axis.title = Some(x_title));
    fig.update_y_axis(1, 1, |axis| axis.title = Some(labels.wells_y_axis.clone()));
    fig
}
