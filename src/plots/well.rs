use crate::context::PlotContext;
use crate::data::columns::column_pair;
use crate::data::{Models, ProductionMode, Table};
use crate::figure::{DrawMode, Figure, Scatter, Subplots, Title};
use crate::labels::fill;
use crate::metrics::relative_error;

// ---------------------------------------------------------------------------
// Per-well comparison
// ---------------------------------------------------------------------------

/// Actual vs. forecast rate for one well (top) and the signed relative
/// error of every model (bottom).
///
/// Each model whose table holds both `<well>_<mode>_true` and
/// `<well>_<mode>_pred` adds three traces: actual and forecast on the top
/// panel, error on the bottom one. Other models are skipped but still
/// consume their colour, so a model keeps the same colour across wells.
pub fn well_plot(
    ctx: &PlotContext,
    datasets: &Models<Table>,
    well: &str,
    mode: ProductionMode,
) -> Figure {
    let labels = &ctx.labels;
    let mut fig = Subplots::new(2, 1)
        .shared_xaxes(true)
        .vertical_spacing(0.07)
        .titles([
            fill(&labels.well_rate_panel, &[("mode", mode.code())]),
            labels.well_error_panel.clone(),
        ])
        .build();
    fig.layout.title = Some(Title::new(fill(
        &labels.well_title,
        &[("well", well), ("oilfield", ctx.oilfield.as_str())],
    )));
    fig.layout.legend_font_size = Some(15);

    for (ind, (model, table)) in datasets.iter().enumerate() {
        let Some((y_true, y_pred)) = column_pair(table, well, mode) else {
            log::debug!("model '{model}' has no {mode} columns for well '{well}', skipping");
            continue;
        };
        let color = ctx.color(ind);

        let actual = Scatter::new(
            fill(&labels.well_actual_trace, &[("model", model)]),
            table.index.clone(),
            y_true.to_vec(),
        )
        .marker(ctx.marker_size, Some(color.clone()));
        fig.add_trace(1, 1, actual);

        let forecast = Scatter::new(model, table.index.clone(), y_pred.to_vec())
            .mode(DrawMode::MarkersLines)
            .marker(ctx.marker_size, None)
            .line(ctx.line_width, color.clone());
        fig.add_trace(1, 1, forecast);

        let error = Scatter::new(
            fill(&labels.well_error_trace, &[("model", model)]),
            table.index.clone(),
            relative_error(y_true, y_pred, false),
        )
        .mode(DrawMode::MarkersLines)
        .marker(ctx.marker_size, None)
        .line(ctx.line_width, color)
        .hide_legend();
        fig.add_trace(2, 1, error);
    }

    fig
}
