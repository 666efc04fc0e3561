use crate::context::PlotContext;
use crate::data::{Models, ProductionMode, Table};
use crate::figure::{DrawMode, Figure, Scatter, Subplots, Title};
use crate::labels::{fill, stat};
use crate::metrics::{all_zero, mean, relative_error};

/// Column holding the summed actual volume.
pub const ACTUAL_COLUMN: &str = "actual";
/// Column holding the summed forecast volume.
pub const PREDICTED_COLUMN: &str = "predicted";
/// Column holding the relative error of the summed forecast.
pub const ERROR_COLUMN: &str = "error";

// ---------------------------------------------------------------------------
// AggregatePerformance – field-level totals for one model
// ---------------------------------------------------------------------------

/// Daily volumes summed over all wells, for one model and production mode.
#[derive(Debug, Clone)]
pub struct AggregatePerformance {
    pub index: Vec<String>,
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
    /// Relative error of `predicted` against `actual`, in percent.
    pub error: Vec<f64>,
}

impl AggregatePerformance {
    /// Read `actual`, `predicted` and (optionally) `error` columns.
    ///
    /// When the table has no `error` column it is derived with the signed
    /// [`relative_error`]. `None` if either volume column is missing.
    pub fn from_table(table: &Table) -> Option<Self> {
        let actual = table.column(ACTUAL_COLUMN)?;
        let predicted = table.column(PREDICTED_COLUMN)?;
        let error = match table.column(ERROR_COLUMN) {
            Some(e) => e.to_vec(),
            None => relative_error(actual, predicted, false),
        };
        Some(Self {
            index: table.index.clone(),
            actual: actual.to_vec(),
            predicted: predicted.to_vec(),
            error,
        })
    }
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

/// Field totals per model (top) and their relative error (bottom).
///
/// Models whose actual volume is zero in every period contribute nothing,
/// neither traces nor an annotation line, and do not take up a colour.
/// The bottom panel's x-axis title lists the mean error of each model.
pub fn performance_plot(
    ctx: &PlotContext,
    performance: &Models<AggregatePerformance>,
    mode: ProductionMode,
) -> Figure {
    let labels = &ctx.labels;
    let mut fig = Subplots::new(2, 1)
        .shared_xaxes(true)
        .vertical_spacing(0.05)
        .titles([
            fill(&labels.performance_rate_panel, &[("mode", labels.mode_name(mode))]),
            labels.performance_error_panel.clone(),
        ])
        .build();
    fig.layout.title = Some(
        Title::new(fill(
            &labels.performance_title,
            &[("oilfield", ctx.oilfield.as_str())],
        ))
        .left(0.05),
    );
    fig.layout.font_size = 10;
    fig.layout.legend_font_size = Some(15);
    fig.layout.height = Some(630);

    let models: Vec<(&str, &AggregatePerformance)> = performance
        .iter()
        .filter(|(model, perf)| {
            let keep = !all_zero(&perf.actual);
            if !keep {
                log::debug!("model '{model}' has no actual {mode} production, excluded");
            }
            keep
        })
        .collect();

    for (ind, (model, perf)) in models.iter().enumerate() {
        let name = fill(
            &labels.performance_actual_trace,
            &[("model", ctx.display_name(model))],
        );
        let actual = Scatter::new(name, perf.index.clone(), perf.actual.clone())
            .marker(ctx.marker_size, Some(ctx.color(ind)));
        fig.add_trace(1, 1, actual);
    }

    let mut annotation = String::new();
    for (ind, (model, perf)) in models.iter().enumerate() {
        let color = ctx.color(ind);
        let display = ctx.display_name(model);

        let forecast = Scatter::new(display, perf.index.clone(), perf.predicted.clone())
            .mode(DrawMode::MarkersLines)
            .marker(ctx.marker_size, None)
            .line(ctx.line_width, color.clone());
        let error = Scatter::new(
            fill(&labels.performance_error_trace, &[("model", display)]),
            perf.index.clone(),
            perf.error.clone(),
        )
        .mode(DrawMode::MarkersLines)
        .marker(ctx.marker_size, None)
        .line(ctx.line_width, color);

        annotation.push_str(&fill(
            &labels.performance_mean_line,
            &[("model", display), ("mean", stat(mean(&perf.error)).as_str())],
        ));
        fig.add_trace(1, 1, forecast);
        fig.add_trace(2, 1, error);
    }

    if !annotation.is_empty() {
        fig.update_x_axis(2, 1, |axis| {
            axis.title = Some(annotation);
            axis.title_font_size = Some(16);
        });
    }
    fig
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perf(actual: Vec<f64>, predicted: Vec<f64>) -> AggregatePerformance {
        let index = (0..actual.len()).map(|i| format!("d{i}")).collect();
        let error = relative_error(&actual, &predicted, false);
        AggregatePerformance {
            index,
            actual,
            predicted,
            error,
        }
    }

    #[test]
    fn all_zero_actual_model_is_excluded() {
        let models = Models::new()
            .with("dead", perf(vec![0.0, 0.0, 0.0], vec![5.0, 5.0, 5.0]))
            .with("crm", perf(vec![100.0, 100.0, 100.0], vec![150.0, 50.0, 100.0]));
        let ctx = PlotContext::new("East").with_display_name("crm", "CRM");
        let fig = performance_plot(&ctx, &models, ProductionMode::Oil);

        assert_eq!(fig.traces.len(), 3);
        let names: Vec<&str> = fig.traces.iter().filter_map(|t| t.name()).collect();
        assert_eq!(names, ["actual CRM", "CRM", "ERR: CRM"]);

        let annotation = fig.panel(2, 1).unwrap().x_axis.title.clone().unwrap();
        assert_eq!(annotation.matches("<br>").count(), 1);
        assert!(!annotation.contains("dead"));
        // (33.33 - 50 + 0) / 3
        assert!(annotation.contains("CRM</em>: -5.56"), "{annotation}");

        let first = fig.traces[0].as_scatter().unwrap();
        assert_eq!(first.marker.color.as_deref(), Some(ctx.color(0).as_str()));
    }

    #[test]
    fn actual_traces_come_first() {
        let models = Models::new()
            .with("a", perf(vec![1.0], vec![1.0]))
            .with("b", perf(vec![2.0], vec![1.0]));
        let fig = performance_plot(&PlotContext::default(), &models, ProductionMode::Liq);
        let layout: Vec<(usize, &str)> = fig
            .traces
            .iter()
            .map(|t| (t.row, t.name().unwrap_or("")))
            .collect();
        assert_eq!(
            layout,
            [
                (1, "actual a"),
                (1, "actual b"),
                (1, "a"),
                (2, "ERR: a"),
                (1, "b"),
                (2, "ERR: b")
            ]
        );
        assert_eq!(
            fig.panel(1, 1).unwrap().title.as_deref(),
            Some("Total daily liquid production, m3")
        );
    }

    #[test]
    fn only_dead_models_give_empty_figure() {
        let models = Models::new().with("dead", perf(vec![0.0], vec![1.0]));
        let fig = performance_plot(&PlotContext::default(), &models, ProductionMode::Oil);
        assert!(fig.traces.is_empty());
        assert_eq!(fig.panel(2, 1).unwrap().x_axis.title, None);
    }

    #[test]
    fn error_column_is_derived_when_absent() {
        let table = Table::new(vec!["d0".into(), "d1".into()])
            .with_column(ACTUAL_COLUMN, vec![100.0, 0.0])
            .and_then(|t| t.with_column(PREDICTED_COLUMN, vec![50.0, 0.0]))
            .unwrap();
        let p = AggregatePerformance::from_table(&table).unwrap();
        assert_eq!(p.error[0], -50.0);
        assert!(p.error[1].is_nan());

        let missing = Table::new(vec!["d0".into()])
            .with_column(ACTUAL_COLUMN, vec![1.0])
            .unwrap();
        assert!(AggregatePerformance::from_table(&missing).is_none());
    }
}
