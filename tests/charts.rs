use oilfield_charts::figure::TraceKind;
use oilfield_charts::metrics::relative_error;
use oilfield_charts::plots::{sorted_well_means, well_means};
use oilfield_charts::{
    error_histogram, performance_plot, statistics_plot, well_plot, wells_bar_chart,
    AggregatePerformance, ErrorStatistics, Labels, Models, PlotContext, ProductionMode, Table,
};

fn months(n: usize) -> Vec<String> {
    (1..=n).map(|m| format!("2021-{m:02}-01")).collect()
}

fn table(n: usize, columns: &[(&str, Vec<f64>)]) -> Table {
    let mut t = Table::new(months(n));
    for (name, values) in columns {
        t.insert_column(*name, values.clone()).unwrap();
    }
    t
}

#[test]
fn abs_and_signed_modes_stay_in_percent_range() {
    let y_true = [100.0, 100.0, -10.0, 0.0, 7.5, -3.0];
    let y_pred = [150.0, 50.0, 10.0, 0.0, 7.5, -9.0];
    let signed = relative_error(&y_true, &y_pred, false);
    let abs = relative_error(&y_true, &y_pred, true);
    for (s, a) in signed.iter().zip(&abs) {
        if s.is_nan() {
            assert!(a.is_nan());
        } else {
            assert!((-100.0..=100.0).contains(a));
            assert!((-100.0..=100.0).contains(s));
        }
    }
    assert!((abs[0] - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(abs[1], 50.0);
    assert_eq!(abs[2], 100.0);
    // both rates negative: the denominator max(-3, -9) stays negative
    assert_eq!(signed[5], 100.0);
    assert_eq!(abs[5], -100.0);
}

#[test]
fn trace_count_matches_complete_pairs_across_models() {
    let datasets = Models::new()
        .with(
            "crm",
            table(
                3,
                &[
                    ("11_oil_true", vec![10.0, 9.0, 8.0]),
                    ("11_oil_pred", vec![11.0, 9.5, 7.0]),
                    ("11_liq_true", vec![20.0, 18.0, 16.0]),
                ],
            ),
        )
        .with(
            "ml",
            table(
                3,
                &[
                    ("11_liq_true", vec![20.0, 18.0, 16.0]),
                    ("11_liq_pred", vec![21.0, 17.0, 16.0]),
                ],
            ),
        );
    let ctx = PlotContext::new("North");

    let oil = well_plot(&ctx, &datasets, "11", ProductionMode::Oil);
    let liq = well_plot(&ctx, &datasets, "11", ProductionMode::Liq);
    let missing = well_plot(&ctx, &datasets, "99", ProductionMode::Oil);

    assert_eq!(oil.traces.len(), 3);
    assert_eq!(liq.traces.len(), 3);
    assert!(missing.traces.is_empty());
}

#[test]
fn inputs_are_not_mutated() {
    let errors = table(2, &[("a", vec![f64::NAN, 200.0]), ("b", vec![-1.0, 1.0])]);
    let before: Vec<Vec<f64>> = errors.columns().map(|(_, v)| v.to_vec()).collect();
    let _ = error_histogram(&PlotContext::default(), &errors, 10.0);
    let _ = wells_bar_chart(&PlotContext::default(), &errors);
    let after: Vec<Vec<f64>> = errors.columns().map(|(_, v)| v.to_vec()).collect();
    assert_eq!(format!("{before:?}"), format!("{after:?}"));
}

#[test]
fn histogram_means_follow_columns_not_rows() {
    let rows = 12;
    let errors = table(
        rows,
        &[
            ("w1", vec![1.0; rows]),
            ("w2", vec![2.0; rows]),
            ("w3", vec![3.0; rows]),
            ("w4", vec![4.0; rows]),
            ("w5", vec![5.0; rows]),
        ],
    );
    assert_eq!(well_means(&errors).len(), 5);

    let fig = error_histogram(&PlotContext::default(), &errors, 1.0);
    let TraceKind::Histogram(h) = &fig.traces[0].kind else {
        panic!("expected a histogram trace");
    };
    assert_eq!(h.x.len(), 5);
}

#[test]
fn bar_chart_example_order() {
    let errors = table(
        1,
        &[("A", vec![5.0]), ("B", vec![-3.0]), ("C", vec![0.0])],
    );
    let order: Vec<String> = sorted_well_means(&errors).into_iter().map(|(w, _)| w).collect();
    assert_eq!(order, ["B", "C", "A"]);

    let fig = wells_bar_chart(&PlotContext::default(), &errors);
    let TraceKind::Bar(bar) = &fig.traces[0].kind else {
        panic!("expected a bar trace");
    };
    assert_eq!(bar.x, ["B", "C", "A"]);
}

#[test]
fn performance_from_tables_end_to_end() {
    let live = table(
        3,
        &[
            ("actual", vec![100.0, 100.0, 100.0]),
            ("predicted", vec![150.0, 50.0, 100.0]),
        ],
    );
    let dead = table(
        3,
        &[("actual", vec![0.0, 0.0, 0.0]), ("predicted", vec![1.0, 2.0, 3.0])],
    );
    let perf: Models<AggregatePerformance> = [("dead", &dead), ("crm", &live)]
        .into_iter()
        .filter_map(|(name, t)| Some((name, AggregatePerformance::from_table(t)?)))
        .collect();
    assert_eq!(perf.len(), 2);

    let ctx = PlotContext::new("East").with_labels(Labels::russian());
    let fig = performance_plot(&ctx, &perf, ProductionMode::Liq);
    assert_eq!(fig.traces.len(), 3);
    assert_eq!(
        fig.panel(1, 1).unwrap().title.as_deref(),
        Some("Суммарная суточная добыча жидкости, м3")
    );
    let annotation = fig.panel(2, 1).unwrap().x_axis.title.clone().unwrap();
    assert_eq!(
        annotation,
        "<i>Среднее значение ошибки <em>crm</em>: -5.56</i><br>"
    );
}

#[test]
fn statistics_plot_serializes_gaps_as_null() {
    let stats = Models::new().with(
        "crm",
        ErrorStatistics {
            mean_cumulative: vec![1.0, f64::NAN],
            std_cumulative: vec![0.5, 0.5],
            mean_daily: vec![2.0, 2.0],
            std_daily: vec![1.0, 1.0],
        },
    );
    let fig = statistics_plot(&PlotContext::new("West"), &stats, &months(2));
    assert_eq!(fig.traces.len(), 4);

    let json: serde_json::Value = serde_json::from_str(&fig.to_json().unwrap()).unwrap();
    assert_eq!(json["traces"][0]["y"][1], serde_json::Value::Null);
    assert_eq!(json["traces"][0]["name"], "crm");
    assert_eq!(json["traces"][3]["row"], 4);
    assert_eq!(json["layout"]["title"]["xanchor"], "left");
    assert_eq!(json["layout"]["height"], 630);
}

#[test]
fn empty_inputs_give_valid_empty_figures() {
    let ctx = PlotContext::default();
    assert!(well_plot(&ctx, &Models::new(), "1", ProductionMode::Oil).traces.is_empty());
    assert!(performance_plot(&ctx, &Models::new(), ProductionMode::Oil).traces.is_empty());
    assert!(statistics_plot(&ctx, &Models::new(), &[]).traces.is_empty());

    let bars = wells_bar_chart(&ctx, &Table::default());
    let TraceKind::Bar(bar) = &bars.traces[0].kind else {
        panic!("expected a bar trace");
    };
    assert!(bar.x.is_empty());
}

#[test]
fn figures_can_be_built_from_other_threads() {
    let datasets = Models::new().with(
        "crm",
        table(1, &[("1_oil_true", vec![1.0]), ("1_oil_pred", vec![2.0])]),
    );
    let ctx = PlotContext::default();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| well_plot(&ctx, &datasets, "1", ProductionMode::Oil)))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().traces.len(), 3);
        }
    });
}
