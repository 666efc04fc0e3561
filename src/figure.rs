//! Renderer-agnostic chart specification
//!
//! A [`Figure`] is a grid of panels (subplots) plus the traces placed on
//! them. It carries only content: titles, axis labels, trace data and a
//! handful of layout hints. Serialising to JSON is the hand-off point to
//! whatever renders it; non-finite values serialise as `null` (a gap).

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Traces
// ---------------------------------------------------------------------------

/// How scatter points are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrawMode {
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "markers+lines")]
    MarkersLines,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub width: f64,
    pub color: String,
}

/// A named x/y series.
#[derive(Debug, Clone, Serialize)]
pub struct Scatter {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub mode: DrawMode,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(rename = "showlegend")]
    pub show_legend: bool,
}

impl Scatter {
    /// Markers only, default marker size, shown in the legend.
    pub fn new(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            mode: DrawMode::Markers,
            marker: Marker {
                size: 6,
                color: None,
            },
            line: None,
            show_legend: true,
        }
    }

    pub fn mode(mut self, mode: DrawMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn marker(mut self, size: u32, color: Option<String>) -> Self {
        self.marker = Marker { size, color };
        self
    }

    pub fn line(mut self, width: f64, color: impl Into<String>) -> Self {
        self.line = Some(Line {
            width,
            color: color.into(),
        });
        self
    }

    pub fn hide_legend(mut self) -> Self {
        self.show_legend = false;
        self
    }
}

/// Distribution of raw values, binned by the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    pub x: Vec<f64>,
    pub bin_size: f64,
    pub opacity: f64,
}

/// One bar per category.
#[derive(Debug, Clone, Serialize)]
pub struct Bar {
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraceKind {
    Scatter(Scatter),
    Histogram(Histogram),
    Bar(Bar),
}

/// A trace placed on a panel (1-based row/column).
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub row: usize,
    pub col: usize,
    #[serde(flatten)]
    pub kind: TraceKind,
}

impl Trace {
    /// Legend name; histograms and bars are unnamed.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            TraceKind::Scatter(s) => Some(&s.name),
            _ => None,
        }
    }

    pub fn as_scatter(&self) -> Option<&Scatter> {
        match &self.kind {
            TraceKind::Scatter(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Scatter> for TraceKind {
    fn from(s: Scatter) -> Self {
        TraceKind::Scatter(s)
    }
}

impl From<Histogram> for TraceKind {
    fn from(h: Histogram) -> Self {
        TraceKind::Histogram(h)
    }
}

impl From<Bar> for TraceKind {
    fn from(b: Bar) -> Self {
        TraceKind::Bar(b)
    }
}

// ---------------------------------------------------------------------------
// Panels and layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtick: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub row: usize,
    pub col: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xanchor: Option<String>,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x: None,
            xanchor: None,
        }
    }

    /// Pin the title to the left edge at horizontal position `x`.
    pub fn left(mut self, x: f64) -> Self {
        self.x = Some(x);
        self.xanchor = Some("left".to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    pub font_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_font_size: Option<u32>,
    #[serde(rename = "showlegend")]
    pub show_legend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bargap: Option<f64>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            template: "seaborn".to_string(),
            title: None,
            font_size: 15,
            legend_font_size: None,
            show_legend: true,
            height: None,
            bargap: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Subplots – grid builder
// ---------------------------------------------------------------------------

/// Builds an empty [`Figure`] grid.
///
/// # Example
/// ```rust
/// use oilfield_charts::figure::Subplots;
///
/// let fig = Subplots::new(2, 1)
///     .shared_xaxes(true)
///     .vertical_spacing(0.07)
///     .titles(["Rate", "Error"])
///     .build();
/// assert_eq!(fig.panels.len(), 2);
/// assert_eq!(fig.panel(2, 1).unwrap().title.as_deref(), Some("Error"));
/// ```
#[derive(Debug, Clone)]
pub struct Subplots {
    rows: usize,
    cols: usize,
    shared_xaxes: bool,
    vertical_spacing: f64,
    titles: Vec<String>,
}

impl Subplots {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            shared_xaxes: false,
            vertical_spacing: 0.3 / rows.max(1) as f64,
            titles: Vec::new(),
        }
    }

    pub fn shared_xaxes(mut self, shared: bool) -> Self {
        self.shared_xaxes = shared;
        self
    }

    pub fn vertical_spacing(mut self, spacing: f64) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Panel titles in row-major order.
    pub fn titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.titles = titles.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Figure {
        let mut titles = self.titles.into_iter();
        let panels = (1..=self.rows)
            .flat_map(|row| (1..=self.cols).map(move |col| (row, col)))
            .map(|(row, col)| Panel {
                row,
                col,
                title: titles.next(),
                x_axis: Axis::default(),
                y_axis: Axis::default(),
            })
            .collect();

        Figure {
            rows: self.rows,
            cols: self.cols,
            shared_xaxes: self.shared_xaxes,
            vertical_spacing: self.vertical_spacing,
            layout: Layout::default(),
            panels,
            traces: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Figure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub rows: usize,
    pub cols: usize,
    pub shared_xaxes: bool,
    pub vertical_spacing: f64,
    pub layout: Layout,
    pub panels: Vec<Panel>,
    pub traces: Vec<Trace>,
}

impl Figure {
    /// Place a trace on the panel at `row`, `col` (1-based).
    pub fn add_trace(&mut self, row: usize, col: usize, trace: impl Into<TraceKind>) -> &mut Self {
        debug_assert!(
            (1..=self.rows).contains(&row) && (1..=self.cols).contains(&col),
            "panel ({row}, {col}) outside a {}x{} grid",
            self.rows,
            self.cols
        );
        self.traces.push(Trace {
            row,
            col,
            kind: trace.into(),
        });
        self
    }

    pub fn panel(&self, row: usize, col: usize) -> Option<&Panel> {
        self.panels.iter().find(|p| p.row == row && p.col == col)
    }

    pub fn panel_mut(&mut self, row: usize, col: usize) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.row == row && p.col == col)
    }

    /// Edit the x axis of one panel. No-op outside the grid.
    pub fn update_x_axis(&mut self, row: usize, col: usize, f: impl FnOnce(&mut Axis)) -> &mut Self {
        if let Some(panel) = self.panel_mut(row, col) {
            f(&mut panel.x_axis);
        }
        self
    }

    /// Edit the y axis of one panel. No-op outside the grid.
    pub fn update_y_axis(&mut self, row: usize, col: usize, f: impl FnOnce(&mut Axis)) -> &mut Self {
        if let Some(panel) = self.panel_mut(row, col) {
            f(&mut panel.y_axis);
        }
        self
    }

    /// Traces placed on one panel, in insertion order.
    pub fn traces_in(&self, row: usize, col: usize) -> impl Iterator<Item = &Trace> + '_ {
        self.traces
            .iter()
            .filter(move |t| t.row == row && t.col == col)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("serializing figure")
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serializing figure")
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), self)
            .with_context(|| format!("writing figure to {}", path.display()))?;
        log::info!("Wrote figure with {} traces to {}", self.traces.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_row_major_with_titles() {
        let fig = Subplots::new(2, 2).titles(["a", "b", "c"]).build();
        let layout: Vec<(usize, usize, Option<&str>)> = fig
            .panels
            .iter()
            .map(|p| (p.row, p.col, p.title.as_deref()))
            .collect();
        assert_eq!(
            layout,
            [
                (1, 1, Some("a")),
                (1, 2, Some("b")),
                (2, 1, Some("c")),
                (2, 2, None)
            ]
        );
    }

    #[test]
    fn axis_updates_target_one_panel() {
        let mut fig = Subplots::new(2, 1).build();
        fig.update_x_axis(2, 1, |a| a.title = Some("bottom".into()));
        fig.update_y_axis(9, 9, |a| a.dtick = Some(1.0));
        assert_eq!(fig.panel(1, 1).unwrap().x_axis.title, None);
        assert_eq!(fig.panel(2, 1).unwrap().x_axis.title.as_deref(), Some("bottom"));
    }

    #[test]
    fn serializes_nan_as_null_and_tags_traces() {
        let mut fig = Subplots::new(1, 1).build();
        fig.add_trace(
            1,
            1,
            Scatter::new("m", vec!["d1".into(), "d2".into()], vec![1.5, f64::NAN])
                .mode(DrawMode::MarkersLines),
        );
        let json: serde_json::Value = serde_json::from_str(&fig.to_json().unwrap()).unwrap();
        let trace = &json["traces"][0];
        assert_eq!(trace["type"], "scatter");
        assert_eq!(trace["mode"], "markers+lines");
        assert_eq!(trace["row"], 1);
        assert_eq!(trace["y"][1], serde_json::Value::Null);
        assert_eq!(json["layout"]["template"], "seaborn");
    }
}
