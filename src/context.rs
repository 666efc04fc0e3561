use std::collections::BTreeMap;

use crate::color::{to_hex, Palette};
use crate::labels::Labels;

// ---------------------------------------------------------------------------
// Plot context
// ---------------------------------------------------------------------------

/// Everything the chart builders share besides the data itself.
#[derive(Debug, Clone)]
pub struct PlotContext {
    /// Oilfield name shown in titles.
    pub oilfield: String,

    /// Colours handed out by model position.
    pub palette: Palette,

    /// Display string templates.
    pub labels: Labels,

    /// Marker size for every scatter trace.
    pub marker_size: u32,

    /// Line width for every `markers+lines` trace.
    pub line_width: f64,

    /// Model key → human-readable name. Keys without an entry are shown as-is.
    pub display_names: BTreeMap<String, String>,
}

impl Default for PlotContext {
    fn default() -> Self {
        Self {
            oilfield: String::new(),
            palette: Palette::default(),
            labels: Labels::default(),
            marker_size: 4,
            line_width: 1.0,
            display_names: BTreeMap::new(),
        }
    }
}

impl PlotContext {
    pub fn new(oilfield: impl Into<String>) -> Self {
        Self {
            oilfield: oilfield.into(),
            ..Self::default()
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_display_name(mut self, model: impl Into<String>, name: impl Into<String>) -> Self {
        self.display_names.insert(model.into(), name.into());
        self
    }

    /// Human-readable name for a model key.
    pub fn display_name<'a>(&'a self, model: &'a str) -> &'a str {
        self.display_names
            .get(model)
            .map(String::as_str)
            .unwrap_or(model)
    }

    /// `#rrggbb` colour of the model at position `index`.
    pub fn color(&self, index: usize) -> String {
        to_hex(self.palette.color(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_fall_back_to_key() {
        let ctx = PlotContext::new("Field").with_display_name("crm", "CRM model");
        assert_eq!(ctx.display_name("crm"), "CRM model");
        assert_eq!(ctx.display_name("ml"), "ml");
        assert_eq!(ctx.oilfield, "Field");
        assert_eq!(ctx.marker_size, 4);
    }

    #[test]
    fn colors_come_from_palette() {
        let ctx = PlotContext::default().with_palette(Palette::evenly_spaced(3));
        assert_eq!(ctx.color(0), ctx.color(3));
        assert_ne!(ctx.color(0), ctx.color(1));
    }
}
