//! Display strings for every chart
//!
//! Every title, axis label and legend name is a template with `{name}`
//! placeholders. Statistics substituted into templates are always formatted
//! with two decimals, whatever the language.
//!
//! A JSON file may override any subset of fields:
//!
//! ```json
//! { "histogram_y_axis": "Number of wells", "mode_oil": "crude" }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::ProductionMode;

#[derive(Debug, thiserror::Error)]
pub enum LabelsError {
    #[error("reading labels file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing labels: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Templates used by the chart builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    // -- per-well comparison --
    /// `{well}`, `{oilfield}`
    pub well_title: String,
    /// `{mode}` (the column code, e.g. `oil`)
    pub well_rate_panel: String,
    pub well_error_panel: String,
    /// `{model}`
    pub well_actual_trace: String,
    /// `{model}`
    pub well_error_trace: String,

    // -- error distribution --
    pub histogram_title: String,
    pub histogram_y_axis: String,
    /// `{mean}`, `{std}`, `{oilfield}`, `{count}`
    pub histogram_x_axis: String,

    // -- per-well bars --
    pub wells_title: String,
    /// `{mean}`
    pub wells_x_axis: String,
    pub wells_y_axis: String,

    // -- aggregate performance --
    /// `{oilfield}`
    pub performance_title: String,
    /// `{mode}` (the display name from `mode_oil` / `mode_liq`)
    pub performance_rate_panel: String,
    pub performance_error_panel: String,
    /// `{model}`
    pub performance_actual_trace: String,
    /// `{model}`
    pub performance_error_trace: String,
    /// `{model}`, `{mean}`; one line per model
    pub performance_mean_line: String,

    // -- aggregate statistics --
    /// `{oilfield}`
    pub statistics_title: String,
    pub statistics_mean_cumulative: String,
    pub statistics_std_cumulative: String,
    pub statistics_mean_daily: String,
    pub statistics_std_daily: String,

    pub mode_oil: String,
    pub mode_liq: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            well_title: "Well \"{well}\"; {oilfield};".into(),
            well_rate_panel: "Rate: {mode}, m3".into(),
            well_error_panel: "Relative error, %".into(),
            well_actual_trace: "actual_{model}".into(),
            well_error_trace: "re_{model}".into(),

            histogram_title: "Distribution of mean error over the forecast period".into(),
            histogram_y_axis: "Wells".into(),
            histogram_x_axis: "Mean relative error, %<br><br>\
                <i>Mean: <em>{mean}</em></i><br>\
                <i>Standard deviation: <em>{std}</em></i><br>\
                Oilfield: <em>{oilfield}</em>. Wells: <em>{count}</em>"
                .into(),

            wells_title: "Mean relative error over the forecast period, %".into(),
            wells_x_axis: "Well<br><br><i>Mean error: <em>{mean}</em></i>".into(),
            wells_y_axis: "Relative error, %".into(),

            performance_title: "Oilfield {oilfield}".into(),
            performance_rate_panel: "Total daily {mode} production, m3".into(),
            performance_error_panel: "Relative deviation from actual, %".into(),
            performance_actual_trace: "actual {model}".into(),
            performance_error_trace: "ERR: {model}".into(),
            performance_mean_line: "<i>Mean error <em>{model}</em>: {mean}</i><br>".into(),

            statistics_title: "Oilfield <em>{oilfield}</em>".into(),
            statistics_mean_cumulative: "Mean relative error of cumulative production, %".into(),
            statistics_std_cumulative: "Standard deviation of cumulative production, %".into(),
            statistics_mean_daily: "Mean relative error of daily production, %".into(),
            statistics_std_daily: "Standard deviation of daily production, %".into(),

            mode_oil: "oil".into(),
            mode_liq: "liquid".into(),
        }
    }
}

impl Labels {
    /// Field-report wording in Russian.
    pub fn russian() -> Self {
        Self {
            well_title: "Скважина \"{well}\"; {oilfield};".into(),
            well_rate_panel: "Дебит: {mode}, м3".into(),
            well_error_panel: "Относительная ошибка, %".into(),
            well_actual_trace: "факт_{model}".into(),
            well_error_trace: "re_{model}".into(),

            histogram_title: "Распределение средней ошибки за весь период прогноза".into(),
            histogram_y_axis: "Скважин".into(),
            histogram_x_axis: "Усредненная относительная ошибка, %<br><br>\
                <i>Среднее значениe: <em>{mean}</i></em><br>\
                <i>Стандартное отклонениe: <em>{std}</i></em><br>\
                Месторождение: <em>{oilfield}</em>. Количество скважин: <em>{count}</em>"
                .into(),

            wells_title: "Средняя относит. ошибка на периоде прогноза, %".into(),
            wells_x_axis: "Номер скважины<br><br><i>Среднее значение ошибки: <em>{mean}</em></i>"
                .into(),
            wells_y_axis: "Относит. ошибка, %".into(),

            performance_title: "Месторождение {oilfield}".into(),
            performance_rate_panel: "Суммарная суточная добыча {mode}, м3".into(),
            performance_error_panel: "Относительное отклонение от факта, %".into(),
            performance_actual_trace: "факт {model}".into(),
            performance_error_trace: "ERR: {model}".into(),
            performance_mean_line: "<i>Среднее значение ошибки <em>{model}</em>: {mean}</i><br>"
                .into(),

            statistics_title: "Месторождение <em>{oilfield}</em>".into(),
            statistics_mean_cumulative: "Средняя относит. ошибка по накопленной добыче, %".into(),
            statistics_std_cumulative: "Стандартное отклонение по накопленной добыче, %".into(),
            statistics_mean_daily: "Средняя относит. ошибка суточной добычи, %".into(),
            statistics_std_daily: "Стандартное отклонение по суточной добыче, %".into(),

            mode_oil: "нефти".into(),
            mode_liq: "жидкости".into(),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, LabelsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, LabelsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Overlay a JSON object onto these labels. Fields the JSON does not
    /// name keep their current text.
    pub fn with_overrides(self, text: &str) -> Result<Self, LabelsError> {
        let overrides: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
        let mut merged = serde_json::to_value(self)?;
        if let Some(fields) = merged.as_object_mut() {
            fields.extend(overrides);
        }
        Ok(serde_json::from_value(merged)?)
    }

    /// Display name of a production mode.
    pub fn mode_name(&self, mode: ProductionMode) -> &str {
        match mode {
            ProductionMode::Oil => &self.mode_oil,
            ProductionMode::Liq => &self.mode_liq,
        }
    }
}

/// Substitute `{key}` placeholders. Unknown placeholders are left as-is.
/// Substituted values are not scanned again.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let value = tail.find('}').and_then(|close| {
            let key = &tail[1..close];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close + 1))
        });
        match value {
            Some((v, consumed)) => {
                out.push_str(v);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Two-decimal formatting used for every statistic shown in a title.
pub fn stat(value: f64) -> String {
    format!("{value:.2}")
}
