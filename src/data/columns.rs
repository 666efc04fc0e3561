use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::Table;

// ---------------------------------------------------------------------------
// Column naming: `<well>_<mode>_<side>`
// ---------------------------------------------------------------------------

/// Which production volume a column measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductionMode {
    Oil,
    Liq,
}

impl ProductionMode {
    /// The short code used inside column names.
    pub fn code(self) -> &'static str {
        match self {
            ProductionMode::Oil => "oil",
            ProductionMode::Liq => "liq",
        }
    }
}

impl fmt::Display for ProductionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown production mode '{0}', expected 'oil' or 'liq'")]
pub struct UnknownMode(pub String);

impl FromStr for ProductionMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "oil" => Ok(ProductionMode::Oil),
            "liq" => Ok(ProductionMode::Liq),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Actual vs. forecast half of a column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    True,
    Pred,
}

impl Side {
    pub fn suffix(self) -> &'static str {
        match self {
            Side::True => "true",
            Side::Pred => "pred",
        }
    }
}

/// `column_name("1021", Oil, True)` → `"1021_oil_true"`.
pub fn column_name(well: &str, mode: ProductionMode, side: Side) -> String {
    format!("{well}_{}_{}", mode.code(), side.suffix())
}

/// Split a column name into well, mode and side.
///
/// Well identifiers may themselves contain underscores; only the last two
/// segments are interpreted.
pub fn parse_column(name: &str) -> Option<(&str, ProductionMode, Side)> {
    let mut parts = name.rsplitn(3, '_');
    let side = match parts.next()? {
        "true" => Side::True,
        "pred" => Side::Pred,
        _ => return None,
    };
    let mode = parts.next()?.parse().ok()?;
    let well = parts.next().filter(|w| !w.is_empty())?;
    Some((well, mode, side))
}

/// The true/predicted column pair for one well, if both are present.
pub fn column_pair<'a>(
    table: &'a Table,
    well: &str,
    mode: ProductionMode,
) -> Option<(&'a [f64], &'a [f64])> {
    let y_true = table.column(&column_name(well, mode, Side::True))?;
    let y_pred = table.column(&column_name(well, mode, Side::Pred))?;
    Some((y_true, y_pred))
}

/// Wells that have both a true and a predicted column for `mode`,
/// in order of first appearance.
pub fn wells(table: &Table, mode: ProductionMode) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for name in table.column_names() {
        let Some((well, m, _)) = parse_column(name) else {
            continue;
        };
        if m != mode || found.iter().any(|w| w == well) {
            continue;
        }
        if column_pair(table, well, mode).is_some() {
            found.push(well.to_string());
        }
    }
    found
}
