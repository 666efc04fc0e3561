use std::collections::BTreeMap;

use crate::metrics;

// ---------------------------------------------------------------------------
// TableError – construction failures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("column '{name}' has {got} values but the index has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),
}

// ---------------------------------------------------------------------------
// Table – one DataFrame-like block of time series
// ---------------------------------------------------------------------------

/// Index-aligned numeric columns keyed by a row label.
///
/// Row labels are timestamp-like text (e.g. `2021-03-01`) kept as strings,
/// since they are only ever displayed. Column order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Row labels, one per period.
    pub index: Vec<String>,
    /// Ordered list of column names.
    column_names: Vec<String>,
    /// Column name → values (same length as `index`).
    columns: BTreeMap<String, Vec<f64>>,
}

impl Table {
    /// An empty table over the given row labels.
    pub fn new(index: Vec<String>) -> Self {
        Self {
            index,
            column_names: Vec::new(),
            columns: BTreeMap::new(),
        }
    }

    /// Append a column, keeping insertion order.
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), TableError> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(TableError::LengthMismatch {
                name,
                expected: self.index.len(),
                got: values.len(),
            });
        }
        if self.columns.contains_key(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        self.column_names.push(name.clone());
        self.columns.insert(name, values);
        Ok(())
    }

    /// Chaining form of [`Table::insert_column`].
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, TableError> {
        self.insert_column(name, values)?;
        Ok(self)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Columns in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> + '_ {
        self.column_names
            .iter()
            .filter_map(|name| Some((name.as_str(), self.column(name)?)))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.column_names.len()
    }

    /// Mean of every column over all rows, NaN cells skipped.
    pub fn column_means(&self) -> Vec<(String, f64)> {
        self.columns()
            .map(|(name, values)| (name.to_string(), metrics::mean(values)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Models – insertion-ordered model name → value mapping
// ---------------------------------------------------------------------------

/// Ordered mapping from model name to per-model data.
///
/// Colours are assigned by position, so iteration order is part of the
/// contract: it is always insertion order.
#[derive(Debug, Clone)]
pub struct Models<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Models<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Models<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: T) -> Option<T> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Chaining form of [`Models::insert`].
    pub fn with(mut self, name: impl Into<String>, value: T) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for Models<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut models = Models::new();
        for (name, value) in iter {
            models.insert(name, value);
        }
        models
    }
}
