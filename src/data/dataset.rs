//! Sorted Dataset Module
//! Immutable league table produced by the loader and read by the view binder.

/// One row of the input file.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// League name, empty when the file has no `LIGA` column.
    pub liga: String,
    /// Coerced `GREEN` count. `None` when the cell was not numeric.
    pub green: Option<f64>,
    /// Display text for every kept column, in column order.
    pub cells: Vec<String>,
}

impl Record {
    pub fn new(liga: impl Into<String>, green: Option<f64>, cells: Vec<String>) -> Self {
        Self {
            liga: liga.into(),
            green,
            cells,
        }
    }
}

/// Records sorted by `GREEN` descending, missing values last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
    has_liga: bool,
}

impl Dataset {
    /// Wrap already-sorted records.
    pub fn new(columns: Vec<String>, records: Vec<Record>, has_liga: bool) -> Self {
        Self {
            columns,
            records,
            has_liga,
        }
    }

    /// Kept column names, blank and unnamed columns excluded.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_liga(&self) -> bool {
        self.has_liga
    }

    /// First `n` records; shorter when the dataset has fewer rows.
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }
}

/// Format a `GREEN` value the way it is shown in tables and bar labels.
/// Whole numbers drop the fractional part.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}
