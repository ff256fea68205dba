//! CSV Data Loader Module
//! Reads the league CSV with Polars, validates it and sorts it by `GREEN`.

use super::dataset::{format_value, Dataset, Record};
use polars::prelude::*;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Metric column driving sort order and bar height.
pub const GREEN: &str = "GREEN";
/// League name column used as the chart category.
pub const LIGA: &str = "LIGA";

const SEPARATOR: u8 = b';';
/// Stripped from `GREEN` cells before the numeric cast
const PADDING: &str = " \t\r";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Column '{column}' not found in {}", path.display())]
    Schema { column: &'static str, path: PathBuf },
}

/// Load a semicolon-delimited CSV and sort it by `GREEN` descending.
///
/// Blank and unnamed columns are dropped before validation. `GREEN` cells
/// that do not parse as numbers become missing and sort after every present
/// value. The sort is stable, so equal counts keep their file order.
pub fn load_and_sort(path: impl AsRef<Path>) -> Result<Dataset, LoaderError> {
    let path = path.as_ref();

    // Every column is read as text; GREEN is coerced explicitly below
    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| {
            opts.with_separator(SEPARATOR)
                .with_truncate_ragged_lines(true)
        })
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    // The reader renames blank header cells ("", "_duplicated_0", ...),
    // so blankness is decided on the header row as written in the file
    let header = read_header_cells(path)?;
    let columns: Vec<String> = raw
        .get_column_names()
        .iter()
        .zip(&header)
        .filter(|(_, cell)| !is_unnamed_column(cell.as_str()))
        .map(|(name, _)| name.to_string())
        .collect();
    debug!(?columns, "CSV columns");

    if !columns.iter().any(|c| c == GREEN) {
        return Err(LoaderError::Schema {
            column: GREEN,
            path: path.to_path_buf(),
        });
    }

    let liga_idx = columns.iter().position(|c| c == LIGA);
    if liga_idx.is_none() {
        warn!("column '{}' not found, bars will be labelled by rank", LIGA);
    }

    // Non-strict cast: cells that do not parse become null
    let selection: Vec<Expr> = columns.iter().map(|c| col(c.as_str())).collect();
    let coerced = raw
        .lazy()
        .select(selection)
        .with_column(
            col(GREEN)
                .str()
                .strip_chars(lit(PADDING))
                .cast(DataType::Float64),
        )
        .collect()?;

    let mut records = extract_records(&coerced, &columns, liga_idx)?;

    // slice::sort_by is stable
    records.sort_by(|a, b| compare_green_desc(a.green, b.green));

    info!(
        "Loaded {} rows, {} columns from {}",
        records.len(),
        columns.len(),
        path.display()
    );

    Ok(Dataset::new(columns, records, liga_idx.is_some()))
}

/// Descending order with missing values after every present one.
fn compare_green_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// First line of the file, one entry per column, blank cells as "".
fn read_header_cells(path: &Path) -> Result<Vec<String>, LoaderError> {
    let header = CsvReadOptions::default()
        .with_has_header(false)
        .with_n_rows(Some(1))
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| {
            opts.with_separator(SEPARATOR)
                .with_truncate_ragged_lines(true)
        })
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    header
        .get_columns()
        .iter()
        .map(|column| -> Result<String, LoaderError> {
            let cell = column.str()?.get(0).unwrap_or_default();
            Ok(cell.trim().to_string())
        })
        .collect()
}

/// Blank header cells and spreadsheet "Unnamed" placeholders.
fn is_unnamed_column(header_cell: &str) -> bool {
    header_cell.is_empty() || header_cell.starts_with("Unnamed")
}

fn extract_records(
    df: &DataFrame,
    columns: &[String],
    liga_idx: Option<usize>,
) -> Result<Vec<Record>, LoaderError> {
    let height = df.height();
    let mut cells: Vec<Vec<String>> = vec![Vec::with_capacity(columns.len()); height];

    // NaN counts as missing
    let greens: Vec<Option<f64>> = df
        .column(GREEN)?
        .f64()?
        .into_iter()
        .map(|v| v.filter(|v| !v.is_nan()))
        .collect();

    for name in columns {
        if name == GREEN {
            for (row, value) in greens.iter().enumerate() {
                cells[row].push(value.map(format_value).unwrap_or_default());
            }
            continue;
        }

        let values = df.column(name)?.str()?;
        for (row, value) in values.into_iter().enumerate() {
            cells[row].push(value.unwrap_or_default().trim().to_string());
        }
    }

    let records = cells
        .into_iter()
        .zip(greens)
        .map(|(row, green)| {
            let liga = liga_idx
                .and_then(|idx| row.get(idx).cloned())
                .unwrap_or_default();
            Record::new(liga, green, row)
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(contents: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ligas.csv");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    fn greens(ds: &Dataset) -> Vec<Option<f64>> {
        ds.records().iter().map(|r| r.green).collect()
    }

    fn ligas(ds: &Dataset) -> Vec<&str> {
        ds.records().iter().map(|r| r.liga.as_str()).collect()
    }

    #[test]
    fn sorts_descending_with_missing_last() {
        let (_dir, path) = write_csv("LIGA;GREEN\nA;3\nB;7\nC;x\n");

        let ds = load_and_sort(&path).unwrap();

        assert_eq!(ligas(&ds), vec!["B", "A", "C"]);
        assert_eq!(greens(&ds), vec![Some(7.0), Some(3.0), None]);
    }

    #[test]
    fn equal_counts_keep_file_order() {
        let (_dir, path) = write_csv("LIGA;GREEN\nA;5\nB;9\nC;5\nD;5\nE;9\n");

        let ds = load_and_sort(&path).unwrap();

        assert_eq!(ligas(&ds), vec!["B", "E", "A", "C", "D"]);
    }

    #[test]
    fn missing_values_keep_file_order_at_the_end() {
        let (_dir, path) = write_csv("LIGA;GREEN\nA;-\nB;1\nC;\nD;NaN\nE;2\n");

        let ds = load_and_sort(&path).unwrap();

        assert_eq!(ligas(&ds), vec!["E", "B", "A", "C", "D"]);
        assert_eq!(greens(&ds)[2..], [None, None, None]);
    }

    #[test]
    fn result_is_non_increasing() {
        let (_dir, path) = write_csv("LIGA;GREEN\nA;4\nB;12\nC;0\nD;abc\nE;7.5\nF;12\n");

        let ds = load_and_sort(&path).unwrap();
        let values = greens(&ds);

        for pair in values.windows(2) {
            // Option orders None below every Some
            assert!(pair[0] >= pair[1], "{:?} before {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn missing_green_is_a_schema_error() {
        let (_dir, path) = write_csv("LIGA;RED\nA;3\n");

        let err = load_and_sort(&path).unwrap_err();

        assert!(matches!(err, LoaderError::Schema { column: GREEN, .. }));
    }

    #[test]
    fn unnamed_columns_are_dropped() {
        let (_dir, path) = write_csv("LIGA;GREEN;;Unnamed: 3\nA;3;;\nB;7;;\n");

        let ds = load_and_sort(&path).unwrap();

        assert_eq!(ds.columns(), ["LIGA".to_string(), "GREEN".to_string()]);
        assert!(ds.records().iter().all(|r| r.cells.len() == 2));
    }

    #[test]
    fn several_blank_headers_are_dropped() {
        let (_dir, path) = write_csv("LIGA;GREEN;;\nA;3;;\nB;7;;\n");

        let ds = load_and_sort(&path).unwrap();

        assert_eq!(ds.columns(), ["LIGA".to_string(), "GREEN".to_string()]);
        assert_eq!(ds.records()[0].cells, vec!["B", "7"]);
    }

    #[test]
    fn generated_looking_names_are_kept() {
        let (_dir, path) = write_csv("column_1;GREEN\nA;3\n");

        let ds = load_and_sort(&path).unwrap();

        assert_eq!(ds.columns(), ["column_1".to_string(), "GREEN".to_string()]);
        assert_eq!(ds.records()[0].cells, vec!["A", "3"]);
    }

    #[test]
    fn padded_green_values_still_parse() {
        let (_dir, path) = write_csv("LIGA;GREEN\nA; 7\nB;3 \nC;5\n");

        let ds = load_and_sort(&path).unwrap();

        assert_eq!(ligas(&ds), vec!["A", "C", "B"]);
        assert_eq!(greens(&ds), vec![Some(7.0), Some(5.0), Some(3.0)]);
        assert_eq!(ds.records()[0].cells, vec!["A", "7"]);
    }

    #[test]
    fn blank_green_header_does_not_count() {
        let (_dir, path) = write_csv("LIGA;;TOTAL\nA;3;4\n");

        assert!(matches!(
            load_and_sort(&path),
            Err(LoaderError::Schema { .. })
        ));
    }

    #[test]
    fn cells_follow_column_order() {
        let (_dir, path) = write_csv("PAIS;LIGA;GREEN;RED\nBR;Serie A;10;2\nES;La Liga;12;5\n");

        let ds = load_and_sort(&path).unwrap();

        assert!(ds.has_liga());
        assert_eq!(ds.records()[0].cells, vec!["ES", "La Liga", "12", "5"]);
        assert_eq!(ds.records()[1].liga, "Serie A");
    }

    #[test]
    fn dataset_without_liga_still_loads() {
        let (_dir, path) = write_csv("TIME;GREEN\nX;1\nY;2\n");

        let ds = load_and_sort(&path).unwrap();

        assert!(!ds.has_liga());
        assert_eq!(ligas(&ds), vec!["", ""]);
        assert_eq!(greens(&ds), vec![Some(2.0), Some(1.0)]);
    }

    #[test]
    fn source_file_is_untouched() {
        let contents = "LIGA;GREEN\nA;3\nB;7\n";
        let (_dir, path) = write_csv(contents);

        load_and_sort(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), contents);
    }

    #[test]
    fn missing_file_is_a_csv_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_and_sort(dir.path().join("nope.csv")).unwrap_err();

        assert!(matches!(err, LoaderError::Csv(_)));
    }
}
