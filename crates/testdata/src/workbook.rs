//! Workbook ingestion - reads every sheet of a spreadsheet into memory

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info};

use crate::error::{DataError, DataResult};

/// A named sheet with its rows rendered to text.
///
/// Each row holds the positional cell values starting at column A. Trailing
/// empty cells are trimmed, so `row.len()` is the number of populated
/// positional fields. Row 0 of `rows` is sheet row 1.
///
/// The header is the first row of the sheet's used range, which need not be
/// sheet row 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Vec<String>>,

    /// Offset into `rows` of the header
    header: usize,
}

impl Sheet {
    /// Build a sheet from already-tabular values
    pub fn new<I, R, S>(name: impl Into<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| trim_trailing_empty(row.into_iter().map(Into::into).collect()))
            .collect();

        Self {
            name: name.into(),
            rows,
            header: 0,
        }
    }

    /// 1-based sheet row of the header
    pub fn header_row(&self) -> usize {
        self.header + 1
    }

    /// Rows below the header, each with its 1-based sheet row
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[String])> + '_ {
        self.rows
            .iter()
            .enumerate()
            .skip(self.header + 1)
            .map(|(pos, row)| (pos + 1, row.as_slice()))
    }
}

fn trim_trailing_empty(mut row: Vec<String>) -> Vec<String> {
    while row.last().is_some_and(|cell| cell.is_empty()) {
        row.pop();
    }
    row
}

/// Every sheet of a workbook, materialized eagerly
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    /// Source file, if the workbook was read from disk
    path: Option<PathBuf>,

    /// Sheets in workbook order
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Open a spreadsheet file (xlsx, xlsm, xlsb, xls or ods) and read all of
    /// its sheets
    pub fn open(path: impl AsRef<Path>) -> DataResult<Self> {
        let path = path.as_ref();
        let unreadable = |reason: String| DataError::SourceUnreadable {
            path: path.to_path_buf(),
            reason,
        };

        let mut source = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;

        let mut sheets = Vec::new();
        for name in source.sheet_names() {
            let range = source
                .worksheet_range(&name)
                .map_err(|e| unreadable(format!("sheet '{}': {}", name, e)))?;

            // Positions stay absolute to A1; the header is wherever the used range starts
            let (first_row, first_col) = range.start().unwrap_or((0, 0));
            let leading_cols = first_col as usize;

            let mut rows: Vec<Vec<String>> = vec![Vec::new(); first_row as usize];
            for cells in range.rows() {
                let mut row = vec![String::new(); leading_cols];
                row.extend(cells.iter().map(cell_text));
                rows.push(trim_trailing_empty(row));
            }

            debug!(
                "Read sheet '{}' ({} rows, header on row {})",
                name,
                rows.len(),
                first_row + 1
            );
            sheets.push(Sheet {
                name,
                rows,
                header: first_row as usize,
            });
        }

        info!(
            "Loaded test data workbook {} ({} sheets)",
            path.display(),
            sheets.len()
        );

        Ok(Self {
            path: Some(path.to_path_buf()),
            sheets,
        })
    }

    /// Build an in-memory workbook
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Self { path: None, sheets }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    /// Exact, case-sensitive lookup
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// Render a cell the way the suite compares inputs: as plain text
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
