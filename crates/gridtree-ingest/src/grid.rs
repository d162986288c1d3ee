//! Grid sources: cell-addressable views over tabular files.
//!
//! A [`GridSource`] exposes lookup by (row, column) with 1-indexed
//! coordinates, matching how layouts are written by hand. Empty cells are
//! absent, not empty strings.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::error::{Result, SourceError};
use crate::layout::SheetLayout;

/// Cell value lookup over one definition sheet.
pub trait GridSource {
    /// Stable identity of this source for logs and error messages
    /// (typically the file path).
    fn source_id(&self) -> &str;

    /// Value at the 1-indexed (row, column), or `None` for an empty cell.
    fn cell(&self, row: u32, column: u32) -> Option<String>;
}

/// Trim a cell value, mapping whitespace-only content to absence.
pub fn non_blank(cell: Option<String>) -> Option<String> {
    let value = cell?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Open a grid for `path`, dispatching on the file extension.
///
/// Workbook formats go through calamine and select the layout's definition
/// sheet; a CSV file is treated as a single-sheet grid.
pub fn open_grid(path: &Path, layout: &SheetLayout) -> Result<Box<dyn GridSource>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => {
            Ok(Box::new(XlsxGrid::open(path, &layout.sheet_name)?))
        }
        "csv" => Ok(Box::new(CsvGrid::open(path)?)),
        _ => Err(SourceError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Workbook-backed grid over the configured definition sheet.
pub struct XlsxGrid {
    source_id: String,
    range: Range<Data>,
}

impl XlsxGrid {
    pub fn open(path: &Path, sheet_name: &str) -> Result<Self> {
        let mut workbook = open_workbook_auto(path).map_err(|e| SourceError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let range =
            workbook
                .worksheet_range(sheet_name)
                .map_err(|_| SourceError::SheetNotFound {
                    source_id: path.display().to_string(),
                    sheet: sheet_name.to_string(),
                })?;
        Ok(Self {
            source_id: path.display().to_string(),
            range,
        })
    }
}

impl GridSource for XlsxGrid {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn cell(&self, row: u32, column: u32) -> Option<String> {
        if row == 0 || column == 0 {
            return None;
        }
        let value = self.range.get_value((row - 1, column - 1))?;
        match value {
            Data::Empty | Data::Error(_) => None,
            Data::String(s) => Some(s.clone()),
            Data::Int(i) => Some(i.to_string()),
            Data::Float(f) => Some(format_number(*f)),
            Data::Bool(b) => Some(b.to_string()),
            Data::DateTime(dt) => Some(format_number(dt.as_f64())),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        }
    }
}

/// Render a numeric cell the way it reads in the sheet: reference ids are
/// stored as floats by spreadsheet applications, so "1.0" must come back as
/// "1".
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// CSV file treated as a single-sheet grid; empty fields are absent cells.
pub struct CsvGrid {
    source_id: String,
    rows: Vec<Vec<String>>,
}

impl CsvGrid {
    pub fn open(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| SourceError::Open {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| SourceError::Open {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self {
            source_id: path.display().to_string(),
            rows,
        })
    }
}

impl GridSource for CsvGrid {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn cell(&self, row: u32, column: u32) -> Option<String> {
        if row == 0 || column == 0 {
            return None;
        }
        let value = self
            .rows
            .get((row - 1) as usize)?
            .get((column - 1) as usize)?;
        if value.is_empty() {
            None
        } else {
            Some(value.clone())
        }
    }
}

/// In-memory grid for tests and programmatic ingestion.
///
/// Rows start at (1, 1); empty strings are treated as absent cells.
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    source_id: String,
    rows: Vec<Vec<String>>,
}

impl MemoryGrid {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            rows: Vec::new(),
        }
    }

    /// Build from row-major cell text, where `""` means an empty cell.
    pub fn from_rows(source_id: impl Into<String>, rows: &[&[&str]]) -> Self {
        Self {
            source_id: source_id.into(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
                .collect(),
        }
    }
}

impl GridSource for MemoryGrid {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn cell(&self, row: u32, column: u32) -> Option<String> {
        if row == 0 || column == 0 {
            return None;
        }
        let value = self
            .rows
            .get((row - 1) as usize)?
            .get((column - 1) as usize)?;
        if value.is_empty() {
            None
        } else {
            Some(value.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_grid_is_one_indexed() {
        let grid = MemoryGrid::from_rows("test", &[&["a", "", "c"]]);
        assert_eq!(grid.cell(1, 1).as_deref(), Some("a"));
        assert_eq!(grid.cell(1, 2), None);
        assert_eq!(grid.cell(1, 3).as_deref(), Some("c"));
        assert_eq!(grid.cell(2, 1), None);
        assert_eq!(grid.cell(0, 1), None);

        let empty = MemoryGrid::new("empty");
        assert_eq!(empty.source_id(), "empty");
        assert_eq!(empty.cell(1, 1), None);
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(10.5), "10.5");
        assert_eq!(format_number(-3.0), "-3");
    }

    #[test]
    fn non_blank_trims_and_drops_whitespace() {
        assert_eq!(non_blank(Some("  LVL ".to_string())).as_deref(), Some("LVL"));
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn csv_grid_reads_cells_by_coordinate() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("customer.csv");
        std::fs::write(&path, "Customer,,\n,desc,\n1,,LVL\n").unwrap();

        let grid = CsvGrid::open(&path).unwrap();
        assert_eq!(grid.cell(1, 1).as_deref(), Some("Customer"));
        assert_eq!(grid.cell(2, 2).as_deref(), Some("desc"));
        assert_eq!(grid.cell(3, 3).as_deref(), Some("LVL"));
        assert_eq!(grid.cell(1, 2), None);
    }

    #[test]
    fn open_grid_rejects_unknown_extensions() {
        let layout = SheetLayout::default();
        let err = open_grid(Path::new("definition.txt"), &layout).err().unwrap();
        assert!(matches!(err, SourceError::UnsupportedFormat { .. }));
    }
}
