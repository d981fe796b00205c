//! Excel importer implementation - .xlsx → VendorTable

use crate::error::{VendorError, VendorResult};
use crate::types::{CellValue, VendorTable};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};

/// Reads a vendor table back from a workbook
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import the `VendorData` sheet, or the first sheet if there is none
    pub fn import(&self) -> VendorResult<VendorTable> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| VendorError::Spreadsheet(format!("Failed to open Excel file: {}", e)))?;

        let sheet_names = workbook.sheet_names().to_vec();
        let sheet_name = sheet_names
            .iter()
            .find(|name| name.as_str() == super::SHEET_NAME)
            .or_else(|| sheet_names.first())
            .cloned()
            .ok_or_else(|| {
                VendorError::Spreadsheet(format!("{} has no worksheets", self.path.display()))
            })?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| VendorError::Spreadsheet(format!("Failed to read {}: {}", sheet_name, e)))?;

        Ok(Self::table_from_range(&range))
    }

    /// First row is the header; unnamed columns are dropped
    fn table_from_range(range: &Range<Data>) -> VendorTable {
        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return VendorTable::default();
        };

        let kept: Vec<(usize, String)> = header
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| {
                let name = match cell {
                    Data::String(s) => s.trim().to_string(),
                    Data::Empty => String::new(),
                    other => other.to_string(),
                };
                if Self::is_unnamed(&name) {
                    None
                } else {
                    Some((idx, name))
                }
            })
            .collect();

        let mut table = VendorTable::new(kept.iter().map(|(_, name)| name.clone()).collect());
        for row in rows {
            let cells = kept
                .iter()
                .map(|(idx, _)| row.get(*idx).map(Self::convert_cell).unwrap_or_default())
                .collect();
            table.push_cells(cells);
        }
        table
    }

    /// Blank headers and index artifacts such as "Unnamed: 0"
    fn is_unnamed(header: &str) -> bool {
        header.is_empty() || header.starts_with("Unnamed")
    }

    fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::text(s.as_str()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) if dt.is_duration() => CellValue::Duration(dt.as_f64()),
            Data::DateTime(dt) => CellValue::Date(dt.as_f64()),
            other => CellValue::text(other.to_string()),
        }
    }
}
