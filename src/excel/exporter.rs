//! Excel exporter implementation - VendorTable → .xlsx

use crate::error::{VendorError, VendorResult};
use crate::types::{CellValue, VendorTable};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Number formats that make Excel (and the importer) read a serial back as a date
struct CellFormats {
    date: Format,
    datetime: Format,
    duration: Format,
}

impl Default for CellFormats {
    fn default() -> Self {
        Self {
            date: Format::new().set_num_format("yyyy-mm-dd"),
            datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
            duration: Format::new().set_num_format("[h]:mm:ss"),
        }
    }
}

/// Writes a vendor table to a single-sheet workbook
pub struct ExcelExporter<'a> {
    table: &'a VendorTable,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(table: &'a VendorTable) -> Self {
        Self { table }
    }

    /// Export the table to an Excel .xlsx file, replacing any file at `output_path`
    pub fn export(&self, output_path: &Path) -> VendorResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(super::SHEET_NAME)
            .map_err(|e| VendorError::Spreadsheet(format!("Failed to set worksheet name: {}", e)))?;

        let header_format = Format::new().set_bold();
        let formats = CellFormats::default();
        for (col_idx, name) in self.table.columns().iter().enumerate() {
            worksheet
                .write_string_with_format(0, col_idx as u16, name, &header_format)
                .map_err(|e| VendorError::Spreadsheet(format!("Failed to write header: {}", e)))?;
        }

        // Data rows start below the header
        for (row_idx, row) in self.table.rows().iter().enumerate() {
            let excel_row = (row_idx + 1) as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                Self::write_cell(worksheet, excel_row, col_idx as u16, cell, &formats)?;
            }
        }

        worksheet.autofit();

        workbook
            .save(output_path)
            .map_err(|e| VendorError::Spreadsheet(format!("Failed to save Excel file: {}", e)))?;

        Ok(())
    }

    /// Empty cells are left unwritten so they read back as empty
    fn write_cell(
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        cell: &CellValue,
        formats: &CellFormats,
    ) -> VendorResult<()> {
        match cell {
            CellValue::Empty => {}
            CellValue::Text(value) => {
                worksheet
                    .write_string(row, col, value)
                    .map_err(|e| VendorError::Spreadsheet(format!("Failed to write text: {}", e)))?;
            }
            CellValue::Number(value) => {
                worksheet.write_number(row, col, *value).map_err(|e| {
                    VendorError::Spreadsheet(format!("Failed to write number: {}", e))
                })?;
            }
            CellValue::Bool(value) => {
                worksheet.write_boolean(row, col, *value).map_err(|e| {
                    VendorError::Spreadsheet(format!("Failed to write boolean: {}", e))
                })?;
            }
            CellValue::Date(serial) | CellValue::Duration(serial) => {
                let format = match cell {
                    CellValue::Duration(_) => &formats.duration,
                    _ if serial.fract() == 0.0 => &formats.date,
                    _ => &formats.datetime,
                };
                worksheet
                    .write_number_with_format(row, col, *serial, format)
                    .map_err(|e| VendorError::Spreadsheet(format!("Failed to write date: {}", e)))?;
            }
        }
        Ok(())
    }
}
