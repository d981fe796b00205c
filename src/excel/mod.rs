//! Excel import/export for vendor spreadsheets
//!
//! - Export: VendorTable → Excel (.xlsx), one `VendorData` worksheet
//! - Import: Excel (.xlsx) → VendorTable

mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::ExcelImporter;

/// Worksheet holding the vendor rows
pub const SHEET_NAME: &str = "VendorData";
