//! Vendor Roster - validated vendor records kept in Excel workbooks
//!
//! Translation project managers keep one spreadsheet of vendors per project
//! and source language. This library validates vendor data, derives each
//! vendor's status from a tri-state preference flag, and appends to or edits
//! the `<ProjectName>_<SourceLang>.xlsx` workbooks.
//!
//! # Example
//!
//! ```no_run
//! use vendor_roster::record::VendorRecord;
//! use vendor_roster::store::SpreadsheetStore;
//! use vendor_roster::types::CellValue;
//!
//! let mut record = VendorRecord::new("Toyota MM24", "English", "Dutch", "Jan De Smet")?;
//! record.set_word_rate(0.13)?;
//! record.set_preference(Some(true));
//!
//! let store = SpreadsheetStore::new(".");
//! let row = store.append_record(&record)?;
//! store.modify_cell(&record.file_key(), "Word Rate", row, CellValue::Number(0.12))?;
//! # Ok::<(), vendor_roster::error::VendorError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod record;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{ErrorKind, VendorError, VendorResult};
pub use record::{VendorFields, VendorRecord};
pub use store::{SpreadsheetStore, StoreConfig};
pub use types::{CatTool, CellValue, Column, Status, VendorRow, VendorTable};
