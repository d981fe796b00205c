//! Spreadsheet-backed vendor store
//!
//! One workbook per project and source language, named
//! `<ProjectName>_<SourceLang>.xlsx` under the store root. Every write reads
//! the whole table, changes it in memory and replaces the file. A new
//! workbook is first written next to the target and then renamed over it,
//! so a failed export never leaves a truncated spreadsheet behind.
//!
//! The store assumes a single writer: concurrent processes editing the same
//! workbook will lose each other's changes.

use crate::error::{VendorError, VendorResult};
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::record::VendorRecord;
use crate::types::{CellValue, Column, VendorRow, VendorTable};
use crate::validation;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the store keeps its workbooks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub root: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpreadsheetStore {
    root: PathBuf,
}

impl SpreadsheetStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(&config.root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<project name>_<source language>`
    pub fn file_key(project_name: &str, source_lang: &str) -> String {
        format!("{}_{}", project_name, source_lang)
    }

    /// Path of the workbook for `file_key`
    pub fn path_for(&self, file_key: &str) -> PathBuf {
        self.root.join(format!("{}.xlsx", file_key))
    }

    pub fn exists(&self, file_key: &str) -> bool {
        self.path_for(file_key).is_file()
    }

    /// Append a row, creating the workbook (header + row) if it does not exist
    ///
    /// Returns the zero-based index of the new row.
    pub fn append_or_create(&self, file_key: &str, row: &VendorRow) -> VendorResult<usize> {
        validation::validate_key_part("file key", file_key)?;

        let path = self.path_for(file_key);
        let mut table = if path.is_file() {
            ExcelImporter::new(&path).import()?
        } else {
            info!(file = %path.display(), "creating vendor spreadsheet");
            VendorTable::with_schema()
        };

        let index = table.push_vendor_row(row);
        self.write_table(&path, &table)?;

        debug!(file = %path.display(), row = index, vendor = %row.vendor, "appended vendor");
        Ok(index)
    }

    /// Append a record to its own project/language workbook
    pub fn append_record(&self, record: &VendorRecord) -> VendorResult<usize> {
        self.append_or_create(&record.file_key(), &record.to_row())
    }

    /// Read the full table for `file_key`
    pub fn read_all(&self, file_key: &str) -> VendorResult<VendorTable> {
        let path = self.existing_path(file_key)?;
        let table = ExcelImporter::new(&path).import()?;
        debug!(file = %path.display(), rows = table.len(), "read vendor spreadsheet");
        Ok(table)
    }

    /// Change one modifiable cell and rewrite the workbook
    pub fn modify_cell(
        &self,
        file_key: &str,
        column: &str,
        row_index: usize,
        new_value: CellValue,
    ) -> VendorResult<()> {
        self.modify_row(file_key, row_index, &[(column, new_value)])
    }

    /// Apply several cell changes to one row in a single rewrite
    ///
    /// Every change is checked before anything is written; if one is rejected
    /// the workbook is left as it was.
    pub fn modify_row(
        &self,
        file_key: &str,
        row_index: usize,
        changes: &[(&str, CellValue)],
    ) -> VendorResult<()> {
        let path = self.existing_path(file_key)?;
        let mut table = ExcelImporter::new(&path).import()?;

        for (column, value) in changes {
            let column = Self::modifiable_column(&table, column)?;
            if row_index >= table.len() {
                return Err(VendorError::Lookup(format!(
                    "Invalid index {} for '{}', the spreadsheet has {} vendor(s)",
                    row_index,
                    column,
                    table.len()
                )));
            }
            validation::validate_cell(column, value)?;
        }

        for (column, value) in changes {
            table.set_cell(row_index, column, value.clone());
            debug!(file = %path.display(), row = row_index, column = %column, value = %value, "modified cell");
        }

        self.write_table(&path, &table)?;
        info!(file = %path.display(), row = row_index, changes = changes.len(), "updated vendor");
        Ok(())
    }

    fn existing_path(&self, file_key: &str) -> VendorResult<PathBuf> {
        validation::validate_key_part("file key", file_key)?;
        let path = self.path_for(file_key);
        if !path.is_file() {
            return Err(VendorError::NotFound {
                key: file_key.to_string(),
                path,
            });
        }
        Ok(path)
    }

    fn modifiable_column(table: &VendorTable, name: &str) -> VendorResult<Column> {
        let column = Column::from_header(name)
            .filter(|c| c.is_modifiable())
            .ok_or_else(|| {
                let allowed: Vec<&str> = validation::MODIFIABLE_COLUMNS
                    .iter()
                    .map(|c| c.header())
                    .collect();
                VendorError::Lookup(format!(
                    "Invalid key '{}', pick one of: {}",
                    name,
                    allowed.join(", ")
                ))
            })?;

        if table.column_index(column.header()).is_none() {
            return Err(VendorError::Lookup(format!(
                "The spreadsheet has no '{}' column",
                column
            )));
        }
        Ok(column)
    }

    /// Export to a sibling temporary file, then rename it over `path`
    fn write_table(&self, path: &Path, table: &VendorTable) -> VendorResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

        if let Err(e) = ExcelExporter::new(table).export(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::{CatTool, Status};
    use tempfile::TempDir;

    fn row(vendor: &str) -> VendorRow {
        VendorRow {
            target_language: "French".to_string(),
            vendor: vendor.to_string(),
            email: String::new(),
            cat_tool: CatTool::TradosStudio,
            word_rate: Some(0.14),
            status: Status::Potential,
        }
    }

    #[test]
    fn test_file_key_and_path() {
        let store = SpreadsheetStore::new("/data");
        let key = SpreadsheetStore::file_key("Toyota MM24", "English");
        assert_eq!(key, "Toyota MM24_English");
        assert_eq!(
            store.path_for(&key),
            PathBuf::from("/data/Toyota MM24_English.xlsx")
        );
    }

    #[test]
    fn test_default_config_uses_current_dir() {
        let store = SpreadsheetStore::from_config(&StoreConfig::default());
        assert_eq!(store.root(), Path::new("."));
    }

    #[test]
    fn test_append_creates_then_appends() {
        let dir = TempDir::new().unwrap();
        let store = SpreadsheetStore::new(dir.path());

        assert!(!store.exists("Guide_NL"));
        assert_eq!(store.append_or_create("Guide_NL", &row("Jane Doe")).unwrap(), 0);
        assert!(store.exists("Guide_NL"));
        assert_eq!(store.append_or_create("Guide_NL", &row("Jane Doe")).unwrap(), 1);

        let table = store.read_all("Guide_NL").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], table.rows()[1]);
    }

    #[test]
    fn test_no_temporary_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = SpreadsheetStore::new(dir.path());
        store.append_or_create("Guide_NL", &row("Jane Doe")).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Guide_NL.xlsx".to_string()]);
    }

    #[test]
    fn test_append_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = SpreadsheetStore::new(dir.path());
        let err = store.append_or_create("../escape", &row("X")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_failed_rename_removes_temporary_file() {
        let dir = TempDir::new().unwrap();
        let store = SpreadsheetStore::new(dir.path());

        // A directory in place of the workbook makes the rename fail
        let target = dir.path().join("Guide_NL.xlsx");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();

        let table = VendorTable::with_schema();
        assert_eq!(
            store.write_table(&target, &table).unwrap_err().kind(),
            ErrorKind::Io
        );
        assert!(!dir.path().join(".Guide_NL.xlsx.tmp").exists());
        assert!(target.join("keep").is_file());
    }

    #[test]
    fn test_modify_lookup_errors() {
        let dir = TempDir::new().unwrap();
        let store = SpreadsheetStore::new(dir.path());
        store.append_or_create("Guide_NL", &row("Jane Doe")).unwrap();

        let err = store
            .modify_cell("Guide_NL", "Vendor", 0, CellValue::text("Someone"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);

        let err = store
            .modify_cell("Guide_NL", "Phone", 0, CellValue::text("+32"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);

        let err = store
            .modify_cell("Guide_NL", "Word Rate", 1, CellValue::Number(0.1))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }
}
