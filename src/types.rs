use crate::error::{VendorError, VendorResult};
use crate::validation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

//==============================================================================
// Closed value sets
//==============================================================================

/// Computer-assisted-translation tool a vendor works in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CatTool {
    #[default]
    Xtm,
    TradosStudio,
    MemoQ,
    Memsource,
}

impl CatTool {
    pub const ALL: [CatTool; 4] = [
        CatTool::Xtm,
        CatTool::TradosStudio,
        CatTool::MemoQ,
        CatTool::Memsource,
    ];

    /// Name as it appears in the spreadsheet and in prompts
    pub fn as_str(&self) -> &'static str {
        match self {
            CatTool::Xtm => "XTM",
            CatTool::TradosStudio => "Trados Studio",
            CatTool::MemoQ => "MemoQ",
            CatTool::Memsource => "Memsource",
        }
    }
}

impl fmt::Display for CatTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatTool {
    type Err = VendorError;

    fn from_str(s: &str) -> VendorResult<Self> {
        validation::validate_cat_tool(s)
    }
}

/// Relationship tier of a vendor, derived from the tri-state preference flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Preferred,
    BackUp,
    Potential,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Preferred, Status::BackUp, Status::Potential];

    /// `Some(true)` → Preferred, `Some(false)` → Back-up, `None` → Potential
    pub fn from_preference(preferred: Option<bool>) -> Self {
        match preferred {
            Some(true) => Status::Preferred,
            Some(false) => Status::BackUp,
            None => Status::Potential,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Preferred => "Preferred",
            Status::BackUp => "Back-up",
            Status::Potential => "Potential",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = VendorError;

    fn from_str(s: &str) -> VendorResult<Self> {
        validation::validate_status(s)
    }
}

//==============================================================================
// Spreadsheet schema
//==============================================================================

/// The six columns of a vendor spreadsheet, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    TargetLanguage,
    Vendor,
    Email,
    CatTool,
    WordRate,
    Status,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::TargetLanguage,
        Column::Vendor,
        Column::Email,
        Column::CatTool,
        Column::WordRate,
        Column::Status,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::TargetLanguage => "Target Language",
            Column::Vendor => "Vendor",
            Column::Email => "E-mail",
            Column::CatTool => "CAT Tool",
            Column::WordRate => "Word Rate",
            Column::Status => "Status",
        }
    }

    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.header() == header)
    }

    /// Whether the modify flow may change this column
    pub fn is_modifiable(&self) -> bool {
        validation::MODIFIABLE_COLUMNS.contains(self)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excel date or date-time, kept as its serial number
    Date(f64),
    /// Excel time span, kept as its serial number (days)
    Duration(f64),
}

impl CellValue {
    /// Text cell, or `Empty` for an empty string
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "Empty",
            CellValue::Text(_) => "Text",
            CellValue::Number(_) => "Number",
            CellValue::Bool(_) => "Boolean",
            CellValue::Date(_) => "Date",
            CellValue::Duration(_) => "Duration",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(serial) | CellValue::Duration(serial) => write!(f, "{serial}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(n: Option<f64>) -> Self {
        n.map(CellValue::Number).unwrap_or_default()
    }
}

//==============================================================================
// Rows and tables
//==============================================================================

/// One vendor projected onto the spreadsheet columns
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRow {
    pub target_language: String,
    pub vendor: String,
    pub email: String,
    pub cat_tool: CatTool,
    pub word_rate: Option<f64>,
    pub status: Status,
}

impl VendorRow {
    pub fn cell(&self, column: Column) -> CellValue {
        match column {
            Column::TargetLanguage => CellValue::text(self.target_language.as_str()),
            Column::Vendor => CellValue::text(self.vendor.as_str()),
            Column::Email => CellValue::text(self.email.as_str()),
            Column::CatTool => CellValue::text(self.cat_tool.as_str()),
            Column::WordRate => self.word_rate.into(),
            Column::Status => CellValue::text(self.status.as_str()),
        }
    }

    /// Cells in file column order
    pub fn cells(&self) -> Vec<CellValue> {
        Column::ALL.iter().map(|c| self.cell(*c)).collect()
    }
}

/// In-memory copy of a vendor spreadsheet: a header plus rows of cells
///
/// Columns are kept by name so that named columns outside the vendor schema
/// survive a read-modify-rewrite cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VendorTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl VendorTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Empty table with the six vendor columns
    pub fn with_schema() -> Self {
        Self::new(Column::ALL.iter().map(|c| c.header().to_string()).collect())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Append a row as read from a file, padded or cut to the header width
    pub fn push_cells(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(cells);
    }

    /// Add any vendor column the header lacks, filling existing rows with empty cells
    pub fn ensure_schema(&mut self) {
        for column in Column::ALL {
            if self.column_index(column.header()).is_none() {
                self.columns.push(column.header().to_string());
                for row in &mut self.rows {
                    row.push(CellValue::Empty);
                }
            }
        }
    }

    /// Append a vendor row, matching cells to columns by header. Returns the row index.
    pub fn push_vendor_row(&mut self, row: &VendorRow) -> usize {
        self.ensure_schema();
        let cells = self
            .columns
            .iter()
            .map(|name| {
                Column::from_header(name)
                    .map(|c| row.cell(c))
                    .unwrap_or_default()
            })
            .collect();
        self.rows.push(cells);
        self.rows.len() - 1
    }

    /// Overwrite one cell. Returns false if the row or column does not exist.
    pub fn set_cell(&mut self, row: usize, column: &str, value: CellValue) -> bool {
        let Some(col) = self.column_index(column) else {
            return false;
        };
        match self.rows.get_mut(row) {
            Some(cells) => {
                cells[col] = value;
                true
            }
            None => false,
        }
    }

    /// Row index → value for one column
    pub fn column_values(&self, name: &str) -> Option<BTreeMap<usize, CellValue>> {
        let col = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .enumerate()
                .map(|(idx, row)| (idx, row[col].clone()))
                .collect(),
        )
    }

    /// Column name → (row index → value), the whole table
    pub fn to_column_map(&self) -> BTreeMap<String, BTreeMap<usize, CellValue>> {
        self.columns
            .iter()
            .filter_map(|name| self.column_values(name).map(|v| (name.clone(), v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(vendor: &str) -> VendorRow {
        VendorRow {
            target_language: "Dutch".to_string(),
            vendor: vendor.to_string(),
            email: String::new(),
            cat_tool: CatTool::MemoQ,
            word_rate: Some(0.1),
            status: Status::Potential,
        }
    }

    #[test]
    fn test_status_from_preference() {
        assert_eq!(Status::from_preference(Some(true)), Status::Preferred);
        assert_eq!(Status::from_preference(Some(false)), Status::BackUp);
        assert_eq!(Status::from_preference(None), Status::Potential);
        assert_eq!(Status::BackUp.as_str(), "Back-up");
    }

    #[test]
    fn test_column_headers_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_header(column.header()), Some(column));
        }
        assert_eq!(Column::from_header("Unnamed: 0"), None);
        assert!(!Column::Vendor.is_modifiable());
        assert!(Column::WordRate.is_modifiable());
    }

    #[test]
    fn test_row_cells_use_empty_for_unset_fields() {
        let mut row = sample_row("Jane Doe");
        row.word_rate = None;
        let cells = row.cells();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[2], CellValue::Empty);
        assert_eq!(cells[3], CellValue::Text("MemoQ".to_string()));
        assert_eq!(cells[4], CellValue::Empty);
    }

    #[test]
    fn test_push_vendor_row_keeps_extra_columns() {
        let mut table = VendorTable::new(vec![
            "Vendor".to_string(),
            "Notes".to_string(),
            "Target Language".to_string(),
        ]);
        table.push_cells(vec![
            CellValue::text("Old Vendor"),
            CellValue::text("reliable"),
        ]);

        let idx = table.push_vendor_row(&sample_row("New Vendor"));
        assert_eq!(idx, 1);
        assert_eq!(table.columns().len(), 7);
        assert_eq!(table.cell(0, "Notes"), Some(&CellValue::text("reliable")));
        assert_eq!(table.cell(0, "Target Language"), Some(&CellValue::Empty));
        assert_eq!(table.cell(0, "Status"), Some(&CellValue::Empty));
        assert_eq!(table.cell(1, "Notes"), Some(&CellValue::Empty));
        assert_eq!(table.cell(1, "Vendor"), Some(&CellValue::text("New Vendor")));
        assert_eq!(table.cell(1, "Word Rate"), Some(&CellValue::Number(0.1)));
    }

    #[test]
    fn test_column_map_view() {
        let mut table = VendorTable::with_schema();
        table.push_vendor_row(&sample_row("A"));
        table.push_vendor_row(&sample_row("B"));

        let map = table.to_column_map();
        assert_eq!(map.len(), 6);
        assert_eq!(map["Vendor"][&0], CellValue::text("A"));
        assert_eq!(map["Vendor"][&1], CellValue::text("B"));
        assert!(!table.set_cell(2, "Vendor", CellValue::Empty));
        assert!(!table.set_cell(0, "Nope", CellValue::Empty));
    }

    #[test]
    fn test_cell_value_json_shape() {
        let json = serde_json::to_string(&vec![
            CellValue::Empty,
            CellValue::text("XTM"),
            CellValue::Number(0.12),
        ])
        .unwrap();
        assert_eq!(json, r#"[null,"XTM",0.12]"#);
    }
}
