//! Field validators for vendor data
//!
//! Every check that guards a [`VendorRecord`](crate::record::VendorRecord) or a
//! spreadsheet modification lives here, so the record, the store and the
//! interactive flow agree on what a valid value is.

use crate::error::{VendorError, VendorResult};
use crate::types::{CatTool, CellValue, Column, Status};
use regex::Regex;
use std::sync::OnceLock;

/// CAT tools a vendor may work in
pub const CAT_TOOLS: [&str; 4] = ["XTM", "Trados Studio", "MemoQ", "Memsource"];

/// Vendor statuses that may be written to a spreadsheet
pub const STATUSES: [&str; 3] = ["Preferred", "Back-up", "Potential"];

/// Columns the modify flow may change
pub const MODIFIABLE_COLUMNS: [Column; 4] = [
    Column::Email,
    Column::CatTool,
    Column::WordRate,
    Column::Status,
];

/// Highest accepted word rate, in EUR per word (inclusive)
pub const MAX_WORD_RATE: f64 = 0.15;

const EMAIL_PATTERN: &str = r"^[a-z0-9]+[._]?[a-z0-9]+@\w+\.\w{2,3}$";

static EMAIL_REGEX: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn email_regex() -> VendorResult<&'static Regex> {
    EMAIL_REGEX
        .get_or_init(|| Regex::new(EMAIL_PATTERN))
        .as_ref()
        .map_err(|e| VendorError::Pattern(e.clone()))
}

/// Validate an e-mail address
pub fn validate_email(mail: &str) -> VendorResult<()> {
    if !email_regex()?.is_match(mail) {
        return Err(VendorError::Format(format!(
            "'{}' is not a valid e-mail address",
            mail
        )));
    }
    Ok(())
}

/// Validate a word rate: 0.00 < rate <= 0.15
pub fn validate_word_rate(rate: f64) -> VendorResult<()> {
    if !rate.is_finite() {
        return Err(VendorError::Range(format!(
            "Word rate must be a number, got {}",
            rate
        )));
    }
    if rate > MAX_WORD_RATE {
        return Err(VendorError::Range(format!(
            "Word rate {} is above {}, this vendor is too expensive",
            rate, MAX_WORD_RATE
        )));
    }
    if rate <= 0.0 {
        return Err(VendorError::Range(format!(
            "Word rate must be above 0.00, got {}",
            rate
        )));
    }
    Ok(())
}

/// Validate a CAT tool name (exact match)
pub fn validate_cat_tool(tool: &str) -> VendorResult<CatTool> {
    CatTool::ALL
        .into_iter()
        .find(|t| t.as_str() == tool)
        .ok_or_else(|| VendorError::Membership {
            field: "CAT tool",
            value: tool.to_string(),
            allowed: CAT_TOOLS.join(", "),
        })
}

/// Validate a vendor status (exact match)
pub fn validate_status(status: &str) -> VendorResult<Status> {
    Status::ALL
        .into_iter()
        .find(|s| s.as_str() == status)
        .ok_or_else(|| VendorError::Membership {
            field: "status",
            value: status.to_string(),
            allowed: STATUSES.join(", "),
        })
}

/// Required text fields must not be blank
pub fn validate_required(field: &str, value: &str) -> VendorResult<()> {
    if value.trim().is_empty() {
        return Err(VendorError::Format(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Project names and source languages become part of a file name
pub fn validate_key_part(field: &str, value: &str) -> VendorResult<()> {
    validate_required(field, value)?;
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(VendorError::Format(format!(
            "{} '{}' cannot be used in a file name",
            field, value
        )));
    }
    Ok(())
}

/// Check a new cell value against the rules of its column
///
/// Only modifiable columns carry rules; for other columns any value passes.
pub fn validate_cell(column: Column, value: &CellValue) -> VendorResult<()> {
    match column {
        Column::Email => validate_email(expect_text(column, value)?),
        Column::CatTool => validate_cat_tool(expect_text(column, value)?).map(|_| ()),
        Column::Status => validate_status(expect_text(column, value)?).map(|_| ()),
        Column::WordRate => match value {
            CellValue::Number(rate) => validate_word_rate(*rate),
            _ => Err(VendorError::Type {
                field: column.header().to_string(),
                expected: "a number",
            }),
        },
        Column::TargetLanguage | Column::Vendor => Ok(()),
    }
}

fn expect_text(column: Column, value: &CellValue) -> VendorResult<&str> {
    value.as_text().ok_or_else(|| VendorError::Type {
        field: column.header().to_string(),
        expected: "a string",
    })
}
