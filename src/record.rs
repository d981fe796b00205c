//! Vendor records
//!
//! A [`VendorRecord`] is validated when it is built and again on every
//! change, so a record never holds an invalid value. Its status is not stored:
//! it is derived from the tri-state preference flag each time it is read.

use crate::error::{VendorError, VendorResult};
use crate::types::{CatTool, Status, VendorRow};
use crate::validation;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Field bag used to build a record
///
/// Unknown fields are rejected when deserializing, and `status` is not a
/// field: it can only follow from `preferred`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VendorFields {
    pub project_name: String,
    pub source_lang: String,
    pub target_lang: String,
    pub vendor_name: String,
    #[serde(default)]
    pub vendor_mail: String,
    #[serde(default)]
    pub word_rate: Option<f64>,
    #[serde(default = "default_cat_tool")]
    pub cat_tool: String,
    #[serde(default)]
    pub preferred: Option<bool>,
}

fn default_cat_tool() -> String {
    CatTool::default().as_str().to_string()
}

impl VendorFields {
    /// Required fields set, optional fields at their defaults
    pub fn new(
        project_name: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        vendor_name: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            vendor_name: vendor_name.into(),
            vendor_mail: String::new(),
            word_rate: None,
            cat_tool: default_cat_tool(),
            preferred: None,
        }
    }
}

/// A validated vendor
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRecord {
    project_name: String,
    source_lang: String,
    target_lang: String,
    vendor_name: String,
    vendor_mail: String,
    word_rate: Option<f64>,
    cat_tool: CatTool,
    preferred: Option<bool>,
}

impl VendorRecord {
    /// Create a record with only the required fields
    pub fn new(
        project_name: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        vendor_name: impl Into<String>,
    ) -> VendorResult<Self> {
        Self::create(VendorFields::new(
            project_name,
            source_lang,
            target_lang,
            vendor_name,
        ))
    }

    /// Validate a field bag and build a record from it
    pub fn create(fields: VendorFields) -> VendorResult<Self> {
        validation::validate_key_part("project name", &fields.project_name)?;
        validation::validate_key_part("source language", &fields.source_lang)?;
        validation::validate_required("target language", &fields.target_lang)?;
        validation::validate_required("vendor name", &fields.vendor_name)?;

        if !fields.vendor_mail.is_empty() {
            validation::validate_email(&fields.vendor_mail)?;
        }
        if let Some(rate) = fields.word_rate {
            validation::validate_word_rate(rate)?;
        }
        let cat_tool = validation::validate_cat_tool(&fields.cat_tool)?;

        Ok(Self {
            project_name: fields.project_name,
            source_lang: fields.source_lang,
            target_lang: fields.target_lang,
            vendor_name: fields.vendor_name,
            vendor_mail: fields.vendor_mail,
            word_rate: fields.word_rate,
            cat_tool,
            preferred: fields.preferred,
        })
    }

    /// Build a record from a JSON object
    pub fn from_json(json: &str) -> VendorResult<Self> {
        let fields: VendorFields =
            serde_json::from_str(json).map_err(|e| VendorError::Schema(e.to_string()))?;
        Self::create(fields)
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn vendor_name(&self) -> &str {
        &self.vendor_name
    }

    /// E-mail address, empty when unset
    pub fn vendor_mail(&self) -> &str {
        &self.vendor_mail
    }

    pub fn word_rate(&self) -> Option<f64> {
        self.word_rate
    }

    pub fn cat_tool(&self) -> CatTool {
        self.cat_tool
    }

    pub fn preferred(&self) -> Option<bool> {
        self.preferred
    }

    pub fn status(&self) -> Status {
        Status::from_preference(self.preferred)
    }

    /// `<project name>_<source language>`, the stem of the record's spreadsheet
    pub fn file_key(&self) -> String {
        format!("{}_{}", self.project_name, self.source_lang)
    }

    pub fn set_mail(&mut self, new_mail: &str) -> VendorResult<()> {
        validation::validate_email(new_mail)?;
        self.vendor_mail = new_mail.to_string();
        Ok(())
    }

    pub fn set_word_rate(&mut self, new_rate: f64) -> VendorResult<()> {
        validation::validate_word_rate(new_rate)?;
        self.word_rate = Some(new_rate);
        Ok(())
    }

    pub fn set_cat_tool(&mut self, new_tool: &str) -> VendorResult<()> {
        self.cat_tool = validation::validate_cat_tool(new_tool)?;
        Ok(())
    }

    pub fn set_preference(&mut self, preferred: Option<bool>) {
        self.preferred = preferred;
    }

    /// Project onto the six spreadsheet columns
    pub fn to_row(&self) -> VendorRow {
        VendorRow {
            target_language: self.target_lang.clone(),
            vendor: self.vendor_name.clone(),
            email: self.vendor_mail.clone(),
            cat_tool: self.cat_tool,
            word_rate: self.word_rate,
            status: self.status(),
        }
    }
}

impl fmt::Display for VendorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} translates {} into {} for {}.",
            self.vendor_name, self.source_lang, self.target_lang, self.project_name
        )?;
        if self.vendor_mail.is_empty() {
            writeln!(f, "E-mail: not provided")?;
        } else {
            writeln!(f, "E-mail: {}", self.vendor_mail)?;
        }
        match self.word_rate {
            Some(rate) => writeln!(f, "Word rate: EUR {:.2} per word", rate)?,
            None => writeln!(f, "Word rate: not provided")?,
        }
        writeln!(f, "CAT tool: {}", self.cat_tool)?;
        write!(f, "Status: {}", self.status())
    }
}

/// Load one record or a list of records from a JSON or YAML field bag
///
/// Files ending in `.json` are read as JSON, anything else as YAML. Every
/// entry is validated; the first invalid one fails the whole load.
pub fn load_field_bag(path: &Path) -> VendorResult<Vec<VendorRecord>> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let fields: Vec<VendorFields> = if is_json {
        match serde_json::from_str::<serde_json::Value>(&content)? {
            serde_json::Value::Array(list) => list
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<_, _>>()?,
            single => vec![serde_json::from_value(single)?],
        }
    } else {
        match serde_yaml::from_str::<serde_yaml::Value>(&content)? {
            serde_yaml::Value::Sequence(list) => list
                .into_iter()
                .map(serde_yaml::from_value)
                .collect::<Result<_, _>>()?,
            single => vec![serde_yaml::from_value(single)?],
        }
    };
    fields.into_iter().map(VendorRecord::create).collect()
}
