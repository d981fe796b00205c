use crate::cli::prompt::Prompter;
use crate::error::{ErrorKind, VendorResult};
use crate::record::{self, VendorFields, VendorRecord};
use crate::store::SpreadsheetStore;
use crate::types::{CatTool, CellValue, Column, VendorTable};
use crate::validation;
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::debug;

/// Ask again for as long as the answer fails validation
fn retry<R, W, T>(
    prompt: &mut Prompter<R, W>,
    mut ask: impl FnMut(&mut Prompter<R, W>) -> VendorResult<T>,
) -> VendorResult<T>
where
    R: BufRead,
    W: Write,
{
    loop {
        match ask(prompt) {
            Err(e) if e.is_validation() => prompt.warn(e.to_string())?,
            other => return other,
        }
    }
}

/// Execute the add command: collect a vendor and append it to its spreadsheet
///
/// Returns the row index of the new vendor, or `None` if the operator chose
/// not to write it.
pub fn add<R: BufRead, W: Write>(
    store: &SpreadsheetStore,
    prompt: &mut Prompter<R, W>,
) -> VendorResult<Option<usize>> {
    prompt.say(format!("{}", "📇 Vendor Roster - Add a vendor".bold().green()))?;
    prompt.say("")?;

    let record = loop {
        let record = ask_vendor(prompt)?;
        prompt.say("")?;
        prompt.say(record.to_string())?;
        prompt.say("")?;
        if prompt.confirm("Are you done? (yes/no) ")? {
            break record;
        }
    };

    if !prompt.confirm("Do you want to add this vendor to the spreadsheet? (yes/no) ")? {
        prompt.say(format!("{}", "Nothing was written.".yellow()))?;
        return Ok(None);
    }

    let index = store.append_record(&record)?;
    let path = store.path_for(&record.file_key());
    prompt.say(format!(
        "{} {} added as vendor {} in {}",
        "✅".green(),
        record.vendor_name().bold(),
        index,
        path.display()
    ))?;
    Ok(Some(index))
}

/// Project names and source languages end up in a file name
fn ask_key_part<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    question: &str,
    field: &str,
) -> VendorResult<String> {
    retry(prompt, |p| {
        let value = p.ask_str(question)?;
        validation::validate_key_part(field, &value)?;
        Ok(value)
    })
}

fn ask_vendor<R: BufRead, W: Write>(prompt: &mut Prompter<R, W>) -> VendorResult<VendorRecord> {
    let project_name = ask_key_part(prompt, "What is the project name? ", "project name")?;
    let source_lang = ask_key_part(prompt, "What is the source language? ", "source language")?;
    let vendor_name = prompt.ask_str("What's the vendor's name? ")?;
    let target_lang = prompt.ask_str("Into which language will the vendor translate? ")?;

    let vendor_mail = retry(prompt, |p| {
        match p.ask_optional_str("What is the vendor's e-mail address? (optional) ")? {
            Some(mail) => {
                validation::validate_email(&mail)?;
                Ok(mail)
            }
            None => Ok(String::new()),
        }
    })?;
    let word_rate = retry(prompt, |p| {
        let rate = p.ask_optional_number(
            "What is the vendor's word rate in EUR? Between 0.01 and 0.15, higher means another vendor. (optional) ",
        )?;
        if let Some(rate) = rate {
            validation::validate_word_rate(rate)?;
        }
        Ok(rate)
    })?;
    let cat_tool = prompt
        .ask_menu(
            "In which CAT tool will the vendor be working? (blank for XTM)",
            &validation::CAT_TOOLS,
        )?
        .unwrap_or(CatTool::default().as_str());
    let preferred = prompt.ask_optional_bool(
        "True or false: is this vendor a preferred vendor? Leave blank if neither. ",
    )?;

    VendorRecord::create(VendorFields {
        project_name,
        source_lang,
        target_lang,
        vendor_name,
        vendor_mail,
        word_rate,
        cat_tool: cat_tool.to_string(),
        preferred,
    })
}

/// Execute the modify command: pick a vendor by index and change its modifiable cells
///
/// Returns true if the spreadsheet was rewritten.
pub fn modify<R: BufRead, W: Write>(
    store: &SpreadsheetStore,
    prompt: &mut Prompter<R, W>,
) -> VendorResult<bool> {
    prompt.say(format!("{}", "📇 Vendor Roster - Modify a vendor".bold().green()))?;
    prompt.say("")?;

    loop {
        let project = ask_key_part(
            prompt,
            "What is the name of the project the vendor you want to modify works on? ",
            "project name",
        )?;
        let source = ask_key_part(prompt, "What is the source language? ", "source language")?;
        let file_key = SpreadsheetStore::file_key(&project, &source);

        let table = match store.read_all(&file_key) {
            Ok(table) => table,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                prompt.warn(
                    "A file for this project and source language does not exist yet. Check the project name and source language.",
                )?;
                continue;
            }
            Err(e) => return Err(e),
        };
        if table.is_empty() {
            prompt.warn("This spreadsheet has no vendors yet.")?;
            continue;
        }

        prompt.say("These are the vendors already in the spreadsheet:")?;
        for (index, name) in vendor_names(&table) {
            prompt.say(format!("  {}: {}", index, name))?;
        }

        let index = loop {
            let index = prompt.ask_index("Enter the index of the vendor you want to modify: ")?;
            if index < table.len() {
                break index;
            }
            prompt.warn(format!("There is no vendor with index {}.", index))?;
        };

        let changes = ask_changes(prompt, &table, index)?;
        if !prompt.confirm("Are you done? (yes/no) ")? {
            continue;
        }

        if changes.is_empty() {
            prompt.say(format!("{}", "Nothing to change.".yellow()))?;
            return Ok(false);
        }

        debug!(file_key = %file_key, row = index, changes = changes.len(), "applying changes");
        let changes: Vec<(&str, CellValue)> = changes
            .into_iter()
            .map(|(column, value)| (column.header(), value))
            .collect();
        store.modify_row(&file_key, index, &changes)?;
        prompt.say(format!(
            "{} This vendor is modified correctly.",
            "✅".green()
        ))?;
        return Ok(true);
    }
}

fn vendor_names(table: &VendorTable) -> Vec<(usize, String)> {
    match table.column_values(Column::Vendor.header()) {
        Some(values) => values
            .into_iter()
            .map(|(idx, value)| (idx, value.to_string()))
            .collect(),
        None => (0..table.len()).map(|idx| (idx, String::new())).collect(),
    }
}

fn current(table: &VendorTable, row: usize, column: Column) -> String {
    table
        .cell(row, column.header())
        .map(|v| v.to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "none".to_string())
}

/// New values for the modifiable columns; blank answers keep the current value
fn ask_changes<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    table: &VendorTable,
    row: usize,
) -> VendorResult<Vec<(Column, CellValue)>> {
    let mut changes = Vec::new();

    let mail_question = format!(
        "What is the vendor's e-mail? (current: {}, blank keeps it) ",
        current(table, row, Column::Email)
    );
    let mail = retry(prompt, |p| {
        let mail = p.ask_optional_str(&mail_question)?;
        if let Some(ref mail) = mail {
            validation::validate_email(mail)?;
        }
        Ok(mail)
    })?;
    if let Some(mail) = mail {
        changes.push((Column::Email, CellValue::text(mail)));
    }

    let rate_question = format!(
        "What is the vendor's word rate? Between 0.01 and 0.15. (current: {}, blank keeps it) ",
        current(table, row, Column::WordRate)
    );
    let rate = retry(prompt, |p| {
        let rate = p.ask_optional_number(&rate_question)?;
        if let Some(rate) = rate {
            validation::validate_word_rate(rate)?;
        }
        Ok(rate)
    })?;
    if let Some(rate) = rate {
        changes.push((Column::WordRate, CellValue::Number(rate)));
    }

    let tool_question = format!(
        "In which CAT tool will the vendor be working? (current: {}, blank keeps it)",
        current(table, row, Column::CatTool)
    );
    if let Some(tool) = prompt.ask_menu(&tool_question, &validation::CAT_TOOLS)? {
        changes.push((Column::CatTool, CellValue::text(tool)));
    }

    let status_question = format!(
        "What is the vendor's new status? (current: {}, blank keeps it)",
        current(table, row, Column::Status)
    );
    if let Some(status) = prompt.ask_menu(&status_question, &validation::STATUSES)? {
        changes.push((Column::Status, CellValue::text(status)));
    }

    Ok(changes)
}

/// Execute the list command: print one project/language spreadsheet
pub fn list<W: Write>(
    store: &SpreadsheetStore,
    project: &str,
    source: &str,
    json: bool,
    out: &mut W,
) -> VendorResult<()> {
    let file_key = SpreadsheetStore::file_key(project, source);
    let table = store.read_all(&file_key)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&table.to_column_map())?)?;
        return Ok(());
    }

    writeln!(
        out,
        "{}",
        format!("📇 Vendors for {} ({})", project, source).bold().green()
    )?;
    writeln!(out, "   File: {}", store.path_for(&file_key).display())?;
    writeln!(out)?;

    let mut widths: Vec<usize> = table.columns().iter().map(|c| c.chars().count()).collect();
    for row in table.rows() {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.to_string().chars().count());
        }
    }

    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{:<width$}", name, width = *width))
        .collect();
    writeln!(out, "  #  {}", header.join("  ").bold())?;

    for (idx, row) in table.rows().iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell.to_string(), width = *width))
            .collect();
        writeln!(out, "{:>3}  {}", idx, cells.join("  "))?;
    }

    writeln!(out)?;
    writeln!(out, "   {} vendor(s)", table.len())?;
    Ok(())
}

/// Execute the import command: append every record of a JSON/YAML field bag
///
/// All records are validated before the first one is written.
pub fn import<W: Write>(store: &SpreadsheetStore, file: &Path, out: &mut W) -> VendorResult<usize> {
    writeln!(
        out,
        "{}",
        "📇 Vendor Roster - Importing vendors".bold().green()
    )?;
    writeln!(out, "   File: {}", file.display())?;

    let records = record::load_field_bag(file)?;
    for record in &records {
        let index = store.append_record(record)?;
        writeln!(
            out,
            "   {} {} → {} (row {})",
            "✅".green(),
            record.vendor_name().bold(),
            record.file_key(),
            index
        )?;
    }

    writeln!(out, "   Imported {} vendor(s)", records.len())?;
    Ok(records.len())
}
