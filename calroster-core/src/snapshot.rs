//! CSV snapshot persistence for the contact directory.
//!
//! Column contract: `first_name,last_name,email_1..email_N`, where N is
//! the largest email count across entries at save time. Entries with
//! fewer addresses get trailing empty cells. Loading accepts any number
//! of `email_k` columns and ignores empty cells, so a snapshot round-trips
//! to an equivalent directory.

use crate::contact::Contact;
use crate::directory::ContactDirectory;
use crate::error::{RosterError, RosterResult};
use std::path::Path;

/// Load a directory from a snapshot file.
///
/// Rows are restored as-is: the snapshot is trusted to already satisfy
/// the directory invariant, so no matching or merging happens here.
pub fn load(path: &Path) -> RosterResult<ContactDirectory> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut directory = ContactDirectory::new();
    for result in reader.records() {
        let record = result?;
        let mut first_name = "";
        let mut last_name = "";
        let mut emails = Vec::new();

        for (header, value) in headers.iter().zip(record.iter()) {
            match header {
                "first_name" => first_name = value,
                "last_name" => last_name = value,
                _ if header.starts_with("email") && !value.is_empty() => {
                    emails.push(value.to_string());
                }
                _ => {}
            }
        }

        let contact = Contact::new(first_name, last_name, emails).map_err(|_| {
            RosterError::Snapshot(format!("empty contact row in {}", path.display()))
        })?;
        directory.restore(contact);
    }

    Ok(directory)
}

/// Save a directory to a snapshot file, sizing the email columns to the
/// widest entry.
pub fn save(directory: &ContactDirectory, path: &Path) -> RosterResult<()> {
    let email_columns = directory
        .entries()
        .iter()
        .map(|entry| entry.emails.len())
        .max()
        .unwrap_or(0);

    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["first_name".to_string(), "last_name".to_string()];
    for i in 1..=email_columns {
        header.push(format!("email_{}", i));
    }
    writer.write_record(&header)?;

    for entry in directory.entries() {
        let mut row = vec![entry.first_name.clone(), entry.last_name.clone()];
        row.extend(entry.emails.iter().cloned());
        row.resize(2 + email_columns, String::new());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
