//! Credential table persistence
//!
//! The table is a UTF-8 CSV file with the fixed header `username,password`.
//! The password field holds the full stored-credential string regardless of
//! policy. Saves rewrite the whole table; there is no incremental append.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::StorageError;

const HEADER: [&str; 2] = ["username", "password"];

#[derive(Debug, Deserialize)]
struct TableRow {
    username: String,
    password: String,
}

/// Load the credential table into a username -> stored-credential mapping.
///
/// A missing file is an error rather than an empty table, so that a mistyped
/// location cannot silently mask data loss. A header-only table loads as an
/// empty mapping.
pub fn load(path: &Path) -> Result<HashMap<String, String>, StorageError> {
    if !path.is_file() {
        return Err(StorageError::TableNotFound(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    if headers.iter().ne(HEADER) {
        return Err(StorageError::MalformedTable(format!(
            "expected header username,password, got {:?}",
            headers
        )));
    }

    let mut records = HashMap::new();
    for row in reader.deserialize() {
        let row: TableRow = row?;
        records.insert(row.username, row.password);
    }
    Ok(records)
}

/// Overwrite the table with a header row followed by one row per entry
pub fn save(path: &Path, records: &HashMap<String, String>) -> Result<(), StorageError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADER)?;
    for (username, password) in records {
        writer.write_record([username, password])?;
    }
    writer.flush()?;
    Ok(())
}

/// Create a header-only table at the given location
pub fn create_empty(path: &Path) -> Result<(), StorageError> {
    save(path, &HashMap::new())
}
