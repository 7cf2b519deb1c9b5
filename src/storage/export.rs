use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::error::StorageError;

/// Writes a generated report to the given path.
pub fn export_report(document: &str, path: &Path) -> Result<(), StorageError> {
    fs::write(path, document)?;
    Ok(())
}

/// Returns the default export path for a report.
///
/// Format: `~/rapport-arrestation-{LAST_NAME}-{YYYYMMDD}.txt`. Characters
/// outside ASCII letters, digits and `-` in the name become `_`.
///
/// Returns `StorageError::NoHomeDir` if the home directory cannot be
/// determined.
pub fn default_export_path(last_name: &str, date: NaiveDate) -> Result<PathBuf, StorageError> {
    let home = dirs::home_dir().ok_or(StorageError::NoHomeDir)?;
    Ok(home.join(export_file_name(last_name, date)))
}

fn export_file_name(last_name: &str, date: NaiveDate) -> String {
    let safe_name: String = last_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    let safe_name = if safe_name.is_empty() {
        "INCONNU".to_string()
    } else {
        safe_name
    };
    format!("rapport-arrestation-{safe_name}-{}.txt", date.format("%Y%m%d"))
}
