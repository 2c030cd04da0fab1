//! JSON import/export module for scheduler state.
//! Saves and loads cards, review logs and scheduler configs to/from JSON files.

use crate::error::ExportError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Exports a value as pretty-printed JSON to the specified path.
/// Returns an error if file creation or writing fails.
pub fn export_json_to_path<T: Serialize>(
    value: &T,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let json_string = serde_json::to_string_pretty(value)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    log::info!("Exported JSON to '{}'", path.display());
    Ok(())
}

/// Imports a value from a JSON file.
/// Returns an error if the file doesn't exist or its contents don't match `T`.
pub fn import_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ExportError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    log::info!("Imported JSON from '{}'", path.display());
    Ok(value)
}
