//! YAML Export functionality
//!
//! Human-readable export of the full ledger and of reports.

use std::io::Write;

use serde::Serialize;

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full ledger to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> BookkeeperResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# Bookkeeper ledger export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| writeln!(writer))
        .map_err(|e| BookkeeperError::Export(e.to_string()))?;

    export_value_yaml(&export, writer)
}

/// Write any serializable value (statements, balances) as YAML
pub fn export_value_yaml<W: Write, T: Serialize + ?Sized>(value: &T, writer: &mut W) -> BookkeeperResult<()> {
    serde_yaml::to_writer(writer, value).map_err(|e| BookkeeperError::Export(e.to_string()))
}

/// Read a YAML export back
pub fn import_from_yaml(yaml_str: &str) -> BookkeeperResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| BookkeeperError::Validation(e.to_string()))?;
    export.validate().map_err(BookkeeperError::Validation)?;
    Ok(export)
}
