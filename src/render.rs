// src/render.rs

//! Output rendering
//!
//! Two shapes: a human table with a header and a name column padded to
//! the longest name, and a space-delimited machine format with the bare
//! name first so scripts can cut on whitespace. Missing versions render
//! as fixed sentinel tokens, never blank fields, so both shapes stay
//! stable when data is absent.

use crate::catalog::RemoteVersion;
use crate::resolver::PackageRecord;

/// Sentinel for a package with no installation record
pub const NOT_INSTALLED: &str = "not-installed";

/// Sentinel for a remote version that could not be shown
pub const UNKNOWN: &str = "unknown";

/// Rendering options
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Emit the space-delimited machine format
    pub machine_readable: bool,

    /// Include version columns; disabling this forces machine format,
    /// since the human table without versions is just a name list
    pub show_version: bool,
}

impl RenderOptions {
    fn effective_machine(&self) -> bool {
        self.machine_readable || !self.show_version
    }
}

fn installed_cell(record: &PackageRecord) -> &str {
    record.installed_version.as_deref().unwrap_or(NOT_INSTALLED)
}

fn remote_cell(record: &PackageRecord) -> &str {
    // NotFound and Unknown collapse to one sentinel in default output;
    // the tri-state survives in the record for diagnostic use.
    match &record.remote_version {
        RemoteVersion::Available(v) => v,
        RemoteVersion::NotFound | RemoteVersion::Unknown => UNKNOWN,
    }
}

/// Render records as output lines
pub fn format_records(records: &[PackageRecord], options: &RenderOptions) -> Vec<String> {
    if options.effective_machine() {
        return records
            .iter()
            .map(|record| {
                if options.show_version {
                    format!("{} {} {}", record.name, installed_cell(record), remote_cell(record))
                } else {
                    record.name.clone()
                }
            })
            .collect();
    }

    let name_width = records
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0)
        .max("package".len());

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(format!(
        "{:<name_width$}  {:<15}  {}",
        "package", "installed", "remote"
    ));

    for record in records {
        lines.push(format!(
            "{:<name_width$}  {:<15}  {}",
            record.name,
            installed_cell(record),
            remote_cell(record)
        ));
    }

    lines
}
