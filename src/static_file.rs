// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Static monitor file.
//!
//! The file is a YAML list of monitors, applied once at startup before the
//! poll loop begins:
//!
//! ```yaml
//! - name: status-page
//!   url: https://status.example.com
//!   interval: 30
//!   type: http
//!   method: GET
//!   headers:
//!     Authorization: Bearer token
//!   parent: external
//!   accepted-statuscodes:
//!     - 200-299
//! ```
//!
//! `name` and `url` are required. An invalid entry is logged and skipped
//! without affecting the others. File level problems (missing, empty, not
//! YAML) are reported as [`StaticFileError`] and never stop the process.

use crate::errors::{EntryError, StaticFileError};
use crate::monitor::{describe, status_codes_from_value, MonitorSpec};
use crate::sync::{MonitorSynchronizer, SyncOutcome};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{error, info, warn};

/// Read and validate the monitor file at `path`.
///
/// # Errors
///
/// Returns a [`StaticFileError`] if the file is missing, unreadable, empty,
/// not YAML or not a list. Invalid entries are not errors: they are logged
/// and left out of the result.
pub async fn load_monitor_file(path: &Path) -> Result<Vec<MonitorSpec>, StaticFileError> {
    let display = path.display().to_string();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| match source.kind() {
            ErrorKind::NotFound => StaticFileError::NotFound {
                path: display.clone(),
            },
            _ => StaticFileError::Io {
                path: display.clone(),
                source,
            },
        })?;
    parse_monitor_document(&display, &content)
}

/// Parse the content of a monitor file. `path` is only used in messages.
///
/// # Errors
///
/// See [`load_monitor_file`].
pub fn parse_monitor_document(path: &str, content: &str) -> Result<Vec<MonitorSpec>, StaticFileError> {
    if content.trim().is_empty() {
        return Err(StaticFileError::Empty {
            path: path.to_string(),
        });
    }

    let document: Value =
        serde_yaml::from_str(content).map_err(|source| StaticFileError::InvalidYaml {
            path: path.to_string(),
            source,
        })?;

    let Value::Sequence(entries) = document else {
        return Err(StaticFileError::NotASequence {
            path: path.to_string(),
        });
    };

    Ok(entries
        .iter()
        .filter_map(|entry| match spec_from_entry(entry) {
            Ok(spec) => Some(spec),
            Err(e) => {
                warn!(entry = %describe(entry), error = %e, "Skipping invalid entry");
                None
            }
        })
        .collect())
}

/// Validate one file entry and turn it into a spec with per-entry defaults.
///
/// # Errors
///
/// Returns an [`EntryError`] if the entry is not a mapping, lacks `name` or
/// `url`, or has a field of the wrong type.
pub fn spec_from_entry(entry: &Value) -> Result<MonitorSpec, EntryError> {
    let Value::Mapping(fields) = entry else {
        return Err(EntryError::NotAMapping(describe(entry)));
    };

    let name = required_string(fields, "name")?;
    let url = required_string(fields, "url")?;
    let mut spec = MonitorSpec::new(name, url);

    if let Some(value) = fields.get("interval") {
        spec.interval = value
            .as_u64()
            .filter(|interval| *interval > 0)
            .ok_or_else(|| invalid("interval", value))?;
    }
    if let Some(value) = optional_string(fields, "type")? {
        spec.probe_type = value;
    }
    if let Some(value) = optional_string(fields, "method")? {
        spec.method = value;
    }
    spec.parent_group_name = optional_string(fields, "parent")?;

    if let Some(value) = fields.get("headers").filter(|v| !v.is_null()) {
        let headers: BTreeMap<String, String> =
            serde_yaml::from_value(value.clone()).map_err(|_| invalid("headers", value))?;
        spec.headers = Some(headers);
    }
    if let Some(value) = fields.get("accepted-statuscodes").filter(|v| !v.is_null()) {
        spec.accepted_status_codes = Some(status_codes_from_value(value)?);
    }

    Ok(spec)
}

/// Load the monitor file and upsert every valid entry.
///
/// Returns the number of monitors created or updated. File level errors are
/// logged and yield zero.
pub async fn apply_monitor_file(path: &Path, sync: &MonitorSynchronizer) -> usize {
    let specs = match load_monitor_file(path).await {
        Ok(specs) => specs,
        Err(e @ StaticFileError::Empty { .. }) => {
            info!("{e}");
            return 0;
        }
        Err(e) => {
            error!("{e}");
            return 0;
        }
    };

    info!(path = %path.display(), count = specs.len(), "Applying monitors from file");

    let mut applied = 0;
    for spec in &specs {
        if matches!(
            sync.upsert(spec).await,
            SyncOutcome::Created(_) | SyncOutcome::Updated(_)
        ) {
            applied += 1;
        }
    }
    applied
}

fn required_string(fields: &Mapping, key: &'static str) -> Result<String, EntryError> {
    match fields.get(key) {
        None | Some(Value::Null) => Err(EntryError::MissingField(key)),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Err(invalid(key, other)),
    }
}

fn optional_string(fields: &Mapping, key: &'static str) -> Result<Option<String>, EntryError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(invalid(key, other)),
    }
}

fn invalid(field: &'static str, value: &Value) -> EntryError {
    EntryError::InvalidField {
        field,
        value: describe(value),
    }
}
