// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Typed view of the `uptime-kuma.autodiscovery.probe.*` annotations.
//!
//! Annotations are parsed once into a [`RouteConfig`]; the monitor builder
//! only reads typed fields.
//!
//! | annotation suffix | default |
//! |---|---|
//! | `interval` | 60 |
//! | `name` | `{name}-{namespace}` |
//! | `enabled` | `true` |
//! | `type` | `http` |
//! | `headers` | none |
//! | `port` | none |
//! | `path` | none |
//! | `host` | none |
//! | `method` | `GET` |
//! | `parent` | process default parent, else none |
//! | `accepted-statuscodes` | none |

use crate::constants::{
    ANNOTATION_ACCEPTED_STATUS_CODES, ANNOTATION_ENABLED, ANNOTATION_HEADERS, ANNOTATION_HOST,
    ANNOTATION_INTERVAL, ANNOTATION_METHOD, ANNOTATION_NAME, ANNOTATION_PARENT, ANNOTATION_PATH,
    ANNOTATION_PORT, ANNOTATION_TYPE, DEFAULT_MONITOR_INTERVAL_SECS, DEFAULT_PROBE_METHOD,
    DEFAULT_PROBE_TYPE,
};
use crate::errors::EntryError;
use crate::monitor::{parse_headers, parse_status_codes};
use std::collections::BTreeMap;
use tracing::warn;

/// Monitor settings for one routing object, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    /// Check interval in seconds, always greater than zero
    pub interval: u64,
    /// Base name of the derived monitors
    pub monitor_name: String,
    /// `false` means the object's monitor must be removed
    pub enabled: bool,
    pub probe_type: String,
    pub headers: Option<BTreeMap<String, String>>,
    pub port: Option<String>,
    pub path: Option<String>,
    /// Literal host that replaces every extracted host
    pub host: Option<String>,
    pub method: String,
    /// Name of the parent monitor group
    pub parent: Option<String>,
    pub accepted_status_codes: Option<Vec<String>>,
}

impl RouteConfig {
    /// Build the configuration for an object from its annotations.
    ///
    /// Invalid `interval`, `headers` and `accepted-statuscodes` values are logged
    /// and replaced by their defaults; they never fail the object.
    ///
    /// # Arguments
    ///
    /// * `annotations` - The object's annotations
    /// * `default_name` - Base name used when `probe.name` is absent
    /// * `default_parent` - Process-wide parent group used when `probe.parent` is absent
    #[must_use]
    pub fn from_annotations(
        annotations: &BTreeMap<String, String>,
        default_name: &str,
        default_parent: Option<&str>,
    ) -> Self {
        let get = |key: &str| {
            annotations
                .get(key)
                .map(String::as_str)
                .filter(|value| !value.is_empty())
        };

        let interval = match get(ANNOTATION_INTERVAL).map(parse_interval) {
            Some(Ok(interval)) => interval,
            Some(Err(e)) => {
                warn!(monitor = %default_name, error = %e, "Ignoring interval annotation");
                DEFAULT_MONITOR_INTERVAL_SECS
            }
            None => DEFAULT_MONITOR_INTERVAL_SECS,
        };

        let headers = get(ANNOTATION_HEADERS).and_then(|raw| match parse_headers(raw) {
            Ok(headers) => Some(headers),
            Err(e) => {
                warn!(monitor = %default_name, error = %e, "Ignoring headers annotation");
                None
            }
        });

        let accepted_status_codes =
            get(ANNOTATION_ACCEPTED_STATUS_CODES).and_then(|raw| match parse_status_codes(raw) {
                Ok(codes) => Some(codes),
                Err(e) => {
                    warn!(
                        monitor = %default_name,
                        error = %e,
                        "Ignoring accepted-statuscodes annotation"
                    );
                    None
                }
            });

        Self {
            interval,
            monitor_name: get(ANNOTATION_NAME).unwrap_or(default_name).to_string(),
            enabled: annotations
                .get(ANNOTATION_ENABLED)
                .is_none_or(|value| value.trim().eq_ignore_ascii_case("true")),
            probe_type: get(ANNOTATION_TYPE)
                .unwrap_or(DEFAULT_PROBE_TYPE)
                .to_string(),
            headers,
            port: get(ANNOTATION_PORT).map(str::to_string),
            path: get(ANNOTATION_PATH).map(str::to_string),
            host: get(ANNOTATION_HOST).map(str::to_string),
            method: get(ANNOTATION_METHOD)
                .unwrap_or(DEFAULT_PROBE_METHOD)
                .to_string(),
            parent: get(ANNOTATION_PARENT)
                .or(default_parent.filter(|parent| !parent.is_empty()))
                .map(str::to_string),
            accepted_status_codes,
        }
    }
}

fn parse_interval(raw: &str) -> Result<u64, EntryError> {
    match raw.trim().parse::<u64>() {
        Ok(interval) if interval > 0 => Ok(interval),
        _ => Err(EntryError::InvalidField {
            field: "interval",
            value: raw.to_string(),
        }),
    }
}
