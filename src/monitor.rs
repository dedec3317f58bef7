// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Monitor specifications and their derivation from routing objects.
//!
//! A [`MonitorSpec`] is the desired state of one Uptime Kuma monitor. Specs are
//! never stored: they are recomputed every time a routing object is added or
//! changes, and are matched against the backend by name only.
//!
//! # Naming
//!
//! An object with a single rule produces monitors named after the base name.
//! With several rules, every rule that resolves to at least one host gets the
//! suffix `-{index}`, where the index starts at 1 and only advances on such
//! rules:
//!
//! ```rust
//! use kuma_ingress_watcher::monitor::{build_specs, Derivation};
//! use kuma_ingress_watcher::routing::{RouteRule, RoutingKind, RoutingObject};
//!
//! let object = RoutingObject {
//!     kind: RoutingKind::IngressRoute,
//!     name: "svc".to_string(),
//!     namespace: "ns".to_string(),
//!     annotations: Default::default(),
//!     rules: vec![
//!         RouteRule::Match(Some("Host(`a.com`)".to_string())),
//!         RouteRule::Match(Some("Host(`b.com`)".to_string())),
//!     ],
//!     resource_version: None,
//! };
//!
//! let Derivation::Upsert(specs) = build_specs(&object, None) else { unreachable!() };
//! let names: Vec<_> = specs.iter().map(|s| s.name.as_str()).collect();
//! assert_eq!(names, ["svc-ns-1", "svc-ns-2"]);
//! ```

use crate::annotations::RouteConfig;
use crate::constants::{
    DEFAULT_MONITOR_INTERVAL_SECS, DEFAULT_PROBE_METHOD, DEFAULT_PROBE_TYPE, MONITOR_TYPE_GROUP,
    MONITOR_URL_SCHEME,
};
use crate::errors::EntryError;
use crate::hosts::extract_hosts;
use crate::routing::RoutingObject;
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Desired state of one monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSpec {
    /// Reconciliation key against the backend
    pub name: String,
    pub url: String,
    /// Check interval in seconds
    pub interval: u64,
    /// Probe protocol, e.g. `http`
    pub probe_type: String,
    pub headers: Option<BTreeMap<String, String>>,
    pub method: String,
    /// Name of the monitor group to attach to, resolved to an id at apply time
    pub parent_group_name: Option<String>,
    /// Status code ranges such as `200-299`
    pub accepted_status_codes: Option<Vec<String>>,
}

impl MonitorSpec {
    /// Create a spec with the default interval, type and method.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            interval: DEFAULT_MONITOR_INTERVAL_SECS,
            probe_type: DEFAULT_PROBE_TYPE.to_string(),
            headers: None,
            method: DEFAULT_PROBE_METHOD.to_string(),
            parent_group_name: None,
            accepted_status_codes: None,
        }
    }
}

/// A monitor as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MonitorRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub monitor_type: String,
    #[serde(default)]
    pub parent: Option<u64>,
}

impl MonitorRecord {
    /// Whether this record is a monitor group that other monitors can attach to.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.monitor_type == MONITOR_TYPE_GROUP
    }
}

/// What must happen to the backend for one routing object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derivation {
    /// Create or update each spec (possibly none)
    Upsert(Vec<MonitorSpec>),
    /// Monitoring is disabled; remove the monitor with this base name
    Remove(String),
}

/// Derive the monitor specs for a routing object.
///
/// When `probe.host` is set, every rule resolves to exactly that host, so an
/// object with several rules yields several specs with the same URL.
///
/// # Arguments
///
/// * `object` - The routing object
/// * `default_parent` - Process-wide parent group name, used when the object
///   has no `probe.parent` annotation
#[must_use]
pub fn build_specs(object: &RoutingObject, default_parent: Option<&str>) -> Derivation {
    let config = RouteConfig::from_annotations(
        &object.annotations,
        &object.default_monitor_name(),
        default_parent,
    );

    if !config.enabled {
        return Derivation::Remove(config.monitor_name);
    }

    let multiple_rules = object.rules.len() > 1;
    let mut index = 1;
    let mut specs = Vec::new();

    for rule in &object.rules {
        let hosts = match &config.host {
            Some(host) => vec![host.clone()],
            None => extract_hosts(rule, object.kind),
        };
        if hosts.is_empty() {
            continue;
        }

        let name = if multiple_rules {
            format!("{}-{index}", config.monitor_name)
        } else {
            config.monitor_name.clone()
        };

        for host in &hosts {
            specs.push(MonitorSpec {
                name: name.clone(),
                url: build_url(host, config.path.as_deref(), config.port.as_deref()),
                interval: config.interval,
                probe_type: config.probe_type.clone(),
                headers: config.headers.clone(),
                method: config.method.clone(),
                parent_group_name: config.parent.clone(),
                accepted_status_codes: config.accepted_status_codes.clone(),
            });
        }
        index += 1;
    }

    Derivation::Upsert(specs)
}

/// Build a monitor URL as `https://{host}{path}:{port}`.
///
/// The path is appended before the port; both are optional.
///
/// ```rust
/// use kuma_ingress_watcher::monitor::build_url;
///
/// assert_eq!(build_url("h", Some("/p"), Some("8080")), "https://h/p:8080");
/// assert_eq!(build_url("h", None, None), "https://h");
/// ```
#[must_use]
pub fn build_url(host: &str, path: Option<&str>, port: Option<&str>) -> String {
    let mut url = format!("{MONITOR_URL_SCHEME}{host}");
    if let Some(path) = path {
        url.push_str(path);
    }
    if let Some(port) = port {
        url.push(':');
        url.push_str(port);
    }
    url
}

/// Parse an `accepted-statuscodes` annotation value.
///
/// The value is read as YAML (so JSON arrays work too) and must be a list of strings.
///
/// # Errors
///
/// Returns [`EntryError::InvalidStatusCodes`] for any other shape.
pub fn parse_status_codes(raw: &str) -> Result<Vec<String>, EntryError> {
    let value: Value = serde_yaml::from_str(raw)
        .map_err(|_| EntryError::InvalidStatusCodes(raw.to_string()))?;
    status_codes_from_value(&value)
}

/// Validate an already parsed `accepted-statuscodes` value.
///
/// # Errors
///
/// Returns [`EntryError::InvalidStatusCodes`] unless `value` is a sequence of strings.
pub fn status_codes_from_value(value: &Value) -> Result<Vec<String>, EntryError> {
    let Value::Sequence(items) = value else {
        return Err(EntryError::InvalidStatusCodes(describe(value)));
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(code) => Ok(code.clone()),
            other => Err(EntryError::InvalidStatusCodes(describe(other))),
        })
        .collect()
}

/// Parse a `headers` annotation value, a JSON or YAML mapping of header names to values.
///
/// # Errors
///
/// Returns [`EntryError::InvalidField`] if the value is not such a mapping.
pub fn parse_headers(raw: &str) -> Result<BTreeMap<String, String>, EntryError> {
    serde_yaml::from_str(raw).map_err(|_| EntryError::InvalidField {
        field: "headers",
        value: raw.to_string(),
    })
}

/// Render a YAML value for a log line.
pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}
