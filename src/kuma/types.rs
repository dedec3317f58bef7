// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Wire types for the Uptime Kuma REST API.

use crate::monitor::{MonitorRecord, MonitorSpec};
use serde::{Deserialize, Serialize};

/// Body of a monitor create or update request.
///
/// `parent` is the resolved group id, not the group name carried by the spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorPayload {
    #[serde(rename = "type")]
    pub monitor_type: String,
    pub name: String,
    pub url: String,
    pub interval: u64,
    pub method: String,
    /// Headers as a JSON-encoded object, the representation the backend stores
    pub headers: Option<String>,
    pub parent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_statuscodes: Option<Vec<String>>,
}

impl MonitorPayload {
    /// Build the request body for `spec` attached to the group `parent`.
    #[must_use]
    pub fn from_spec(spec: &MonitorSpec, parent: Option<u64>) -> Self {
        Self {
            monitor_type: spec.probe_type.clone(),
            name: spec.name.clone(),
            url: spec.url.clone(),
            interval: spec.interval,
            method: spec.method.clone(),
            headers: spec
                .headers
                .as_ref()
                .and_then(|headers| serde_json::to_string(headers).ok()),
            parent,
            accepted_statuscodes: spec.accepted_status_codes.clone(),
        }
    }
}

/// Response of `POST /login/access-token`.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

/// Response of `GET /monitors`.
#[derive(Debug, Deserialize)]
pub(crate) struct MonitorListResponse {
    #[serde(default)]
    pub monitors: Vec<MonitorRecord>,
}

/// Response of `POST /monitors`.
#[derive(Debug, Deserialize)]
pub(crate) struct CreateMonitorResponse {
    #[serde(rename = "monitorID")]
    pub monitor_id: u64,
}
