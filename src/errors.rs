// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the Kuma ingress watcher.
//!
//! This module provides specialized error types for:
//! - Process configuration (fatal at startup)
//! - Uptime Kuma API operations (logged and abandoned per call)
//! - Kubernetes list operations (turned into an empty snapshot for the cycle)
//! - Static monitor file loading and per-entry validation

use crate::routing::RoutingKind;
use thiserror::Error;

/// Errors detected while validating the process configuration.
///
/// Every variant is fatal: the binary exits with a non-zero status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A backend URL or credential is missing or empty
    #[error("Uptime Kuma configuration is not set properly: {0} is missing")]
    MissingBackendSetting(&'static str),

    /// The poll interval must be a positive number of seconds
    #[error("watch interval must be greater than zero")]
    InvalidWatchInterval,
}

/// Errors returned by the monitor backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The HTTP request could not be sent or its body could not be read
    #[error("request to {url} failed: {source}")]
    Request {
        /// Full URL of the failed request
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status code
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        /// Full URL of the failed request
        url: String,
        /// HTTP status code returned by the backend
        status: u16,
        /// Response body, useful for diagnosing validation failures
        body: String,
    },

    /// The response body did not have the expected shape
    #[error("unexpected response from {url}: {reason}")]
    Decode {
        /// Full URL of the request
        url: String,
        /// What was wrong with the payload
        reason: String,
    },

    /// Authentication against the backend was rejected
    #[error("login to Uptime Kuma failed: {0}")]
    Login(String),

    /// The configured backend URL cannot be used as a base URL
    #[error("invalid Uptime Kuma URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// URL as configured
        url: String,
        /// Parser error
        reason: String,
    },
}

/// Errors returned by the cluster collaborator.
#[derive(Error, Debug)]
pub enum ClusterError {
    /// Listing a resource kind failed
    #[error("Failed to get {kind}: {source}")]
    List {
        /// Resource kind being listed
        kind: RoutingKind,
        /// Underlying Kubernetes client error
        #[source]
        source: kube::Error,
    },

    /// A listed object lacks the structure needed to derive monitors from it
    #[error("Malformed {kind} object: {reason}")]
    Malformed {
        /// Resource kind of the object
        kind: RoutingKind,
        /// What is missing or invalid
        reason: String,
    },

    /// The Kubernetes client could not be created
    #[error("Failed to initialize Kubernetes client: {0}")]
    Init(#[source] kube::Error),
}

/// Errors raised while loading the static monitor file.
///
/// Each variant is logged with its own message; none of them stop the process.
#[derive(Error, Debug)]
pub enum StaticFileError {
    /// The file does not exist
    #[error("File {path} not found.")]
    NotFound {
        /// Path that was opened
        path: String,
    },

    /// The file is empty or contains only whitespace
    #[error("The file {path} is empty or contains only whitespace.")]
    Empty {
        /// Path that was read
        path: String,
    },

    /// The document is not valid YAML
    #[error("Failed to process file {path}: Invalid YAML format ({source})")]
    InvalidYaml {
        /// Path that was parsed
        path: String,
        /// Parser error
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed but its top level is not a sequence
    #[error("Failed to process file {path}: expected a list of monitors")]
    NotASequence {
        /// Path that was parsed
        path: String,
    },

    /// Any other I/O failure
    #[error("An unexpected error occurred while processing file {path}: {source}")]
    Io {
        /// Path that was opened
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Validation failures for a single static entry or annotation value.
///
/// These never abort the surrounding operation: the entry is skipped or the
/// field is dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// The entry is not a mapping
    #[error("Invalid entry format: {0}")]
    NotAMapping(String),

    /// A required field is absent
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// `accepted-statuscodes` is not a list of strings
    #[error("accepted-statuscodes must be a list of strings, got {0}")]
    InvalidStatusCodes(String),

    /// A field has the wrong type or an unparseable value
    #[error("Invalid value for '{field}': {value}")]
    InvalidField {
        /// Field or annotation name
        field: &'static str,
        /// Offending value, rendered for the log line
        value: String,
    },
}
