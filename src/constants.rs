// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the Kuma ingress watcher.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Annotation Keys
// ============================================================================

/// Prefix shared by every annotation the watcher understands
pub const ANNOTATION_PREFIX: &str = "uptime-kuma.autodiscovery.probe.";

/// Monitor check interval in seconds
pub const ANNOTATION_INTERVAL: &str = "uptime-kuma.autodiscovery.probe.interval";

/// Overrides the derived monitor base name
pub const ANNOTATION_NAME: &str = "uptime-kuma.autodiscovery.probe.name";

/// `false` removes the monitor instead of creating it
pub const ANNOTATION_ENABLED: &str = "uptime-kuma.autodiscovery.probe.enabled";

/// Probe protocol type (`http`, `keyword`, ...)
pub const ANNOTATION_TYPE: &str = "uptime-kuma.autodiscovery.probe.type";

/// Request headers as a JSON object
pub const ANNOTATION_HEADERS: &str = "uptime-kuma.autodiscovery.probe.headers";

/// Port suffix appended to the monitor URL
pub const ANNOTATION_PORT: &str = "uptime-kuma.autodiscovery.probe.port";

/// Path suffix appended to the monitor URL
pub const ANNOTATION_PATH: &str = "uptime-kuma.autodiscovery.probe.path";

/// Literal host replacing every host found in the routing rules
pub const ANNOTATION_HOST: &str = "uptime-kuma.autodiscovery.probe.host";

/// HTTP method used by the probe
pub const ANNOTATION_METHOD: &str = "uptime-kuma.autodiscovery.probe.method";

/// Name of the monitor group the monitor is attached to
pub const ANNOTATION_PARENT: &str = "uptime-kuma.autodiscovery.probe.parent";

/// List of accepted status code ranges
pub const ANNOTATION_ACCEPTED_STATUS_CODES: &str =
    "uptime-kuma.autodiscovery.probe.accepted-statuscodes";

// ============================================================================
// Monitor Defaults
// ============================================================================

/// Default monitor check interval (1 minute)
pub const DEFAULT_MONITOR_INTERVAL_SECS: u64 = 60;

/// Default probe type
pub const DEFAULT_PROBE_TYPE: &str = "http";

/// Default probe HTTP method
pub const DEFAULT_PROBE_METHOD: &str = "GET";

/// Scheme used for every URL derived from a routing object
pub const MONITOR_URL_SCHEME: &str = "https://";

/// Monitor `type` value the backend uses for monitor groups
pub const MONITOR_TYPE_GROUP: &str = "group";

// ============================================================================
// Traefik CRD Constants
// ============================================================================

/// API group of the Traefik v2 CRDs
pub const TRAEFIK_LEGACY_API_GROUP: &str = "traefik.containo.us";

/// API group of the Traefik v3 CRDs
pub const TRAEFIK_API_GROUP: &str = "traefik.io";

/// API version served by both Traefik groups
pub const TRAEFIK_API_VERSION: &str = "v1alpha1";

/// Kind name for the Traefik `IngressRoute` resource
pub const KIND_INGRESS_ROUTE: &str = "IngressRoute";

/// Plural resource name for `IngressRoute`
pub const INGRESS_ROUTE_PLURAL: &str = "ingressroutes";

/// Kind name for `networking.k8s.io/v1` `Ingress`
pub const KIND_INGRESS: &str = "Ingress";

// ============================================================================
// Process Defaults
// ============================================================================

/// Default poll loop interval in seconds
pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 10;

/// Default location of the static monitor file
pub const DEFAULT_MONITOR_FILE_PATH: &str = "/config/monitors.yaml";

/// Default log filter when neither `RUST_LOG` nor `LOG_LEVEL` is set
pub const DEFAULT_LOG_LEVEL: &str = "info";
