// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Routing objects observed in the cluster.
//!
//! Both Traefik `IngressRoute` custom resources and `networking.k8s.io/v1`
//! `Ingress` objects are converted into a single [`RoutingObject`] shape so the
//! rest of the watcher never deals with raw Kubernetes types. A [`Snapshot`] is
//! the full set of objects of one kind seen in a single poll cycle.

use crate::constants::{KIND_INGRESS, KIND_INGRESS_ROUTE};
use crate::errors::ClusterError;
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::DynamicObject;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Routing objects of one kind keyed by object name.
///
/// The namespace is not part of the key: two objects with the same name in
/// different namespaces collapse into one entry, the last one listed wins.
pub type Snapshot = BTreeMap<String, RoutingObject>;

/// The kinds of routing object the watcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoutingKind {
    /// Traefik `IngressRoute` (match-expression based)
    IngressRoute,
    /// Kubernetes `Ingress` (plain host field)
    Ingress,
}

impl RoutingKind {
    /// Kubernetes kind name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IngressRoute => KIND_INGRESS_ROUTE,
            Self::Ingress => KIND_INGRESS,
        }
    }
}

impl fmt::Display for RoutingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a routing object's route or rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteRule {
    /// `IngressRoute` route with its match expression, e.g. ``Host(`a.com`) && PathPrefix(`/`)``
    Match(Option<String>),
    /// `Ingress` rule with its optional host
    Host(Option<String>),
}

/// A routing object reduced to the fields monitors are derived from.
///
/// Values are rebuilt from the cluster every cycle and compared by structural
/// equality, so any change to these fields (including the resource version)
/// causes the object's monitors to be re-applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingObject {
    pub kind: RoutingKind,
    pub name: String,
    pub namespace: String,
    pub annotations: BTreeMap<String, String>,
    pub rules: Vec<RouteRule>,
    pub resource_version: Option<String>,
}

impl RoutingObject {
    /// Default monitor base name, `{name}-{namespace}`.
    ///
    /// This is also the name removed when the object disappears from the cluster.
    #[must_use]
    pub fn default_monitor_name(&self) -> String {
        default_monitor_name(&self.name, &self.namespace)
    }

    /// Convert a Kubernetes `Ingress` into a routing object.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::Malformed`] if the object has no name or namespace.
    pub fn from_ingress(ingress: &Ingress) -> Result<Self, ClusterError> {
        let (name, namespace) = identity(&ingress.metadata, RoutingKind::Ingress)?;

        let rules = ingress
            .spec
            .as_ref()
            .and_then(|spec| spec.rules.as_ref())
            .map(|rules| {
                rules
                    .iter()
                    .map(|rule| RouteRule::Host(rule.host.clone()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            kind: RoutingKind::Ingress,
            name,
            namespace,
            annotations: ingress.metadata.annotations.clone().unwrap_or_default(),
            rules,
            resource_version: ingress.metadata.resource_version.clone(),
        })
    }

    /// Convert a Traefik `IngressRoute` listed as a dynamic object.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::Malformed`] if the object has no name or namespace,
    /// or if `spec.routes` is not a list of route objects.
    pub fn from_ingress_route(object: &DynamicObject) -> Result<Self, ClusterError> {
        let (name, namespace) = identity(&object.metadata, RoutingKind::IngressRoute)?;

        let spec: IngressRouteSpec = match object.data.get("spec") {
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|e| ClusterError::Malformed {
                    kind: RoutingKind::IngressRoute,
                    reason: format!("{name}: invalid spec: {e}"),
                })?
            }
            None => IngressRouteSpec::default(),
        };

        Ok(Self {
            kind: RoutingKind::IngressRoute,
            name,
            namespace,
            annotations: object.metadata.annotations.clone().unwrap_or_default(),
            rules: spec
                .routes
                .into_iter()
                .map(|route| RouteRule::Match(route.match_rule))
                .collect(),
            resource_version: object.metadata.resource_version.clone(),
        })
    }
}

/// Default monitor base name for an object that may no longer exist.
#[must_use]
pub fn default_monitor_name(name: &str, namespace: &str) -> String {
    format!("{name}-{namespace}")
}

/// Build a snapshot from listed objects, keyed by name.
#[must_use]
pub fn snapshot_from(objects: Vec<RoutingObject>) -> Snapshot {
    objects
        .into_iter()
        .map(|object| (object.name.clone(), object))
        .collect()
}

/// The subset of an `IngressRoute` spec the watcher reads.
#[derive(Debug, Default, Deserialize)]
struct IngressRouteSpec {
    #[serde(default)]
    routes: Vec<IngressRouteEntry>,
}

#[derive(Debug, Deserialize)]
struct IngressRouteEntry {
    #[serde(rename = "match", default)]
    match_rule: Option<String>,
}

fn identity(metadata: &ObjectMeta, kind: RoutingKind) -> Result<(String, String), ClusterError> {
    let name = metadata.name.clone().ok_or_else(|| ClusterError::Malformed {
        kind,
        reason: "metadata.name is missing".to_string(),
    })?;
    let namespace = metadata
        .namespace
        .clone()
        .ok_or_else(|| ClusterError::Malformed {
            kind,
            reason: format!("{name}: metadata.namespace is missing"),
        })?;
    Ok((name, namespace))
}
