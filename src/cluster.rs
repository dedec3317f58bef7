// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Listing routing objects from the Kubernetes API.
//!
//! [`ClusterSource`] is what the poll loop consumes; [`KubeClusterSource`] is
//! the implementation backed by a `kube::Client`. Traefik `IngressRoute`
//! objects are read as dynamic objects because their API group depends on the
//! Traefik version in use.

use crate::config::CrdGroup;
use crate::constants::{INGRESS_ROUTE_PLURAL, KIND_INGRESS_ROUTE, TRAEFIK_API_VERSION};
use crate::errors::ClusterError;
use crate::routing::{RoutingKind, RoutingObject};
use async_trait::async_trait;
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::{ApiResource, DynamicObject, GroupVersionKind, ListParams};
use kube::{Api, Client};
use tracing::{debug, error, warn};

/// Source of routing object snapshots.
#[async_trait]
pub trait ClusterSource: Send + Sync {
    /// List every object of `kind` across all namespaces.
    ///
    /// Objects that cannot be converted are skipped, not reported as errors.
    async fn list_routing_objects(&self, kind: RoutingKind)
        -> Result<Vec<RoutingObject>, ClusterError>;
}

/// [`ClusterSource`] reading from the Kubernetes API server.
#[derive(Clone)]
pub struct KubeClusterSource {
    client: Client,
    crd_group: CrdGroup,
}

impl KubeClusterSource {
    #[must_use]
    pub fn new(client: Client, crd_group: CrdGroup) -> Self {
        Self { client, crd_group }
    }

    /// Connect using the in-cluster configuration or the local kubeconfig.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterError::Init`] if no usable configuration is found.
    pub async fn try_default(crd_group: CrdGroup) -> Result<Self, ClusterError> {
        let client = Client::try_default().await.map_err(ClusterError::Init)?;
        Ok(Self::new(client, crd_group))
    }

    /// Check whether the `IngressRoute` CRD of the configured group is installed.
    pub async fn ingress_route_crd_exists(&self) -> bool {
        self.crd_exists(self.crd_group.api_group(), INGRESS_ROUTE_PLURAL)
            .await
    }

    /// Check whether the CRD `{plural}.{group}` is installed.
    ///
    /// A missing CRD returns `false` silently; any other API error is logged
    /// and also returns `false`.
    pub async fn crd_exists(&self, group: &str, plural: &str) -> bool {
        let crds: Api<CustomResourceDefinition> = Api::all(self.client.clone());
        let name = format!("{plural}.{group}");

        match crds.get_opt(&name).await {
            Ok(Some(_)) => true,
            Ok(None) => {
                debug!(crd = %name, "CRD not installed");
                false
            }
            Err(e) => {
                error!(crd = %name, error = %e, "Failed to look up CRD");
                false
            }
        }
    }

    async fn list_ingress_routes(&self) -> Result<Vec<RoutingObject>, ClusterError> {
        let resource = ingress_route_resource(self.crd_group);
        let api: Api<DynamicObject> = Api::all_with(self.client.clone(), &resource);

        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|source| ClusterError::List {
                kind: RoutingKind::IngressRoute,
                source,
            })?;

        Ok(convert_each(list.items.iter(), RoutingObject::from_ingress_route))
    }

    async fn list_ingresses(&self) -> Result<Vec<RoutingObject>, ClusterError> {
        let api: Api<Ingress> = Api::all(self.client.clone());

        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|source| ClusterError::List {
                kind: RoutingKind::Ingress,
                source,
            })?;

        Ok(convert_each(list.items.iter(), RoutingObject::from_ingress))
    }
}

#[async_trait]
impl ClusterSource for KubeClusterSource {
    async fn list_routing_objects(
        &self,
        kind: RoutingKind,
    ) -> Result<Vec<RoutingObject>, ClusterError> {
        match kind {
            RoutingKind::IngressRoute => self.list_ingress_routes().await,
            RoutingKind::Ingress => self.list_ingresses().await,
        }
    }
}

/// API resource describing Traefik's `IngressRoute` in `group`.
#[must_use]
pub fn ingress_route_resource(group: CrdGroup) -> ApiResource {
    let gvk = GroupVersionKind::gvk(group.api_group(), TRAEFIK_API_VERSION, KIND_INGRESS_ROUTE);
    ApiResource::from_gvk_with_plural(&gvk, INGRESS_ROUTE_PLURAL)
}

fn convert_each<'a, K: 'a>(
    items: impl Iterator<Item = &'a K>,
    convert: impl Fn(&K) -> Result<RoutingObject, ClusterError>,
) -> Vec<RoutingObject> {
    items
        .filter_map(|item| match convert(item) {
            Ok(object) => Some(object),
            Err(e) => {
                warn!(error = %e, "Skipping routing object");
                None
            }
        })
        .collect()
}
