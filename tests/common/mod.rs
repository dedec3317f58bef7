// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common test utilities for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use kube::client::Client;
use kuma_ingress_watcher::cluster::ClusterSource;
use kuma_ingress_watcher::constants::ANNOTATION_PREFIX;
use kuma_ingress_watcher::errors::ClusterError;
use kuma_ingress_watcher::routing::{RouteRule, RoutingKind, RoutingObject};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get a Kubernetes client or skip the test if not in a cluster
pub async fn get_kube_client_or_skip() -> Option<Client> {
    match Client::try_default().await {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Skipping integration test: not running in Kubernetes cluster: {e}");
            None
        }
    }
}

/// In-memory cluster whose objects can be replaced between cycles
#[derive(Default)]
pub struct FakeCluster {
    objects: Mutex<HashMap<RoutingKind, Vec<RoutingObject>>>,
}

impl FakeCluster {
    pub fn set(&self, kind: RoutingKind, objects: Vec<RoutingObject>) {
        self.objects.lock().unwrap().insert(kind, objects);
    }
}

#[async_trait]
impl ClusterSource for FakeCluster {
    async fn list_routing_objects(
        &self,
        kind: RoutingKind,
    ) -> Result<Vec<RoutingObject>, ClusterError> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }
}

/// Build an IngressRoute with one route per match expression
pub fn ingress_route(
    name: &str,
    namespace: &str,
    matches: &[&str],
    annotations: &[(&str, &str)],
) -> RoutingObject {
    RoutingObject {
        kind: RoutingKind::IngressRoute,
        name: name.to_string(),
        namespace: namespace.to_string(),
        annotations: annotations
            .iter()
            .map(|(k, v)| {
                (
                    format!("{ANNOTATION_PREFIX}{k}"),
                    (*v).to_string(),
                )
            })
            .collect::<BTreeMap<_, _>>(),
        rules: matches
            .iter()
            .map(|m| RouteRule::Match(Some((*m).to_string())))
            .collect(),
        resource_version: None,
    }
}

/// Mount `GET /monitors` returning `monitors`
pub async fn mount_monitor_list(server: &MockServer, monitors: Value) {
    Mock::given(method("GET"))
        .and(path("/monitors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "monitors": monitors })))
        .mount(server)
        .await;
}

/// JSON bodies of every request received with `http_method` on `url_path`
pub async fn request_bodies(server: &MockServer, http_method: &str, url_path: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.method.as_str() == http_method && request.url.path() == url_path)
        .map(|request| serde_json::from_slice(&request.body).unwrap_or(Value::Null))
        .collect()
}
