// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # Kuma Ingress Watcher - Uptime Kuma monitors for Kubernetes routing objects
//!
//! The watcher polls Traefik `IngressRoute` and Kubernetes `Ingress` objects
//! and keeps one Uptime Kuma monitor per routable host. Monitors of objects
//! that disappear or are disabled through annotations are removed.
//!
//! ## Overview
//!
//! Every poll cycle:
//!
//! 1. The current objects of each watched kind are listed ([`cluster`])
//! 2. They are compared by name with the previous cycle ([`differ`])
//! 3. Monitor specs are derived from annotations and rules ([`monitor`], [`annotations`], [`hosts`])
//! 4. Specs are created, updated or deleted by name in Uptime Kuma ([`sync`], [`kuma`])
//!
//! A static YAML file of monitors can also be applied once at startup ([`static_file`]).
//!
//! ## Modules
//!
//! - [`config`] - Command line and environment configuration
//! - [`routing`] - Routing object model and snapshots
//! - [`hosts`] - Host extraction from routing rules
//! - [`annotations`] - Typed probe annotations
//! - [`monitor`] - Monitor specs and their derivation
//! - [`kuma`] - Uptime Kuma API client
//! - [`sync`] - Idempotent monitor create-or-update and delete
//! - [`cluster`] - Kubernetes listing of routing objects
//! - [`differ`] - Snapshot comparison
//! - [`watcher`] - The poll loop
//! - [`static_file`] - Static monitor file loading
//!
//! ## Example
//!
//! ```rust
//! use kuma_ingress_watcher::monitor::{build_specs, Derivation};
//! use kuma_ingress_watcher::routing::{RouteRule, RoutingKind, RoutingObject};
//!
//! let ingress = RoutingObject {
//!     kind: RoutingKind::Ingress,
//!     name: "shop".to_string(),
//!     namespace: "web".to_string(),
//!     annotations: [(
//!         "uptime-kuma.autodiscovery.probe.path".to_string(),
//!         "/healthz".to_string(),
//!     )]
//!     .into(),
//!     rules: vec![RouteRule::Host(Some("shop.example.com".to_string()))],
//!     resource_version: None,
//! };
//!
//! let Derivation::Upsert(specs) = build_specs(&ingress, None) else { unreachable!() };
//! assert_eq!(specs[0].name, "shop-web");
//! assert_eq!(specs[0].url, "https://shop.example.com/healthz");
//! ```

pub mod annotations;
pub mod cluster;
pub mod config;
pub mod constants;
pub mod differ;
pub mod errors;
pub mod hosts;
pub mod kuma;
pub mod monitor;
pub mod routing;
pub mod static_file;
pub mod sync;
pub mod watcher;

#[cfg(test)]
mod config_tests;
