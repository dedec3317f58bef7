// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Uptime Kuma monitor backend.
//!
//! The watcher only needs four primitives from the backend: list, create,
//! update and delete. They are expressed by the [`MonitorBackend`] trait so the
//! synchronizer can run against [`KumaClient`] in production and an in-memory
//! fake in tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use kuma_ingress_watcher::kuma::{KumaClient, MonitorBackend};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let kuma = KumaClient::login("http://uptime-kuma-api:8000", "admin", "secret").await?;
//! for monitor in kuma.list_monitors().await? {
//!     println!("{} -> {:?}", monitor.name, monitor.url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod memory;

#[cfg(test)]
mod client_tests;

pub use client::KumaClient;
pub use types::MonitorPayload;

use crate::errors::BackendError;
use crate::monitor::MonitorRecord;
use async_trait::async_trait;

/// Remote monitor inventory.
///
/// Implementations do not need to be idempotent on their own; the
/// synchronizer decides which calls to make.
#[async_trait]
pub trait MonitorBackend: Send + Sync {
    /// Return every monitor, groups included.
    async fn list_monitors(&self) -> Result<Vec<MonitorRecord>, BackendError>;

    /// Create a monitor and return its id.
    async fn create_monitor(&self, monitor: &MonitorPayload) -> Result<u64, BackendError>;

    /// Replace the settings of monitor `id`.
    async fn update_monitor(&self, id: u64, monitor: &MonitorPayload) -> Result<(), BackendError>;

    /// Delete monitor `id`.
    async fn delete_monitor(&self, id: u64) -> Result<(), BackendError>;
}
