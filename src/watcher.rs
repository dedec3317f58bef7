// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The poll loop.
//!
//! Each cycle lists every watched kind, compares the result with the
//! previous cycle's snapshot and applies the difference. A failed listing is
//! treated as an empty snapshot, so every object known from the previous
//! cycle is considered removed and its monitor deleted. The snapshot of the
//! cycle always replaces the previous one, including after a failure.
//!
//! Waiting between cycles goes through the [`Ticker`] trait so tests can run
//! an exact number of cycles without sleeping.

use crate::cluster::ClusterSource;
use crate::differ::Reconciler;
use crate::routing::{snapshot_from, RoutingKind, Snapshot};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Waits between two poll cycles.
#[async_trait]
pub trait Ticker: Send {
    async fn tick(&mut self);
}

/// [`Ticker`] sleeping a fixed interval, without jitter.
#[derive(Debug, Clone, Copy)]
pub struct SleepTicker {
    interval: Duration,
}

impl SleepTicker {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

#[async_trait]
impl Ticker for SleepTicker {
    async fn tick(&mut self) {
        tokio::time::sleep(self.interval).await;
    }
}

/// Owns the previous snapshot of every watched kind and drives reconciliation.
pub struct Watcher {
    cluster: Arc<dyn ClusterSource>,
    reconciler: Reconciler,
    kinds: Vec<RoutingKind>,
    previous: HashMap<RoutingKind, Snapshot>,
}

impl Watcher {
    /// Create a watcher with an empty previous snapshot for each kind.
    #[must_use]
    pub fn new(
        cluster: Arc<dyn ClusterSource>,
        reconciler: Reconciler,
        kinds: Vec<RoutingKind>,
    ) -> Self {
        let previous = kinds
            .iter()
            .map(|kind| (*kind, Snapshot::new()))
            .collect();
        Self {
            cluster,
            reconciler,
            kinds,
            previous,
        }
    }

    /// Kinds polled every cycle
    #[must_use]
    pub fn kinds(&self) -> &[RoutingKind] {
        &self.kinds
    }

    /// Snapshot kept from the last cycle for `kind`
    #[must_use]
    pub fn previous(&self, kind: RoutingKind) -> Option<&Snapshot> {
        self.previous.get(&kind)
    }

    /// Run one fetch, diff and apply pass for every watched kind.
    pub async fn run_cycle(&mut self) {
        for kind in self.kinds.clone() {
            let current = self.fetch(kind).await;
            let previous = self.previous.remove(&kind).unwrap_or_default();
            let next = self.reconciler.reconcile(&previous, current, kind).await;
            self.previous.insert(kind, next);
        }
    }

    /// Run cycles forever, waiting on `ticker` between them.
    pub async fn run(&mut self, ticker: &mut dyn Ticker) {
        for kind in &self.kinds {
            info!(kind = %kind, "Start watching {kind} objects");
        }
        loop {
            self.run_cycle().await;
            ticker.tick().await;
        }
    }

    async fn fetch(&self, kind: RoutingKind) -> Snapshot {
        match self.cluster.list_routing_objects(kind).await {
            Ok(objects) => {
                debug!(kind = %kind, count = objects.len(), "Listed routing objects");
                snapshot_from(objects)
            }
            Err(e) => {
                error!(kind = %kind, error = %e, "Failed to get {kind} objects");
                Snapshot::new()
            }
        }
    }
}
