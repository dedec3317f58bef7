// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Snapshot comparison and application of the resulting changes.
//!
//! Two snapshots of the same kind are compared by object name:
//!
//! - **added** objects have their monitors built and upserted
//! - **removed** objects have the monitor `{name}-{namespace}` deleted
//! - **modified** objects (same name, any structural difference) are treated
//!   like added ones and their full spec set is re-applied
//!
//! An object removed from the cluster loses any `probe.name` override it had,
//! so a custom-named monitor is not deleted with it.

use crate::monitor::{build_specs, Derivation};
use crate::routing::{default_monitor_name, RoutingKind, RoutingObject, Snapshot};
use crate::sync::MonitorSynchronizer;
use tracing::info;

/// Object names partitioned by how they changed between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<String>,
}

impl SnapshotDiff {
    /// Compare `previous` with `current`. Unchanged objects appear in no list.
    #[must_use]
    pub fn between(previous: &Snapshot, current: &Snapshot) -> Self {
        let mut diff = Self::default();

        for (name, object) in current {
            match previous.get(name) {
                None => diff.added.push(name.clone()),
                Some(old) if old != object => diff.modified.push(name.clone()),
                Some(_) => {}
            }
        }
        diff.removed = previous
            .keys()
            .filter(|name| !current.contains_key(*name))
            .cloned()
            .collect();

        diff
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Applies snapshot changes to the monitor backend.
#[derive(Clone)]
pub struct Reconciler {
    sync: MonitorSynchronizer,
    default_parent: Option<String>,
}

impl Reconciler {
    /// # Arguments
    ///
    /// * `sync` - Synchronizer writing to the monitor backend
    /// * `default_parent` - Parent group for objects without a `probe.parent` annotation
    #[must_use]
    pub fn new(sync: MonitorSynchronizer, default_parent: Option<String>) -> Self {
        Self {
            sync,
            default_parent,
        }
    }

    /// Apply the changes from `previous` to `current` and return `current`.
    ///
    /// The returned snapshot is meant to become the next cycle's `previous`.
    pub async fn reconcile(
        &self,
        previous: &Snapshot,
        current: Snapshot,
        kind: RoutingKind,
    ) -> Snapshot {
        let diff = SnapshotDiff::between(previous, &current);

        for name in &diff.added {
            info!(kind = %kind, name = %name, "{kind} {name} added.");
            if let Some(object) = current.get(name) {
                self.apply(object).await;
            }
        }

        for name in &diff.removed {
            if let Some(object) = previous.get(name) {
                info!(kind = %kind, name = %name, "{kind} {name} deleted.");
                self.sync
                    .remove(&default_monitor_name(&object.name, &object.namespace))
                    .await;
            }
        }

        for name in &diff.modified {
            info!(kind = %kind, name = %name, "{kind} {name} modified.");
            if let Some(object) = current.get(name) {
                self.apply(object).await;
            }
        }

        current
    }

    /// Build the monitors of one object and write them to the backend.
    ///
    /// A disabled object removes its base monitor instead.
    pub async fn apply(&self, object: &RoutingObject) {
        match build_specs(object, self.default_parent.as_deref()) {
            Derivation::Upsert(specs) => {
                for spec in &specs {
                    self.sync.upsert(spec).await;
                }
            }
            Derivation::Remove(monitor_name) => {
                info!(
                    kind = %object.kind,
                    name = %object.name,
                    "Monitoring for {} is disabled via annotations.",
                    object.name
                );
                self.sync.remove(&monitor_name).await;
            }
        }
    }
}
