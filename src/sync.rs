// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Idempotent create-or-update and delete of monitors by name.
//!
//! Every operation starts from a fresh listing of the backend and matches
//! monitors by exact, case-sensitive name. Nothing is cached between calls. A
//! monitor created by another actor between the listing and the write is not
//! detected; the backend sees last-write-wins.
//!
//! Failures are logged with the monitor name and cause, and the operation is
//! abandoned. Callers get a [`SyncOutcome`] instead of an error so one failing
//! monitor never stops the reconciliation of the others.

use crate::errors::BackendError;
use crate::kuma::{MonitorBackend, MonitorPayload};
use crate::monitor::{MonitorRecord, MonitorSpec};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Result of a synchronizer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A new monitor was created with this id
    Created(u64),
    /// The existing monitor with this id was updated
    Updated(u64),
    /// The monitor with this id was deleted
    Deleted(u64),
    /// Nothing to delete: no monitor has the requested name
    NotFound,
    /// The backend call failed; details were logged
    Failed,
}

/// Applies monitor specs to a [`MonitorBackend`].
#[derive(Clone)]
pub struct MonitorSynchronizer {
    backend: Arc<dyn MonitorBackend>,
}

impl MonitorSynchronizer {
    #[must_use]
    pub fn new(backend: Arc<dyn MonitorBackend>) -> Self {
        Self { backend }
    }

    /// Create the monitor named `spec.name`, or update it if it already exists.
    ///
    /// A parent group name that matches no group is treated as "no parent".
    pub async fn upsert(&self, spec: &MonitorSpec) -> SyncOutcome {
        match self.try_upsert(spec).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(monitor = %spec.name, error = %e, "Failed to create or update monitor");
                SyncOutcome::Failed
            }
        }
    }

    /// Delete the monitor named `name`, if there is one.
    pub async fn remove(&self, name: &str) -> SyncOutcome {
        match self.try_remove(name).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(monitor = %name, error = %e, "Failed to delete monitor");
                SyncOutcome::Failed
            }
        }
    }

    async fn try_upsert(&self, spec: &MonitorSpec) -> Result<SyncOutcome, BackendError> {
        let monitors = self.backend.list_monitors().await?;

        let parent = spec.parent_group_name.as_deref().and_then(|group| {
            let id = find_group_id(&monitors, group);
            if id.is_none() {
                warn!(
                    monitor = %spec.name,
                    parent = %group,
                    "Parent group not found, monitor will have no parent"
                );
            }
            id
        });

        let payload = MonitorPayload::from_spec(spec, parent);

        if let Some(existing) = monitors.iter().find(|monitor| monitor.name == spec.name) {
            info!(monitor = %spec.name, url = %spec.url, "Updating monitor");
            self.backend.update_monitor(existing.id, &payload).await?;
            return Ok(SyncOutcome::Updated(existing.id));
        }

        info!(monitor = %spec.name, url = %spec.url, "Creating new monitor");
        let id = self.backend.create_monitor(&payload).await?;
        info!(monitor = %spec.name, id, "Successfully created monitor");
        Ok(SyncOutcome::Created(id))
    }

    async fn try_remove(&self, name: &str) -> Result<SyncOutcome, BackendError> {
        let monitors = self.backend.list_monitors().await?;

        match monitors.iter().find(|monitor| monitor.name == name) {
            Some(monitor) => {
                self.backend.delete_monitor(monitor.id).await?;
                info!(monitor = %name, id = monitor.id, "Successfully deleted monitor");
                Ok(SyncOutcome::Deleted(monitor.id))
            }
            None => {
                warn!(monitor = %name, "No monitor found with this name");
                Ok(SyncOutcome::NotFound)
            }
        }
    }
}

/// Id of the monitor group named exactly `name`.
#[must_use]
pub fn find_group_id(monitors: &[MonitorRecord], name: &str) -> Option<u64> {
    monitors
        .iter()
        .find(|monitor| monitor.is_group() && monitor.name == name)
        .map(|monitor| monitor.id)
}
