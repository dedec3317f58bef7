// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory [`MonitorBackend`] used by unit tests.

use super::{MonitorBackend, MonitorPayload};
use crate::constants::MONITOR_TYPE_GROUP;
use crate::errors::BackendError;
use crate::monitor::MonitorRecord;
use async_trait::async_trait;
use std::sync::Mutex;

/// A call made against the backend, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    List,
    Create(MonitorPayload),
    Update(u64, MonitorPayload),
    Delete(u64),
}

#[derive(Debug, Default)]
struct State {
    monitors: Vec<(MonitorRecord, Option<MonitorPayload>)>,
    calls: Vec<Call>,
    next_id: u64,
    fail_list: bool,
}

/// Backend that keeps monitors in a vector and records every call.
#[derive(Debug, Default)]
pub(crate) struct InMemoryBackend {
    state: Mutex<State>,
}

impl InMemoryBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Seed a monitor group.
    pub(crate) fn with_group(self, id: u64, name: &str) -> Self {
        self.seed(MonitorRecord {
            id,
            name: name.to_string(),
            url: None,
            monitor_type: MONITOR_TYPE_GROUP.to_string(),
            parent: None,
        })
    }

    /// Seed a plain HTTP monitor.
    pub(crate) fn with_monitor(self, id: u64, name: &str, url: &str) -> Self {
        self.seed(MonitorRecord {
            id,
            name: name.to_string(),
            url: Some(url.to_string()),
            monitor_type: "http".to_string(),
            parent: None,
        })
    }

    /// Make every `list_monitors` call fail.
    pub(crate) fn failing(self) -> Self {
        self.state.lock().unwrap().fail_list = true;
        self
    }

    fn seed(self, record: MonitorRecord) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_id = state.next_id.max(record.id);
            state.monitors.push((record, None));
        }
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls other than `List`.
    pub(crate) fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| *call != Call::List)
            .collect()
    }

    pub(crate) fn records(&self) -> Vec<MonitorRecord> {
        self.state
            .lock()
            .unwrap()
            .monitors
            .iter()
            .map(|(record, _)| record.clone())
            .collect()
    }

    /// Last payload written for the monitor named `name`.
    pub(crate) fn payload(&self, name: &str) -> Option<MonitorPayload> {
        self.state
            .lock()
            .unwrap()
            .monitors
            .iter()
            .find(|(record, _)| record.name == name)
            .and_then(|(_, payload)| payload.clone())
    }
}

fn record_from(id: u64, payload: &MonitorPayload) -> MonitorRecord {
    MonitorRecord {
        id,
        name: payload.name.clone(),
        url: Some(payload.url.clone()),
        monitor_type: payload.monitor_type.clone(),
        parent: payload.parent,
    }
}

#[async_trait]
impl MonitorBackend for InMemoryBackend {
    async fn list_monitors(&self) -> Result<Vec<MonitorRecord>, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::List);
        if state.fail_list {
            return Err(BackendError::Status {
                url: "memory://monitors".to_string(),
                status: 500,
                body: "list failed".to_string(),
            });
        }
        Ok(state.monitors.iter().map(|(record, _)| record.clone()).collect())
    }

    async fn create_monitor(&self, monitor: &MonitorPayload) -> Result<u64, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create(monitor.clone()));
        state.next_id += 1;
        let id = state.next_id;
        state
            .monitors
            .push((record_from(id, monitor), Some(monitor.clone())));
        Ok(id)
    }

    async fn update_monitor(&self, id: u64, monitor: &MonitorPayload) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Update(id, monitor.clone()));
        if let Some(entry) = state.monitors.iter_mut().find(|(record, _)| record.id == id) {
            *entry = (record_from(id, monitor), Some(monitor.clone()));
        }
        Ok(())
    }

    async fn delete_monitor(&self, id: u64) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Delete(id));
        state.monitors.retain(|(record, _)| record.id != id);
        Ok(())
    }
}
