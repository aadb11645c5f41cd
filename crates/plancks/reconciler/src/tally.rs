//! Per-service task counters

use crate::nodes::ActiveNodes;
use plancks_types::{ServiceId, Task};
use std::collections::HashMap;

/// Task counts keyed by service id, built in one pass over the task roster
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicaTally {
    running: HashMap<ServiceId, u64>,
    non_shutdown: HashMap<ServiceId, u64>,
}

impl ReplicaTally {
    pub fn collect(active: &ActiveNodes, tasks: &[Task]) -> Self {
        let mut tally = Self::default();

        for task in tasks {
            if !task.is_shutdown_desired() {
                *tally.non_shutdown.entry(task.service_id.clone()).or_default() += 1;
            }
            if active.contains(&task.node_id) && task.is_running() {
                *tally.running.entry(task.service_id.clone()).or_default() += 1;
            }
        }

        tally
    }

    /// Tasks observed running on an active node
    pub fn running(&self, service: &ServiceId) -> u64 {
        self.running.get(service).copied().unwrap_or(0)
    }

    /// Tasks whose desired state is not shutdown, regardless of placement or
    /// observed state
    pub fn non_shutdown(&self, service: &ServiceId) -> u64 {
        self.non_shutdown.get(service).copied().unwrap_or(0)
    }
}
