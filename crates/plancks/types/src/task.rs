//! Scheduled tasks
//!
//! A task is one instance of a service's task template, placed on a node. It
//! carries two independent states: what the scheduler wants (`desired_state`)
//! and what is actually happening (`observed_state`).

use crate::ids::{NodeId, ServiceId, TaskId};
use serde::{Deserialize, Serialize};

/// A scheduled instance of a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub service_id: ServiceId,
    /// Empty for tasks the scheduler has not placed yet
    pub node_id: NodeId,
    pub desired_state: TaskState,
    pub observed_state: TaskState,
}

impl Task {
    /// Is the task observed running?
    pub fn is_running(&self) -> bool {
        self.observed_state == TaskState::Running
    }

    /// Has the scheduler asked for this task to be shut down?
    pub fn is_shutdown_desired(&self) -> bool {
        self.desired_state == TaskState::Shutdown
    }
}

/// Task lifecycle states, shared by desired and observed state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    New,
    Allocated,
    Pending,
    Assigned,
    Accepted,
    Preparing,
    Ready,
    Starting,
    Running,
    Complete,
    Shutdown,
    Failed,
    Rejected,
    Remove,
    Orphaned,
    #[serde(other)]
    Unknown,
}

/// Filter for task listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks belonging to one of these services; empty means all
    pub services: Vec<ServiceId>,
}

impl TaskFilter {
    pub fn for_services<'a>(ids: impl IntoIterator<Item = &'a ServiceId>) -> Self {
        Self {
            services: ids.into_iter().cloned().collect(),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.services.is_empty() || self.services.contains(&task.service_id)
    }
}
