//! Cluster nodes

use crate::ids::NodeId;
use serde::{Deserialize, Serialize};

/// A member of the cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub status: NodeStatus,
}

impl Node {
    pub fn new(id: NodeId, status: NodeStatus) -> Self {
        Self { id, status }
    }

    /// Can running work on this node be counted?
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Health status reported by the control plane for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Down,
    Ready,
    Disconnected,
    #[default]
    #[serde(other)]
    Unknown,
}

impl NodeStatus {
    /// Every status except `Down` is considered active.
    pub fn is_active(&self) -> bool {
        match self {
            NodeStatus::Down => false,
            NodeStatus::Unknown | NodeStatus::Ready | NodeStatus::Disconnected => true,
        }
    }
}
