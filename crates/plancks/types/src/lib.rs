//! Plancks Types - Core types for swarm replica reconciliation
//!
//! Plancks is a small controller for swarm-mode clusters. It lists services,
//! nodes and tasks from the cluster control plane and folds them into a
//! per-service replica snapshot.
//!
//! ## Key Concepts
//!
//! - **Service**: A declared workload with an image and a scaling mode
//! - **Node**: A cluster member; only `Down` nodes are unusable
//! - **Task**: One scheduled instance of a service, placed on a node
//! - **ServiceState**: Desired vs. running replica counts for one service

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod ids;
pub mod node;
pub mod service;
pub mod state;
pub mod task;

// Re-export main types
pub use ids::{NodeId, ServiceId, TaskId};
pub use node::{Node, NodeStatus};
pub use service::{Service, ServiceMode, ServiceRequest};
pub use state::ServiceState;
pub use task::{Task, TaskFilter, TaskState};
