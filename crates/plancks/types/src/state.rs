//! Reconciled per-service state

use crate::ids::ServiceId;
use serde::{Deserialize, Serialize};

/// Desired vs. running replica counts for one replicated service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceState {
    pub id: ServiceId,
    pub name: String,
    pub image: String,
    pub replicas_running: u64,
    pub replicas_required: u64,
}

impl ServiceState {
    /// Are at least as many replicas running as required?
    pub fn is_converged(&self) -> bool {
        self.replicas_running >= self.replicas_required
    }

    /// Stable, bytewise sort by service name
    pub fn sort_by_name(states: &mut [ServiceState]) {
        states.sort_by(|a, b| a.name.cmp(&b.name));
    }
}
