//! Service definitions

use crate::ids::ServiceId;
use serde::{Deserialize, Serialize};

/// A declared service as reported by the control plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    /// Container image reference
    pub image: String,
    pub mode: ServiceMode,
}

impl Service {
    /// Required replica count, if this is a well-formed replicated service
    pub fn required_replicas(&self) -> Option<u64> {
        match self.mode {
            ServiceMode::Replicated { replicas } => replicas,
            ServiceMode::Global => None,
        }
    }
}

/// Scaling policy of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServiceMode {
    /// A fixed number of replicas
    ///
    /// `replicas` is always present on data from a healthy control plane;
    /// `None` marks a malformed record.
    Replicated { replicas: Option<u64> },

    /// One task per node; not reconciled
    Global,
}

impl ServiceMode {
    pub fn replicated(replicas: u64) -> Self {
        ServiceMode::Replicated {
            replicas: Some(replicas),
        }
    }

    pub fn is_replicated(&self) -> bool {
        matches!(self, ServiceMode::Replicated { .. })
    }
}

/// Parameters for creating a replicated service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub name: String,
    pub image: String,
    pub replicas: u64,
    /// Memory limit in MiB; 0 means unlimited
    #[serde(default)]
    pub memory_limit_mib: u64,
}

impl ServiceRequest {
    pub fn new(name: impl Into<String>, image: impl Into<String>, replicas: u64) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            replicas,
            memory_limit_mib: 0,
        }
    }

    pub fn with_memory_limit_mib(mut self, mib: u64) -> Self {
        self.memory_limit_mib = mib;
        self
    }

    pub fn memory_limit_bytes(&self) -> i64 {
        i64::try_from(self.memory_limit_mib)
            .unwrap_or(i64::MAX)
            .saturating_mul(1024 * 1024)
    }
}
